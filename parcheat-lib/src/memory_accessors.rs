mod fn_accessor;
mod ram_image;

pub use fn_accessor::FnMemoryAccessor;
pub use ram_image::RamImage;

/// Read/write primitives supplied by the host that owns the memory.
///
/// `size` is a byte count. Values are little-endian, bytes past the 8th are
/// ignored on read and written as zero.
pub trait MemoryAccessor {
    fn read(&self, addr: usize, size: usize) -> u64;
    fn write(&mut self, addr: usize, size: usize, value: u64);

    fn read_u8(&self, addr: usize) -> u8 {
        self.read(addr, 1) as u8
    }

    fn write_u8(&mut self, addr: usize, value: u8) {
        self.write(addr, 1, value as u64)
    }

    fn read_u16(&self, addr: usize) -> u16 {
        self.read(addr, 2) as u16
    }

    fn write_u16(&mut self, addr: usize, value: u16) {
        self.write(addr, 2, value as u64)
    }
}

impl<T: MemoryAccessor + ?Sized> MemoryAccessor for &mut T {
    fn read(&self, addr: usize, size: usize) -> u64 {
        (**self).read(addr, size)
    }

    fn write(&mut self, addr: usize, size: usize, value: u64) {
        (**self).write(addr, size, value)
    }
}

pub(crate) fn le_bytes(value: u64, size: usize) -> impl Iterator<Item = u8> {
    (0..size).map(move |i| {
        value
            .checked_shr(8 * i as u32)
            .map(|x| (x & 0xff) as u8)
            .unwrap_or(0)
    })
}
