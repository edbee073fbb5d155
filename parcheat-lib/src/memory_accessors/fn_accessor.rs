use derive_new::new;

use super::MemoryAccessor;

/// Adapts a host that exposes its memory as a pair of functions.
#[derive(new)]
pub struct FnMemoryAccessor<R, W>
where
    R: Fn(usize, usize) -> u64,
    W: FnMut(usize, usize, u64),
{
    read_func: R,
    write_func: W,
}

impl<R, W> MemoryAccessor for FnMemoryAccessor<R, W>
where
    R: Fn(usize, usize) -> u64,
    W: FnMut(usize, usize, u64),
{
    fn read(&self, addr: usize, size: usize) -> u64 {
        (self.read_func)(addr, size)
    }

    fn write(&mut self, addr: usize, size: usize, value: u64) {
        (self.write_func)(addr, size, value)
    }
}
