use getset::{CopyGetters, Getters};
use tracing::warn;

use super::{le_bytes, MemoryAccessor};

/// A flat byte buffer mapped at `base_addr`.
#[derive(CopyGetters, Getters)]
pub struct RamImage {
    #[getset(get_copy = "pub")]
    base_addr: usize,
    #[getset(get = "pub")]
    bytes: Vec<u8>,
}

impl RamImage {
    pub fn new(base_addr: usize, bytes: Vec<u8>) -> Self {
        Self { base_addr, bytes }
    }

    pub fn zeroed(base_addr: usize, len: usize) -> Self {
        Self::new(base_addr, vec![0; len])
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn offset(&self, addr: usize, size: usize) -> Option<usize> {
        let offset = addr.checked_sub(self.base_addr)?;
        let end = offset.checked_add(size)?;
        (end <= self.bytes.len()).then_some(offset)
    }
}

impl MemoryAccessor for RamImage {
    fn read(&self, addr: usize, size: usize) -> u64 {
        let Some(offset) = self.offset(addr, size) else {
            warn!("read out of range: {:06X} ({} bytes)", addr, size);
            return 0;
        };
        let mut buffer = [0u8; 8];
        let len = size.min(buffer.len());
        buffer[..len].copy_from_slice(&self.bytes[offset..offset + len]);
        u64::from_le_bytes(buffer)
    }

    fn write(&mut self, addr: usize, size: usize, value: u64) {
        let Some(offset) = self.offset(addr, size) else {
            warn!("write out of range: {:06X} ({} bytes)", addr, size);
            return;
        };
        self.bytes[offset..offset + size]
            .iter_mut()
            .zip(le_bytes(value, size))
            .for_each(|(dst, src)| *dst = src);
    }
}
