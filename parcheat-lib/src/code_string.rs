use derive_new::new;
use getset::CopyGetters;
use serde::{Deserialize, Serialize};

use crate::{code::CodeEntry, memory_accessors::le_bytes};

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// `width` bytes of `value` to be placed at `address`, little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct MemoryWriteRequest {
    address: usize,
    width: usize,
    value: u64,
}

impl MemoryWriteRequest {
    pub fn to_code_entries(self) -> impl Iterator<Item = CodeEntry> {
        le_bytes(self.value, self.width)
            .enumerate()
            .map(move |(i, byte)| CodeEntry::new(self.address.wrapping_add(i), byte))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodeStringError {
    #[error("no code lines to generate")]
    Empty,
}

pub fn format_code_entry(entry: &CodeEntry) -> String {
    format!("{:06X} {:02X}", entry.address(), entry.value())
}

pub fn format_code_string(
    requests: impl IntoIterator<Item = MemoryWriteRequest>,
) -> Result<String, CodeStringError> {
    let lines: Vec<_> = requests
        .into_iter()
        .flat_map(|request| request.to_code_entries())
        .map(|entry| format_code_entry(&entry))
        .collect();
    if lines.is_empty() {
        return Err(CodeStringError::Empty);
    }
    Ok(lines.join(LINE_SEPARATOR))
}
