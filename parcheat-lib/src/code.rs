use derive_new::new;
use getset::CopyGetters;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

static CODE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{6} [0-9A-Fa-f]{2}$").unwrap());

/// One `AAAAAA VV` line: write `value` to `address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct CodeEntry {
    address: usize,
    value: u8,
}

/// Missing tokens, bad digits and values that don't fit `T` all decode to 0.
fn decode_hex<T: TryFrom<u64> + Default>(token: Option<&str>) -> T {
    token
        .and_then(|x| u64::from_str_radix(x, 16).ok())
        .and_then(|x| T::try_from(x).ok())
        .unwrap_or_default()
}

/// Lines that don't match the code format are skipped and tokens that fail to
/// decode become 0. Never fails.
pub fn parse_codes(code: &str) -> Vec<CodeEntry> {
    code.lines()
        .filter(|line| {
            let matched = CODE_FORMAT.is_match(line);
            if !matched {
                trace!("skipped: {:?}", line);
            }
            matched
        })
        .map(|line| {
            let mut tokens = line.split(' ');
            let address = decode_hex(tokens.next());
            let value = decode_hex(tokens.next());
            CodeEntry::new(address, value)
        })
        .collect()
}

/// Address of the first code, 0 if there is none.
pub fn first_address(code: &str) -> usize {
    parse_codes(code)
        .first()
        .map(|entry| entry.address())
        .unwrap_or(0)
}
