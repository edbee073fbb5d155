use std::{borrow::Cow, fmt, str::FromStr};

use getset::CopyGetters;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    code::{first_address, parse_codes, CodeEntry},
    code_plugin::CodePlugin,
    code_string::{format_code_string, CodeStringError, MemoryWriteRequest},
    memory_accessors::MemoryAccessor,
};

/// Pro Action Replay code formats. They share the same line format and only
/// differ in their name and whether the host may hand them encrypted text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParVariant {
    #[default]
    SfcPar,
    SnesPar,
}

impl ParVariant {
    pub fn name(self) -> &'static str {
        match self {
            Self::SfcPar => "SFC PAR",
            Self::SnesPar => "SnesPAR",
        }
    }

    pub fn accepts_encrypted_code(self) -> bool {
        matches!(self, Self::SfcPar)
    }
}

impl fmt::Display for ParVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SfcPar => "sfc-par",
            Self::SnesPar => "snes-par",
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown code format: {}", .0)]
pub struct UnknownVariant(String);

impl FromStr for ParVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sfc-par" | "sfc par" => Ok(Self::SfcPar),
            "snes-par" | "snespar" => Ok(Self::SnesPar),
            _ => Err(UnknownVariant(s.to_owned())),
        }
    }
}

#[derive(CopyGetters)]
pub struct ParPlugin {
    #[getset(get_copy = "pub")]
    variant: ParVariant,
    codes: Option<Vec<CodeEntry>>,
    error: String,
}

impl ParPlugin {
    pub fn new(variant: ParVariant) -> Self {
        Self {
            variant,
            codes: None,
            error: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.codes.is_some()
    }

    pub fn active_codes(&self) -> &[CodeEntry] {
        self.codes.as_deref().unwrap_or_default()
    }

    fn plain_text<'a>(&self, code: &'a str, encrypted: bool) -> Cow<'a, str> {
        if encrypted && self.variant.accepts_encrypted_code() {
            Cow::Owned(self.decrypt(code))
        } else {
            Cow::Borrowed(code)
        }
    }
}

impl Default for ParPlugin {
    fn default() -> Self {
        Self::new(ParVariant::default())
    }
}

impl CodePlugin for ParPlugin {
    fn name(&self) -> &str {
        self.variant.name()
    }

    fn can_get_address(&self) -> bool {
        true
    }

    fn get_address(&self, code: &str, encrypted: bool) -> usize {
        first_address(&self.plain_text(code, encrypted))
    }

    fn start(&mut self, code: &str, encrypted: bool) {
        let codes = parse_codes(&self.plain_text(code, encrypted));
        debug!("{}: start {} codes", self.name(), codes.len());
        self.codes = Some(codes);
    }

    fn stop(&mut self) {
        if self.codes.take().is_some() {
            debug!("{}: stop", self.name());
        }
    }

    fn execute(&self, memory: &mut dyn MemoryAccessor) {
        let Some(codes) = &self.codes else {
            return;
        };
        for code in codes {
            memory.write(code.address(), 1, code.value() as u64);
        }
        trace!("{}: wrote {} codes", self.name(), codes.len());
    }

    fn get_code_string(
        &self,
        memory: &[MemoryWriteRequest],
        encrypted: bool,
    ) -> Result<String, CodeStringError> {
        let code = format_code_string(memory.iter().copied())?;
        if encrypted && self.variant.accepts_encrypted_code() {
            return Ok(self.encrypt(&code));
        }
        Ok(code)
    }

    fn can_encrypt(&self) -> bool {
        false
    }

    fn encrypt(&self, code: &str) -> String {
        code.to_owned()
    }

    fn decrypt(&self, code: &str) -> String {
        code.to_owned()
    }

    fn get_error(&self) -> &str {
        &self.error
    }
}

impl Drop for ParPlugin {
    fn drop(&mut self) {
        self.dispose();
    }
}
