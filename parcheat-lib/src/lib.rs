mod code;
mod code_plugin;
mod code_string;
mod memory_accessors;
mod par_plugin;

pub use code::{first_address, parse_codes, CodeEntry};
pub use code_plugin::CodePlugin;
pub use code_string::{
    format_code_entry, format_code_string, CodeStringError, MemoryWriteRequest, LINE_SEPARATOR,
};
pub use memory_accessors::{FnMemoryAccessor, MemoryAccessor, RamImage};
pub use par_plugin::{ParPlugin, ParVariant, UnknownVariant};

pub fn new_code_plugin(variant: ParVariant) -> Box<dyn CodePlugin + Send> {
    Box::new(ParPlugin::new(variant))
}
