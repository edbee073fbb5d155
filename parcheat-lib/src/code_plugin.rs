use crate::{
    code_string::{CodeStringError, MemoryWriteRequest},
    memory_accessors::MemoryAccessor,
};

/// A code format the host can drive.
///
/// The host calls `start` with the text from its code field, then `execute`
/// once per cycle until `stop`. Mutating calls take `&mut self`, so the host
/// can't overlap them on one instance.
pub trait CodePlugin {
    /// Display name shown when the format is selected.
    fn name(&self) -> &str;

    /// Whether `get_address` can locate the memory a code targets.
    fn can_get_address(&self) -> bool;
    fn get_address(&self, code: &str, encrypted: bool) -> usize;

    fn start(&mut self, code: &str, encrypted: bool);
    fn stop(&mut self);
    fn execute(&self, memory: &mut dyn MemoryAccessor);

    /// Code text that writes each request's value to its address.
    fn get_code_string(
        &self,
        memory: &[MemoryWriteRequest],
        encrypted: bool,
    ) -> Result<String, CodeStringError>;

    fn can_encrypt(&self) -> bool;
    fn encrypt(&self, code: &str) -> String;
    fn decrypt(&self, code: &str) -> String;

    /// Last error message, empty if none.
    fn get_error(&self) -> &str;

    fn dispose(&mut self) {
        self.stop();
    }
}
