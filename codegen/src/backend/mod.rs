//! Renderers turning an instruction list into output text.

mod cpp;
mod json;

pub use cpp::CppBackend;
pub use json::JsonBackend;

use crate::error::Result;
use crate::instruction::Instruction;

/// Output target for generated instructions.
pub trait Backend {
    /// Short name used for selection, e.g. `cpp`.
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Fails only when the output cannot be produced (formatting or
    /// serialization); instructions are assumed valid.
    fn render(&self, instructions: &[Instruction]) -> Result<String>;
}
