use super::Backend;
use crate::error::Result;
use crate::instruction::Instruction;

/// Serializes the instruction list for inspection or other tooling.
#[derive(Debug, Clone, Default)]
pub struct JsonBackend {
    pub pretty: bool,
}

impl JsonBackend {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Backend for JsonBackend {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, instructions: &[Instruction]) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(instructions)?
        } else {
            serde_json::to_string(instructions)?
        };
        Ok(rendered)
    }
}
