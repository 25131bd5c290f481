//! Program Loader
//!
//! Loads programs stored as JSON arrays of instruction records.
//! The plain path only parses; the checked path also runs the structural
//! check and rejects any program with diagnostics.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{VmError, VmResult};
use crate::program::Program;

pub struct ProgramLoader;

impl ProgramLoader {
    /// Parse a program from JSON text. Unknown opcodes are kept and only
    /// fail when executed.
    pub fn parse(text: &str) -> VmResult<Program> {
        let program: Program = serde_json::from_str(text)?;
        debug!(instructions = program.len(), "program parsed");
        Ok(program)
    }

    /// Parse, then reject the program if the structural check reports anything
    pub fn parse_checked(text: &str, register_count: usize, host_count: usize) -> VmResult<Program> {
        let program = Self::parse(text)?;
        let diagnostics = program.check(register_count, host_count);
        if let Some(first) = diagnostics.first() {
            return Err(VmError::Load(format!(
                "{} ({} problem(s) in total)",
                first,
                diagnostics.len()
            )));
        }
        Ok(program)
    }

    /// Read and parse a program file
    pub fn load(path: &Path) -> VmResult<Program> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Serialize a program in the same format `parse` reads
    pub fn to_json(program: &Program) -> VmResult<String> {
        Ok(serde_json::to_string_pretty(program)?)
    }
}
