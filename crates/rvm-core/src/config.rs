//! RVM Configuration
//!
//! Defines runtime limits for the register VM.
//! Configuration specifies constraints only; enforcement is handled by the VM.

use serde::{Deserialize, Serialize};

/// Number of registers in the default register file
pub const DEFAULT_REGISTER_COUNT: usize = 12;

/// VM Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    /// Number of register slots
    pub register_count: usize,

    /// Maximum subroutine nesting (unlimited when `None`)
    pub max_call_depth: Option<usize>,

    /// Maximum number of executed instructions per run (unlimited when `None`)
    pub max_steps: Option<u64>,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            register_count: DEFAULT_REGISTER_COUNT,
            max_call_depth: None,
            max_steps: None,
        }
    }
}

impl VmConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }
}
