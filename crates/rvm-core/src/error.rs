//! RVM Error Types
//!
//! Defines all error conditions produced by the register VM.
//! Every error is terminal for the run that raised it.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VmError {
    // Decode errors
    #[error("unknown opcode: {0}")]
    UnknownOpcode(String),
    #[error("{opcode} is missing its `{field}` operand")]
    MissingOperand {
        opcode: &'static str,
        field: &'static str,
    },
    #[error("{opcode} expects an index in `{field}`, got {found}")]
    InvalidOperand {
        opcode: &'static str,
        field: &'static str,
        found: String,
    },

    // Storage errors
    #[error("register index {index} out of bounds (register file has {len} slots)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("stack underflow")]
    StackUnderflow,
    #[error("invalid frame: cannot truncate data stack of size {size} to {length}")]
    InvalidFrame { length: usize, size: usize },

    // Call errors
    #[error("call stack underflow: RETURN without a saved frame")]
    CallStackUnderflow,
    #[error("call depth exceeded {0}")]
    CallDepthExceeded(usize),
    #[error("register r{0} does not hold a function address")]
    InvalidFunctionAddress(usize),
    #[error("register r{0} does not hold a host function")]
    NotCallable(usize),
    #[error("no host function at table index {0}")]
    UnknownHostFunction(usize),
    #[error("host function `{name}` failed: {message}")]
    Host { name: String, message: String },

    // Value errors
    #[error("{opcode} expected {expected} operands, got {left} and {right}")]
    TypeMismatch {
        opcode: &'static str,
        expected: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    // Run control
    #[error("step limit exceeded: {0}")]
    StepLimitExceeded(u64),

    // Boundary
    #[error("failed to load program: {0}")]
    Load(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for VmError {
    fn from(err: serde_json::Error) -> Self {
        VmError::Load(err.to_string())
    }
}

pub type VmResult<T> = Result<T, VmError>;
