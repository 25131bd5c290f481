//! RVM - Core Library
//!
//! Register virtual machine with a data stack, a call stack with frame
//! pointers, and a host function table. Public API surface for the core.

pub mod bytecode;
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod program;
pub mod samples;
pub mod vm;

// Re-export commonly used types
pub use bytecode::{Instruction, OpCode, Operand};
pub use config::VmConfig;
pub use error::{VmError, VmResult};
pub use host::{host_fn, HostFunction, HostRef, HostTable, OutputSink, Transcript};
pub use loader::ProgramLoader;
pub use program::{Diagnostic, Program};
pub use vm::{HaltReason, RunReport, Value, VirtualMachine, VmState};
