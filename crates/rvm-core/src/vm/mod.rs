pub mod frame;
pub mod registers;
pub mod stack;
pub mod value;
pub mod vm;

pub use frame::{CallStack, Frame};
pub use registers::RegisterFile;
pub use stack::DataStack;
pub use value::Value;
pub use vm::{HaltReason, RunReport, VirtualMachine, VmState};
