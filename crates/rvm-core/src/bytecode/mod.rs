pub mod instruction;
pub mod opcode;

pub use instruction::{Instruction, Operand};
pub use opcode::OpCode;
