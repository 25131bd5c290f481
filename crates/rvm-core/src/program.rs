//! Program
//!
//! The immutable instruction sequence executed by the VM, plus a structural
//! check that reports problems without executing anything.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bytecode::{Instruction, OpCode};
use crate::error::VmResult;

/// Ordered, immutable instruction sequence indexed by program counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Vec<Instruction>,
}

/// A structural problem found at one instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub pc: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instruction {}: {}", self.pc, self.message)
    }
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program { instructions }
    }

    /// Instruction at `pc`, if within bounds
    pub fn fetch(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Report structural problems: unknown opcodes, missing or malformed
    /// operands, register indices outside `[0, register_count)`, host indices
    /// outside the table and jump targets past the end of the program.
    ///
    /// This is advisory. The VM still runs a program that fails the check and
    /// raises the matching error when it reaches the faulty instruction.
    pub fn check(&self, register_count: usize, host_count: usize) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (pc, instr) in self.instructions.iter().enumerate() {
            let problems = match instr.decode() {
                Ok(op) => self.check_operands(instr, op, register_count, host_count),
                Err(e) => Err(e.to_string()),
            };
            if let Err(message) = problems {
                diagnostics.push(Diagnostic { pc, message });
            }
        }
        diagnostics
    }

    fn check_operands(
        &self,
        instr: &Instruction,
        op: OpCode,
        register_count: usize,
        host_count: usize,
    ) -> Result<(), String> {
        let register = |index: usize| -> Result<(), String> {
            if index < register_count {
                Ok(())
            } else {
                Err(format!("register r{} out of range (0..{})", index, register_count))
            }
        };
        let jump = |target: usize| -> Result<(), String> {
            if target <= self.len() {
                Ok(())
            } else {
                Err(format!("jump target {} past end of program ({})", target, self.len()))
            }
        };
        let text = |r: VmResult<usize>| r.map_err(|e| e.to_string());

        match op {
            OpCode::Store => {
                instr.arg1(op).map_err(|e| e.to_string())?;
                register(text(instr.target_index(op))?)
            }
            OpCode::Set => {
                register(text(instr.arg1_index(op))?)?;
                register(text(instr.target_index(op))?)
            }
            OpCode::Add | OpCode::Equals | OpCode::LessThan | OpCode::LessThanEquals => {
                register(text(instr.arg1_index(op))?)?;
                register(text(instr.arg2_index(op))?)?;
                register(text(instr.target_index(op))?)
            }
            OpCode::Push | OpCode::Print | OpCode::CallFunc => register(text(instr.arg1_index(op))?),
            OpCode::Pop => register(text(instr.target_index(op))?),
            OpCode::Jump => jump(text(instr.target_index(op))?),
            OpCode::JumpIfTrue | OpCode::JumpIfFalse => {
                register(text(instr.arg1_index(op))?)?;
                jump(text(instr.target_index(op))?)
            }
            OpCode::LoadGlobal => {
                let index = text(instr.arg1_index(op))?;
                if index >= host_count {
                    return Err(format!("no host function at table index {}", index));
                }
                register(text(instr.target_index(op))?)
            }
            OpCode::CallMethod => {
                register(text(instr.arg1_index(op))?)?;
                for &arg in &instr.args {
                    register(arg)?;
                }
                match instr.target {
                    Some(target) => register(target),
                    None => Ok(()),
                }
            }
            OpCode::Return | OpCode::Exit => Ok(()),
        }
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Program::new(instructions)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Program::new(iter.into_iter().collect())
    }
}
