//! Instruction Representation
//!
//! Defines the instruction record consumed by the VM and its at-rest shape.
//! This layer contains no execution semantics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::opcode::OpCode;
use crate::error::{VmError, VmResult};
use crate::vm::value::Value;

/// Literal operand carried by `arg1` / `arg2`.
///
/// Depending on the opcode this is a literal (STORE), a register index or a
/// host table index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Int(i64),
    Bool(bool),
    Text(String),
    Address { addr: usize },
}

impl Operand {
    pub fn address(addr: usize) -> Self {
        Operand::Address { addr }
    }

    /// Interpret the operand as an index (register or host table slot)
    pub fn as_index(&self, opcode: OpCode, field: &'static str) -> VmResult<usize> {
        match self {
            Operand::Int(n) if *n >= 0 => Ok(*n as usize),
            other => Err(VmError::InvalidOperand {
                opcode: opcode.mnemonic(),
                field,
                found: other.to_string(),
            }),
        }
    }

    /// Interpret the operand as a literal value
    pub fn to_value(&self) -> Value {
        match self {
            Operand::Int(n) => Value::Number(*n),
            Operand::Bool(b) => Value::Boolean(*b),
            Operand::Text(s) => Value::Text(s.clone()),
            Operand::Address { addr } => Value::Address(*addr),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(n) => write!(f, "{}", n),
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::Text(s) => write!(f, "{:?}", s),
            Operand::Address { addr } => write!(f, "@{}", addr),
        }
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Int(n)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Int(n.into())
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

/// A single instruction record.
///
/// The opcode stays an undecoded mnemonic until the dispatcher reaches it,
/// so a program containing an unknown tag still runs up to that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub opcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg1: Option<Operand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg2: Option<Operand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<usize>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub arg_count: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

fn reg(index: usize) -> Option<Operand> {
    Some(Operand::Int(index as i64))
}

impl Instruction {
    /// Create an instruction with only an opcode tag
    pub fn new(opcode: OpCode) -> Self {
        Self::raw(opcode.mnemonic())
    }

    /// Create an instruction from an arbitrary tag, known or not
    pub fn raw(tag: impl Into<String>) -> Self {
        Instruction {
            opcode: tag.into(),
            arg1: None,
            arg2: None,
            target: None,
            args: Vec::new(),
            arg_count: 0,
        }
    }

    /// Decode the opcode tag
    pub fn decode(&self) -> VmResult<OpCode> {
        OpCode::from_mnemonic(&self.opcode).ok_or_else(|| VmError::UnknownOpcode(self.opcode.clone()))
    }

    pub fn store(literal: impl Into<Operand>, target: usize) -> Self {
        Instruction {
            arg1: Some(literal.into()),
            target: Some(target),
            ..Self::new(OpCode::Store)
        }
    }

    pub fn set(source: usize, target: usize) -> Self {
        Instruction {
            arg1: reg(source),
            target: Some(target),
            ..Self::new(OpCode::Set)
        }
    }

    fn binary(opcode: OpCode, lhs: usize, rhs: usize, target: usize) -> Self {
        Instruction {
            arg1: reg(lhs),
            arg2: reg(rhs),
            target: Some(target),
            ..Self::new(opcode)
        }
    }

    pub fn add(lhs: usize, rhs: usize, target: usize) -> Self {
        Self::binary(OpCode::Add, lhs, rhs, target)
    }

    pub fn equals(lhs: usize, rhs: usize, target: usize) -> Self {
        Self::binary(OpCode::Equals, lhs, rhs, target)
    }

    pub fn less_than(lhs: usize, rhs: usize, target: usize) -> Self {
        Self::binary(OpCode::LessThan, lhs, rhs, target)
    }

    pub fn less_than_equals(lhs: usize, rhs: usize, target: usize) -> Self {
        Self::binary(OpCode::LessThanEquals, lhs, rhs, target)
    }

    pub fn push(source: usize) -> Self {
        Instruction {
            arg1: reg(source),
            ..Self::new(OpCode::Push)
        }
    }

    pub fn pop(target: usize) -> Self {
        Instruction {
            target: Some(target),
            ..Self::new(OpCode::Pop)
        }
    }

    pub fn jump(target: usize) -> Self {
        Instruction {
            target: Some(target),
            ..Self::new(OpCode::Jump)
        }
    }

    pub fn jump_if_true(condition: usize, target: usize) -> Self {
        Instruction {
            arg1: reg(condition),
            target: Some(target),
            ..Self::new(OpCode::JumpIfTrue)
        }
    }

    pub fn jump_if_false(condition: usize, target: usize) -> Self {
        Instruction {
            arg1: reg(condition),
            target: Some(target),
            ..Self::new(OpCode::JumpIfFalse)
        }
    }

    pub fn call_func(address_register: usize, arg_count: usize) -> Self {
        Instruction {
            arg1: reg(address_register),
            arg_count,
            ..Self::new(OpCode::CallFunc)
        }
    }

    pub fn ret() -> Self {
        Self::new(OpCode::Return)
    }

    pub fn load_global(index: usize, target: usize) -> Self {
        Instruction {
            arg1: reg(index),
            target: Some(target),
            ..Self::new(OpCode::LoadGlobal)
        }
    }

    pub fn call_method(function_register: usize, args: Vec<usize>, target: Option<usize>) -> Self {
        Instruction {
            arg1: reg(function_register),
            args,
            target,
            ..Self::new(OpCode::CallMethod)
        }
    }

    pub fn print(source: usize) -> Self {
        Instruction {
            arg1: reg(source),
            ..Self::new(OpCode::Print)
        }
    }

    pub fn exit() -> Self {
        Self::new(OpCode::Exit)
    }
}

// Operand accessors. Each fails with `MissingOperand` when the field is absent.
impl Instruction {
    pub fn arg1(&self, opcode: OpCode) -> VmResult<&Operand> {
        self.arg1.as_ref().ok_or(VmError::MissingOperand {
            opcode: opcode.mnemonic(),
            field: "arg1",
        })
    }

    pub fn arg1_index(&self, opcode: OpCode) -> VmResult<usize> {
        self.arg1(opcode)?.as_index(opcode, "arg1")
    }

    pub fn arg2_index(&self, opcode: OpCode) -> VmResult<usize> {
        self.arg2
            .as_ref()
            .ok_or(VmError::MissingOperand {
                opcode: opcode.mnemonic(),
                field: "arg2",
            })?
            .as_index(opcode, "arg2")
    }

    pub fn target_index(&self, opcode: OpCode) -> VmResult<usize> {
        self.target.ok_or(VmError::MissingOperand {
            opcode: opcode.mnemonic(),
            field: "target",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_reads_camel_case_arg_count() {
        let json = r#"{ "opcode": "CALL_FUNC", "arg1": 9, "argCount": 2 }"#;
        let instr: Instruction = serde_json::from_str(json).expect("parse failed");
        assert_eq!(instr, Instruction::call_func(9, 2));
    }

    #[test]
    fn literal_operands_keep_their_kind() {
        let json = r#"[
            { "opcode": "STORE", "arg1": "Enter a number: ", "target": 6 },
            { "opcode": "STORE", "arg1": true, "target": 1 },
            { "opcode": "STORE", "arg1": { "addr": 17 }, "target": 9 }
        ]"#;
        let instrs: Vec<Instruction> = serde_json::from_str(json).expect("parse failed");
        assert_eq!(instrs[0].arg1, Some(Operand::Text("Enter a number: ".into())));
        assert_eq!(instrs[1].arg1, Some(Operand::Bool(true)));
        assert_eq!(instrs[2].arg1, Some(Operand::address(17)));
    }

    #[test]
    fn negative_index_is_invalid_operand() {
        let err = Operand::Int(-1).as_index(OpCode::Push, "arg1").unwrap_err();
        assert!(matches!(err, VmError::InvalidOperand { field: "arg1", .. }));
        assert!(Operand::Text("r0".into()).as_index(OpCode::Push, "arg1").is_err());
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let json = serde_json::to_string(&Instruction::exit()).expect("serialize failed");
        assert_eq!(json, r#"{"opcode":"EXIT"}"#);
    }
}
