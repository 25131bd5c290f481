//! Opcode Definitions
//!
//! Defines the closed opcode set of the register VM.
//! This file contains no execution semantics.

use std::fmt;

/// Instruction opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // Register moves
    Store,
    Set,

    // Arithmetic
    Add,

    // Comparison
    Equals,
    LessThan,
    LessThanEquals,

    // Data stack
    Push,
    Pop,

    // Control flow
    Jump,
    JumpIfTrue,
    JumpIfFalse,
    CallFunc,
    Return,

    // Host
    LoadGlobal,
    CallMethod,
    Print,

    // System
    Exit,
}

impl OpCode {
    /// Every opcode, in declaration order
    pub const ALL: [OpCode; 17] = [
        OpCode::Store,
        OpCode::Set,
        OpCode::Add,
        OpCode::Equals,
        OpCode::LessThan,
        OpCode::LessThanEquals,
        OpCode::Push,
        OpCode::Pop,
        OpCode::Jump,
        OpCode::JumpIfTrue,
        OpCode::JumpIfFalse,
        OpCode::CallFunc,
        OpCode::Return,
        OpCode::LoadGlobal,
        OpCode::CallMethod,
        OpCode::Print,
        OpCode::Exit,
    ];

    /// Decode a mnemonic tag
    pub fn from_mnemonic(tag: &str) -> Option<Self> {
        match tag {
            "STORE" => Some(OpCode::Store),
            "SET" => Some(OpCode::Set),

            "ADD" => Some(OpCode::Add),

            "EQUALS" => Some(OpCode::Equals),
            "LESS_THAN" => Some(OpCode::LessThan),
            "LESS_THAN_EQUALS" => Some(OpCode::LessThanEquals),

            "PUSH" => Some(OpCode::Push),
            "POP" => Some(OpCode::Pop),

            "JUMP" => Some(OpCode::Jump),
            "JUMP_IF_TRUE" => Some(OpCode::JumpIfTrue),
            "JUMP_IF_FALSE" => Some(OpCode::JumpIfFalse),
            "CALL_FUNC" => Some(OpCode::CallFunc),
            "RETURN" => Some(OpCode::Return),

            "LOAD_GLOBAL" => Some(OpCode::LoadGlobal),
            "CALL_METHOD" => Some(OpCode::CallMethod),
            "PRINT" => Some(OpCode::Print),

            "EXIT" => Some(OpCode::Exit),

            _ => None,
        }
    }

    /// Mnemonic tag as it appears in program files
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Store => "STORE",
            OpCode::Set => "SET",
            OpCode::Add => "ADD",
            OpCode::Equals => "EQUALS",
            OpCode::LessThan => "LESS_THAN",
            OpCode::LessThanEquals => "LESS_THAN_EQUALS",
            OpCode::Push => "PUSH",
            OpCode::Pop => "POP",
            OpCode::Jump => "JUMP",
            OpCode::JumpIfTrue => "JUMP_IF_TRUE",
            OpCode::JumpIfFalse => "JUMP_IF_FALSE",
            OpCode::CallFunc => "CALL_FUNC",
            OpCode::Return => "RETURN",
            OpCode::LoadGlobal => "LOAD_GLOBAL",
            OpCode::CallMethod => "CALL_METHOD",
            OpCode::Print => "PRINT",
            OpCode::Exit => "EXIT",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics_decode_to_themselves() {
        for op in OpCode::ALL {
            assert_eq!(OpCode::from_mnemonic(op.mnemonic()), Some(op));
        }
    }

    #[test]
    fn unknown_and_lowercase_tags_are_rejected() {
        assert_eq!(OpCode::from_mnemonic("CALL"), None);
        assert_eq!(OpCode::from_mnemonic("store"), None);
        assert_eq!(OpCode::from_mnemonic(""), None);
    }
}
