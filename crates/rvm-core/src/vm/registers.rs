//! Register File
//!
//! Fixed-size indexable storage for the VM's working values.

use crate::bytecode::OpCode;
use crate::error::{VmError, VmResult};
use super::value::Value;

/// Register file holding the VM's working values.
///
/// Every slot starts as `Number(0)`. The length never changes after
/// construction.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: Vec<Value>,
}

impl RegisterFile {
    /// Creates a register file with `count` slots
    pub fn new(count: usize) -> Self {
        RegisterFile {
            regs: vec![Value::default(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Returns a reference to the value in register `index`.
    ///
    /// Returns [`VmError::IndexOutOfBounds`] if `index` is out of range.
    pub fn get(&self, index: usize) -> VmResult<&Value> {
        self.regs.get(index).ok_or(VmError::IndexOutOfBounds {
            index,
            len: self.regs.len(),
        })
    }

    /// Stores a value into register `index`.
    ///
    /// Returns [`VmError::IndexOutOfBounds`] if `index` is out of range.
    pub fn set(&mut self, index: usize, value: Value) -> VmResult<()> {
        let len = self.regs.len();
        let slot = self
            .regs
            .get_mut(index)
            .ok_or(VmError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Fails with [`VmError::IndexOutOfBounds`] unless `index` names a slot
    pub fn check(&self, index: usize) -> VmResult<()> {
        self.get(index).map(|_| ())
    }

    /// Reads two Number operands for a binary opcode.
    ///
    /// Returns [`VmError::TypeMismatch`] unless both registers hold numbers.
    pub fn numbers(&self, lhs: usize, rhs: usize, opcode: OpCode) -> VmResult<(i64, i64)> {
        match (self.get(lhs)?, self.get(rhs)?) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            (a, b) => Err(VmError::TypeMismatch {
                opcode: opcode.mnemonic(),
                expected: "Number",
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }

    /// Copy of every slot, lowest index first
    pub fn snapshot(&self) -> Vec<Value> {
        self.regs.clone()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.regs
    }
}
