//! Data Stack
//!
//! LIFO storage for call arguments, locals and return values.
//! No execution semantics.

use crate::error::{VmError, VmResult};
use super::value::Value;

/// VM data stack, growable and mutated only at the tail
#[derive(Debug, Default, Clone)]
pub struct DataStack {
    values: Vec<Value>,
}

impl DataStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push value onto stack
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop value from stack
    pub fn pop(&mut self) -> VmResult<Value> {
        self.values.pop().ok_or(VmError::StackUnderflow)
    }

    /// Discard every element above `length`
    pub fn truncate(&mut self, length: usize) -> VmResult<()> {
        if length > self.values.len() {
            return Err(VmError::InvalidFrame {
                length,
                size: self.values.len(),
            });
        }
        self.values.truncate(length);
        Ok(())
    }

    /// Get current stack size
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom-to-top view
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}
