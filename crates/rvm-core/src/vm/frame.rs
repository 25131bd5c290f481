//! Call Frames
//!
//! Saved (return address, frame pointer) pairs for internal subroutine calls.

use crate::error::{VmError, VmResult};

/// State saved by CALL_FUNC and restored by RETURN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Instruction index following the CALL_FUNC
    pub return_pc: usize,
    /// Caller's frame pointer
    pub saved_fp: usize,
}

/// Call stack; its depth is the current subroutine nesting level.
#[derive(Debug, Default, Clone)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> VmResult<Frame> {
        self.frames.pop().ok_or(VmError::CallStackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
