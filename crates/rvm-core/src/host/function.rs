//! Host function identifiers and the invocation contract.

use serde::{Deserialize, Serialize};

use crate::error::VmResult;
use crate::vm::value::Value;

/// Opaque handle to a host table entry (explicitly small and stable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostRef(usize);

impl HostRef {
    pub fn new(index: usize) -> Self {
        HostRef(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A capability supplied by the host.
///
/// The VM never inspects the implementation; it passes positional values and
/// accepts at most one value back. Implementations may block on external I/O
/// but cannot reach VM state.
pub trait HostFunction {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    fn call(&mut self, args: &[Value]) -> VmResult<Option<Value>>;
}

/// Host function backed by a closure
pub struct FnHost<F> {
    name: String,
    func: F,
}

impl<F> HostFunction for FnHost<F>
where
    F: FnMut(&[Value]) -> VmResult<Option<Value>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&mut self, args: &[Value]) -> VmResult<Option<Value>> {
        (self.func)(args)
    }
}

/// Wrap a closure as a named host function
pub fn host_fn<F>(name: impl Into<String>, func: F) -> FnHost<F>
where
    F: FnMut(&[Value]) -> VmResult<Option<Value>>,
{
    FnHost {
        name: name.into(),
        func,
    }
}
