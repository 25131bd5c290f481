//! Host Function Table
//!
//! Fixed mapping from small indices to host capabilities, built once at
//! construction and indexed from 0.

use std::fmt;

use tracing::debug;

use crate::error::{VmError, VmResult};
use crate::vm::value::Value;
use super::function::{HostFunction, HostRef};

#[derive(Default)]
pub struct HostTable {
    entries: Vec<Box<dyn HostFunction>>,
}

impl HostTable {
    /// Empty table; LOAD_GLOBAL on it always fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`HostTable::register`]
    pub fn with(mut self, function: impl HostFunction + 'static) -> Self {
        self.register(function);
        self
    }

    /// Append a host function, returning its handle
    pub fn register(&mut self, function: impl HostFunction + 'static) -> HostRef {
        self.entries.push(Box::new(function));
        HostRef::new(self.entries.len() - 1)
    }

    /// Resolve a table index to a handle
    pub fn resolve(&self, index: usize) -> VmResult<HostRef> {
        if index < self.entries.len() {
            Ok(HostRef::new(index))
        } else {
            Err(VmError::UnknownHostFunction(index))
        }
    }

    pub fn name(&self, host: HostRef) -> Option<&str> {
        self.entries.get(host.index()).map(|f| f.name())
    }

    /// Invoke a host function synchronously
    pub fn invoke(&mut self, host: HostRef, args: &[Value]) -> VmResult<Option<Value>> {
        let function = self
            .entries
            .get_mut(host.index())
            .ok_or(VmError::UnknownHostFunction(host.index()))?;
        debug!(host = function.name(), argc = args.len(), "host call");
        function.call(args)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for HostTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.name()))
            .finish()
    }
}
