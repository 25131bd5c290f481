//! Scripted input for deterministic runs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rvm_core::error::{VmError, VmResult};
use rvm_core::host::HostFunction;
use rvm_core::Value;

/// Prompt replacement that answers from a fixed list of responses.
///
/// Clones share the same script and prompt log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    responses: Rc<RefCell<VecDeque<Value>>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedInput {
    pub fn new<I, V>(responses: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ScriptedInput {
            responses: Rc::new(RefCell::new(responses.into_iter().map(Into::into).collect())),
            prompts: Rc::default(),
        }
    }

    /// Prompt texts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl HostFunction for ScriptedInput {
    fn name(&self) -> &str {
        "prompt"
    }

    fn call(&mut self, args: &[Value]) -> VmResult<Option<Value>> {
        if let Some(message) = args.first() {
            self.prompts.borrow_mut().push(message.to_string());
        }
        match self.responses.borrow_mut().pop_front() {
            Some(value) => Ok(Some(value)),
            None => Err(VmError::Host {
                name: "prompt".to_string(),
                message: "script exhausted".to_string(),
            }),
        }
    }
}
