//! Output sinks for PRINT and print-like host functions.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::error::VmResult;

/// Destination for the textual output of a run
pub trait OutputSink {
    fn write_line(&mut self, line: &str) -> VmResult<()>;
}

/// Writes each line to the process stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> VmResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)?;
        Ok(())
    }
}

/// In-memory line buffer. Clones share the same buffer, so one handle can be
/// given to the VM and another kept to read the output back.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl OutputSink for Transcript {
    fn write_line(&mut self, line: &str) -> VmResult<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}
