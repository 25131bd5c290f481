//! RVM host crate: host capabilities for the register VM
//!
//! Concrete implementations of the host functions programs reach through
//! LOAD_GLOBAL / CALL_METHOD. The core never depends on this crate; callers
//! build a table here and hand it to the VM.

pub mod console;
pub mod scripted;

use std::io::{self, BufRead, Write};

use rvm_core::host::{HostFunction, HostTable, OutputSink, StdoutSink};
use rvm_core::samples::{HOST_PRINT, HOST_PROMPT};

pub use console::{parse_input, PrintLine, Prompt};
pub use scripted::ScriptedInput;

/// Table with the input function at slot 0 and the printer at slot 1, the
/// layout the bundled sample programs expect.
pub fn standard_table(
    input: impl HostFunction + 'static,
    output: impl OutputSink + 'static,
) -> HostTable {
    let mut table = HostTable::new();
    let prompt = table.register(input);
    let print = table.register(PrintLine::new(output));
    debug_assert_eq!(prompt.index(), HOST_PROMPT);
    debug_assert_eq!(print.index(), HOST_PRINT);
    table
}

/// Interactive table reading from `input` and echoing prompts to `echo`
pub fn console_table<R, W>(input: R, echo: W, output: impl OutputSink + 'static) -> HostTable
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    standard_table(Prompt::new(input, echo), output)
}

/// Interactive table on the process stdin / stdout
pub fn stdio_table() -> HostTable {
    console_table(io::BufReader::new(io::stdin()), io::stdout(), StdoutSink)
}
