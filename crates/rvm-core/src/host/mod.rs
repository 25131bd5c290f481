//! Host Integration
//!
//! The VM reaches the outside world only through what is injected here: a
//! table of host functions and an output sink for PRINT.

pub mod function;
pub mod output;
pub mod table;

pub use function::{host_fn, FnHost, HostFunction, HostRef};
pub use output::{OutputSink, StdoutSink, Transcript};
pub use table::HostTable;
