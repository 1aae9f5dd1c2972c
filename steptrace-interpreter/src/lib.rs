//! steptrace interpreter
//!
//! Evaluates the restricted Python subset parsed by `steptrace-parser` and
//! traces module-level execution one statement at a time:
//! - `Interpreter` walks the syntax tree with Python semantics
//! - `Tracer` drives the work queue and writes the per-statement report
//! - `Environment` keeps the insertion-ordered variable mapping

// Allow clippy lints for development
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::result_large_err)]

pub mod builtins;
pub mod config;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod stack;
pub mod tracer;
pub mod value;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use config::{DEFAULT_RECURSION_LIMIT, TraceConfig};
pub use environment::Environment;
pub use error::{Result, RuntimeError, TraceError};
pub use interpreter::Interpreter;
pub use tracer::{Tracer, WorkItem, test_variables, trace_program};
pub use value::Value;

