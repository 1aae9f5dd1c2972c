//! Tracer acceptance tests
//!
//! Each test parses a complete program, runs it through the tracer and checks
//! the exact report written to the output sink.

pub mod test_tracer_statements;

use crate::{TraceConfig, TraceError, trace_program};
use steptrace_parser::parse_program;

/// Trace `source` with default limits and return the report
pub fn trace(source: &str) -> String {
    let (output, result) = trace_with(source, TraceConfig::default());
    if let Err(e) = result {
        panic!("trace failed: {:?}\noutput so far:\n{}", e, output);
    }
    output
}

/// Trace `source`, returning whatever was written along with the outcome
pub fn trace_with(source: &str, config: TraceConfig) -> (String, Result<(), TraceError>) {
    let program = parse_program(source).unwrap();
    let mut out = Vec::new();
    let result = trace_program(&program, &mut out, config);
    (String::from_utf8(out).unwrap(), result)
}
