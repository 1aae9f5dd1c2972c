//! Run configuration for the interpreter and tracer.

/// Default bound on nested user function calls
pub const DEFAULT_RECURSION_LIMIT: usize = 1000;

/// Limits applied to one traced run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    /// Maximum depth of nested user function calls
    pub recursion_limit: usize,
    /// Maximum number of work-queue items processed, if bounded
    pub max_steps: Option<usize>,
}

impl TraceConfig {
    pub fn with_recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = recursion_limit;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            max_steps: None,
        }
    }
}
