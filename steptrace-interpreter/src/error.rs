//! Runtime error types for the steptrace interpreter.
//!
//! Errors render as miette diagnostics; spans are attached by the evaluator
//! when the failing node is known.

use miette::{Diagnostic, SourceSpan};
use steptrace_parser::Span;
use thiserror::Error;

/// Runtime errors that can occur during interpretation
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Type error: expected {expected}, found {found}")]
    #[diagnostic(
        code(steptrace::runtime::type_error),
        help("Check that the value has the expected type")
    )]
    TypeError {
        expected: String,
        found: String,
        #[label("type mismatch here")]
        span: Option<SourceSpan>,
    },

    #[error("Undefined variable: name '{name}' is not defined")]
    #[diagnostic(
        code(steptrace::runtime::undefined_variable),
        help("Make sure the variable is assigned before use")
    )]
    UndefinedVariable {
        name: String,
        #[label("undefined variable")]
        span: Option<SourceSpan>,
    },

    #[error("Wrong arity: {function}() takes {expected} arguments but {found} were given")]
    #[diagnostic(
        code(steptrace::runtime::wrong_arity),
        help("Check the function signature for the correct number of arguments")
    )]
    WrongArity {
        function: String,
        expected: String,
        found: usize,
        #[label("wrong number of arguments")]
        span: Option<SourceSpan>,
    },

    #[error("Division by zero")]
    #[diagnostic(
        code(steptrace::runtime::division_by_zero),
        help("Ensure the divisor is not zero before division")
    )]
    DivisionByZero {
        #[label("division by zero here")]
        span: Option<SourceSpan>,
    },

    #[error("Invalid operation: unsupported operand type(s) for {operation}: {operand_types}")]
    #[diagnostic(
        code(steptrace::runtime::invalid_operation),
        help("Check that the operation is supported for these types")
    )]
    InvalidOperation {
        operation: String,
        operand_types: String, // Quoted type names joined with " and "
        #[label("invalid operation")]
        span: Option<SourceSpan>,
    },

    #[error("Integer overflow in {operation}")]
    #[diagnostic(
        code(steptrace::runtime::overflow),
        help("Integers are limited to signed 64 bits")
    )]
    Overflow {
        operation: String,
        #[label("result does not fit in 64 bits")]
        span: Option<SourceSpan>,
    },

    #[error("Maximum recursion depth of {limit} exceeded")]
    #[diagnostic(
        code(steptrace::runtime::recursion_limit),
        help("Raise the limit with --recursion-limit or add a base case")
    )]
    RecursionLimit {
        limit: usize,
        #[label("call exceeds the recursion limit")]
        span: Option<SourceSpan>,
    },

    #[error("'{type_name}' object is not callable")]
    #[diagnostic(
        code(steptrace::runtime::not_callable),
        help("Only functions defined with `def` and builtins can be called")
    )]
    NotCallable {
        type_name: String,
        #[label("not a function")]
        span: Option<SourceSpan>,
    },

    #[error("Step limit of {limit} exceeded")]
    #[diagnostic(
        code(steptrace::runtime::step_limit),
        help("The loop may never terminate; raise the limit with --max-steps")
    )]
    StepLimit { limit: usize },

    #[error("Cannot compute a loop quantity for a {found} operand")]
    #[diagnostic(
        code(steptrace::runtime::undefined_quantity),
        help("Every operand of a boolean loop test must be a comparison")
    )]
    UndefinedQuantity {
        found: String,
        #[label("not a comparison")]
        span: Option<SourceSpan>,
    },

    #[error("{message}")]
    #[diagnostic(code(steptrace::runtime::custom_error))]
    Custom {
        message: String,
        #[label("error occurred here")]
        span: Option<SourceSpan>,
    },
}

impl RuntimeError {
    /// Create a type error
    pub fn type_error(expected: &str, found: &str) -> Self {
        Self::TypeError {
            expected: expected.to_string(),
            found: found.to_string(),
            span: None,
        }
    }

    /// Create an undefined variable error
    pub fn undefined_variable(name: String) -> Self {
        Self::UndefinedVariable { name, span: None }
    }

    /// Create a wrong arity error
    pub fn wrong_arity(function: &str, expected: impl ToString, found: usize) -> Self {
        Self::WrongArity {
            function: function.to_string(),
            expected: expected.to_string(),
            found,
            span: None,
        }
    }

    /// Create a division by zero error
    pub fn division_by_zero() -> Self {
        Self::DivisionByZero { span: None }
    }

    /// Create an invalid operation error from the operand type names
    pub fn invalid_operation(operation: &str, operand_types: Vec<&str>) -> Self {
        let quoted: Vec<String> = operand_types.iter().map(|t| format!("'{}'", t)).collect();
        Self::InvalidOperation {
            operation: operation.to_string(),
            operand_types: quoted.join(" and "),
            span: None,
        }
    }

    /// Create an integer overflow error
    pub fn overflow(operation: &str) -> Self {
        Self::Overflow {
            operation: operation.to_string(),
            span: None,
        }
    }

    /// Create a recursion limit error
    pub fn recursion_limit(limit: usize) -> Self {
        Self::RecursionLimit { limit, span: None }
    }

    /// Create a not-callable error
    pub fn not_callable(type_name: &str) -> Self {
        Self::NotCallable {
            type_name: type_name.to_string(),
            span: None,
        }
    }

    /// Create an undefined quantity error
    pub fn undefined_quantity(found: &str) -> Self {
        Self::UndefinedQuantity {
            found: found.to_string(),
            span: None,
        }
    }

    /// Create a custom error
    pub fn custom(message: String) -> Self {
        Self::Custom {
            message,
            span: None,
        }
    }

    /// Attach a span unless the error already carries a more precise one
    pub fn with_span(mut self, span: &Span) -> Self {
        if let Some(slot) = self.span_slot() {
            if slot.is_none() {
                *slot = Some(span_to_source_span(span));
            }
        }
        self
    }

    fn span_slot(&mut self) -> Option<&mut Option<SourceSpan>> {
        match self {
            Self::TypeError { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::WrongArity { span, .. }
            | Self::DivisionByZero { span }
            | Self::InvalidOperation { span, .. }
            | Self::Overflow { span, .. }
            | Self::RecursionLimit { span, .. }
            | Self::NotCallable { span, .. }
            | Self::UndefinedQuantity { span, .. }
            | Self::Custom { span, .. } => Some(span),
            Self::StepLimit { .. } => None,
        }
    }
}

/// Convert parser Span to miette SourceSpan
fn span_to_source_span(span: &Span) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.end - span.start)
}

/// Type alias for interpreter results
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Failure of a traced run: evaluation errors or a broken output sink
#[derive(Error, Diagnostic, Debug)]
pub enum TraceError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Failed to write trace output")]
    #[diagnostic(code(steptrace::trace::io))]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_span_keeps_existing_span() {
        let inner = Span::new(4, 5);
        let outer = Span::new(0, 10);

        let err = RuntimeError::division_by_zero()
            .with_span(&inner)
            .with_span(&outer);

        assert_eq!(
            err,
            RuntimeError::DivisionByZero {
                span: Some(SourceSpan::new(4.into(), 1))
            }
        );
    }

    #[test]
    fn test_invalid_operation_message() {
        let err = RuntimeError::invalid_operation("+", vec!["int", "str"]);
        assert_eq!(
            err.to_string(),
            "Invalid operation: unsupported operand type(s) for +: 'int' and 'str'"
        );
    }
}
