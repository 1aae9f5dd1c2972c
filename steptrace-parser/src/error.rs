// steptrace Parser Error Handling
// Parse errors with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Syntax error: {message}")]
    #[diagnostic(
        code(steptrace::parse::syntax_error),
        help("{expected}")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
        expected: String,
    },

    #[error("Invalid integer literal")]
    #[diagnostic(
        code(steptrace::parse::invalid_integer),
        help("Integer literals must fit in a signed 64-bit integer")
    )]
    InvalidInteger {
        #[source_code]
        src: String,
        #[label("invalid integer")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid float literal")]
    #[diagnostic(
        code(steptrace::parse::invalid_float),
        help("Float literals look like 3.14, .5 or 1.23e-4")
    )]
    InvalidFloat {
        #[source_code]
        src: String,
        #[label("invalid float")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid string escape sequence")]
    #[diagnostic(
        code(steptrace::parse::invalid_string_escape),
        help("Valid escape sequences: \\n, \\t, \\r, \\\\, \\', \\\", \\0, \\xXX")
    )]
    InvalidStringEscape {
        #[source_code]
        src: String,
        #[label("invalid escape sequence")]
        span: SourceSpan,
        found: String,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(steptrace::parse::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule {
        expected: String,
        found: Rule,
        span: crate::ast::Span,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 0),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let (line, column) = match error.line_col {
            pest::error::LineColLocation::Pos(pos) => pos,
            pest::error::LineColLocation::Span(start, _) => start,
        };

        let expected = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let descriptions: Vec<String> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                format!("Expected {}", descriptions.join(", or "))
            }
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
            _ => "Check the syntax near the highlighted location".to_string(),
        };

        ParseError::PestError {
            src,
            span,
            message: format!("unexpected input at line {}, column {}", line, column),
            expected,
        }
    }

    /// Create an invalid integer error
    pub fn invalid_integer(src: String, span: SourceSpan, found: String) -> Self {
        ParseError::InvalidInteger { src, span, found }
    }

    /// Create an invalid float error
    pub fn invalid_float(src: String, span: SourceSpan, found: String) -> Self {
        ParseError::InvalidFloat { src, span, found }
    }

    /// Create an invalid string escape error
    pub fn invalid_string_escape(src: String, span: SourceSpan, found: String) -> Self {
        ParseError::InvalidStringEscape { src, span, found }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> String {
    match rule {
        // Literals
        Rule::integer => "a number (like 42 or 0xFF)".to_string(),
        Rule::float => "a decimal number (like 3.14)".to_string(),
        Rule::string => "a string (like 'hello')".to_string(),
        Rule::constant => "True, False or None".to_string(),
        Rule::list => "a list (like [1, 2, 3])".to_string(),

        // Names
        Rule::identifier => "an identifier (like variable_name)".to_string(),
        Rule::target => "an assignment target".to_string(),

        // Expressions
        Rule::expression | Rule::loop_test => "an expression".to_string(),
        Rule::primary_expr => {
            "a basic expression (literal, identifier, call or parenthesized expression)"
                .to_string()
        }
        Rule::call => "a function call (like f(x))".to_string(),
        Rule::parameters => "a parameter list (like (a, b))".to_string(),

        // Statements
        Rule::function_def => "a function definition (def name(...):)".to_string(),
        Rule::while_stmt => "a while loop (while condition:)".to_string(),
        Rule::assign => "an assignment (x = value)".to_string(),
        Rule::aug_assign => "an augmented assignment (x += value)".to_string(),
        Rule::aug_op => "an augmented assignment operator (like +=)".to_string(),
        Rule::return_stmt => "a return statement".to_string(),
        Rule::pass_stmt => "pass".to_string(),
        Rule::expr_stmt => "an expression statement".to_string(),
        Rule::block => "an indented block".to_string(),

        // Keywords
        Rule::kw_def => "the 'def' keyword".to_string(),
        Rule::kw_while => "the 'while' keyword".to_string(),
        Rule::kw_return => "the 'return' keyword".to_string(),
        Rule::kw_pass => "the 'pass' keyword".to_string(),

        // Operators
        Rule::op_or => "'or'".to_string(),
        Rule::op_and => "'and'".to_string(),
        Rule::op_not => "'not'".to_string(),
        Rule::op_equal => "an equality operator (==)".to_string(),
        Rule::op_not_equal => "a not-equal operator (!=)".to_string(),
        Rule::op_less => "a less-than operator (<)".to_string(),
        Rule::op_less_equal => "a less-than-or-equal operator (<=)".to_string(),
        Rule::op_greater => "a greater-than operator (>)".to_string(),
        Rule::op_greater_equal => "a greater-than-or-equal operator (>=)".to_string(),
        Rule::op_add => "an addition operator (+)".to_string(),
        Rule::op_subtract => "a subtraction operator (-)".to_string(),
        Rule::op_multiply => "a multiplication operator (*)".to_string(),
        Rule::op_divide => "a division operator (/)".to_string(),
        Rule::op_floor_divide => "a floor division operator (//)".to_string(),
        Rule::op_modulo => "a modulo operator (%)".to_string(),
        Rule::op_power => "an exponent operator (**)".to_string(),

        Rule::EOI => "end of input".to_string(),

        // Fallback for unknown rules
        _ => format!("a {:?}", rule).replace('_', " "),
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_program;

    use super::*;

    #[test]
    fn test_syntax_error_reports_position_and_expectation() {
        let err = parse_program("x = = 1").unwrap_err();
        match err {
            ParseError::PestError {
                message, expected, ..
            } => {
                assert!(message.contains("line 1"), "message was: {}", message);
                assert!(expected.starts_with("Expected"), "expected was: {}", expected);
            }
            other => panic!("Expected pest error, got {:?}", other),
        }
    }

    #[test]
    fn test_unindented_block_is_an_error() {
        assert!(parse_program("while x < 1:\nx = 1\n").is_err());
    }
}
