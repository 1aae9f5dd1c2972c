// steptrace Parser Library
// Pest-based parser, display tree and source regeneration for a Python subset

pub mod ast;
pub mod display;
pub mod error;
pub mod parser;
pub mod repr;
pub mod tree;

pub use ast::*;
pub use display::{build_display_tree, render_tree, write_tree, DisplayNode};
pub use error::*;
pub use parser::PythonParser;
pub use tree::SyntaxNode;

// Re-export parser rule for manual testing
pub use parser::Rule;

// Main parsing functions
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    parser::PythonParser::parse_program(input)
}

pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    parser::PythonParser::parse_expression(input)
}

#[cfg(test)]
mod tests;
