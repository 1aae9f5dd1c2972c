// Literal parsing functions for the steptrace parser
// Handles integer, float, string and constant literals

use super::{PythonParser, Rule};
use crate::ast::*;
use crate::error::*;

impl PythonParser {
    /// Parse an integer literal from a Pest pair
    pub(super) fn parse_integer(pair: pest::iterators::Pair<Rule>) -> ParseResult<NumericLiteral> {
        let span = Self::span_from_pair(&pair);
        let invalid = || {
            ParseError::invalid_integer(
                pair.as_span().get_input().to_string(),
                Self::source_span(&span),
                pair.as_str().to_string(),
            )
        };

        let inner = pair.clone().into_inner().next().unwrap();
        let text = inner.as_str();

        let value = match inner.as_rule() {
            Rule::integer_decimal => text.parse::<i64>().map_err(|_| invalid())?,
            // Remove the "0x" / "0o" / "0b" prefix
            Rule::integer_hexadecimal => {
                i64::from_str_radix(&text[2..], 16).map_err(|_| invalid())?
            }
            Rule::integer_octal => i64::from_str_radix(&text[2..], 8).map_err(|_| invalid())?,
            Rule::integer_binary => i64::from_str_radix(&text[2..], 2).map_err(|_| invalid())?,
            _ => unreachable!("Invalid integer rule"),
        };

        Ok(NumericLiteral {
            value: Number::Integer(value),
            span,
        })
    }

    /// Parse a float literal from a Pest pair
    pub(super) fn parse_float(pair: pest::iterators::Pair<Rule>) -> ParseResult<NumericLiteral> {
        let span = Self::span_from_pair(&pair);
        let text = pair.as_str();

        let value = text.parse::<f64>().map_err(|_| {
            ParseError::invalid_float(
                pair.as_span().get_input().to_string(),
                Self::source_span(&span),
                text.to_string(),
            )
        })?;

        Ok(NumericLiteral {
            value: Number::Float(value),
            span,
        })
    }

    /// Parse a string literal from a Pest pair
    pub(super) fn parse_string(pair: pest::iterators::Pair<Rule>) -> ParseResult<StringLiteral> {
        let span = Self::span_from_pair(&pair);
        let source = pair.as_span().get_input();

        // Single- and double-quoted strings share the same escapes
        let content = pair.clone().into_inner().next().unwrap();
        let value = Self::process_escape_sequences(content.as_str()).map_err(|found| {
            ParseError::invalid_string_escape(
                source.to_string(),
                Self::source_span(&span),
                found,
            )
        })?;

        Ok(StringLiteral { value, span })
    }

    /// Process escape sequences in strings
    ///
    /// On failure returns the offending escape sequence.
    pub(super) fn process_escape_sequences(input: &str) -> Result<String, String> {
        let mut result = String::new();
        let mut chars = input.chars();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                result.push(ch);
                continue;
            }

            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('0') => result.push('\0'),
                Some('\\') => result.push('\\'),
                Some('\'') => result.push('\''),
                Some('"') => result.push('"'),
                Some('x') => {
                    // Hex escape sequence: \xXX
                    let hex_digits: String = chars.by_ref().take(2).collect();
                    let code_point = u8::from_str_radix(&hex_digits, 16)
                        .ok()
                        .filter(|_| hex_digits.len() == 2)
                        .ok_or_else(|| format!("\\x{}", hex_digits))?;
                    result.push(char::from(code_point));
                }
                Some(other) => return Err(format!("\\{}", other)),
                None => return Err("\\".to_string()),
            }
        }

        Ok(result)
    }

    /// Parse `True`, `False` or `None`
    pub(super) fn parse_constant(pair: pest::iterators::Pair<Rule>) -> Constant {
        match pair.as_str() {
            "True" => Constant::True,
            "False" => Constant::False,
            "None" => Constant::None,
            _ => unreachable!("Invalid constant"),
        }
    }
}
