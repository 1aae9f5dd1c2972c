// Control flow parsing module
// Handles while loops and return statements

use crate::ast::*;
use crate::error::*;
use crate::parser::{PythonParser, Rule};

impl PythonParser {
    /// Parse a while loop from a Pest pair
    pub(crate) fn parse_while(pair: pest::iterators::Pair<Rule>) -> ParseResult<While> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        // First pair should be the "while" keyword, skip it
        let _while_keyword = inner_pairs.next().unwrap();

        let test = Self::parse_expression_from_pair(inner_pairs.next().unwrap())?;
        let body = Self::parse_block(inner_pairs.next().unwrap())?;

        Ok(While { test, body, span })
    }

    /// Parse a return statement from a Pest pair
    pub(crate) fn parse_return(pair: pest::iterators::Pair<Rule>) -> ParseResult<Return> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        // Skip the "return" keyword
        let _return_keyword = inner_pairs.next().unwrap();

        let value = inner_pairs
            .next()
            .map(Self::parse_expression_from_pair)
            .transpose()?;

        Ok(Return { value, span })
    }
}
