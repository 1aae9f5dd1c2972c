// Function parsing module
// Handles function definitions, parameter lists and calls

use crate::ast::*;
use crate::error::*;
use crate::parser::{PythonParser, Rule};

impl PythonParser {
    /// Parse a function definition from a Pest pair
    pub(crate) fn parse_function_def(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<FunctionDef> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        // First pair should be the "def" keyword, skip it
        let _def_keyword = inner_pairs.next().unwrap();

        let name = inner_pairs.next().unwrap().as_str().to_string();
        let args = Self::parse_parameters(inner_pairs.next().unwrap());
        let body = Self::parse_block(inner_pairs.next().unwrap())?;

        Ok(FunctionDef {
            name,
            args,
            body,
            span,
        })
    }

    /// Parse a parenthesized parameter list
    fn parse_parameters(pair: pest::iterators::Pair<Rule>) -> Arguments {
        let span = Self::span_from_pair(&pair);
        let args = pair
            .into_inner()
            .map(|identifier| Arg {
                arg: identifier.as_str().to_string(),
                span: Self::span_from_pair(&identifier),
            })
            .collect();

        Arguments { args, span }
    }

    /// Parse a call by name: `f(a, b)`
    pub(crate) fn parse_call(pair: pest::iterators::Pair<Rule>) -> ParseResult<Call> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        let identifier = inner_pairs.next().unwrap();
        let func_span = Self::span_from_pair(&identifier);
        let func = Expression {
            kind: ExpressionKind::Name(Self::parse_name(identifier, ExprContext::Load)),
            span: func_span,
        };

        let args = inner_pairs
            .map(Self::parse_expression_from_pair)
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(Call {
            func: Box::new(func),
            args,
            span,
        })
    }
}
