// Parser module
// Drives the pest grammar and converts statement-level pairs into the AST

use pest::Parser;
use pest_derive::Parser;

use crate::ast::*;
use crate::error::*;

mod control_flow;
mod expressions;
mod functions;
mod literals;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct PythonParser;

impl PythonParser {
    /// Parse a complete program
    pub fn parse_program(input: &str) -> ParseResult<Program> {
        let mut pairs = Self::parse(Rule::program, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let program_pair = pairs.next().unwrap();
        let span = Self::span_from_pair(&program_pair);

        let mut body = Vec::new();
        for pair in program_pair.into_inner() {
            match pair.as_rule() {
                Rule::EOI => {}
                _ => body.push(Self::parse_statement(pair)?),
            }
        }

        tracing::debug!(statements = body.len(), "parsed program");

        Ok(Program { body, span })
    }

    /// Parse a single expression (used by tests and tooling)
    pub fn parse_expression(input: &str) -> ParseResult<Expression> {
        let mut pairs = Self::parse(Rule::expression_input, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let input_pair = pairs.next().unwrap();
        let expression_pair = input_pair
            .into_inner()
            .find(|pair| pair.as_rule() == Rule::expression)
            .unwrap();

        Self::parse_expression_from_pair(expression_pair)
    }

    /// Parse any statement pair
    pub(crate) fn parse_statement(pair: pest::iterators::Pair<Rule>) -> ParseResult<Statement> {
        let span = Self::span_from_pair(&pair);

        let kind = match pair.as_rule() {
            Rule::function_def => StatementKind::FunctionDef(Self::parse_function_def(pair)?),
            Rule::while_stmt => StatementKind::While(Self::parse_while(pair)?),
            Rule::pass_stmt => StatementKind::Pass,
            Rule::return_stmt => StatementKind::Return(Self::parse_return(pair)?),
            Rule::assign => StatementKind::Assign(Self::parse_assign(pair)?),
            Rule::aug_assign => StatementKind::AugAssign(Self::parse_aug_assign(pair)?),
            Rule::expr_stmt => {
                let expression_pair = pair.into_inner().next().unwrap();
                StatementKind::Expr(Self::parse_expression_from_pair(expression_pair)?)
            }
            other => {
                return Err(ParseError::UnexpectedRule {
                    expected: "statement".to_string(),
                    found: other,
                    span,
                })
            }
        };

        Ok(Statement { kind, span })
    }

    /// Parse the statements of an indented block
    pub(crate) fn parse_block(pair: pest::iterators::Pair<Rule>) -> ParseResult<Vec<Statement>> {
        pair.into_inner().map(Self::parse_statement).collect()
    }

    /// Parse `target = target = value`
    fn parse_assign(pair: pest::iterators::Pair<Rule>) -> ParseResult<Assign> {
        let span = Self::span_from_pair(&pair);
        let mut targets = Vec::new();
        let mut value = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::target => targets.push(Self::parse_target(inner)?),
                Rule::expression => value = Some(Self::parse_expression_from_pair(inner)?),
                _ => {}
            }
        }

        // The grammar guarantees a trailing expression
        let value = value.unwrap();

        Ok(Assign {
            targets,
            value,
            span,
        })
    }

    /// Parse `target op= value`
    fn parse_aug_assign(pair: pest::iterators::Pair<Rule>) -> ParseResult<AugAssign> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        let target = Self::parse_target(inner_pairs.next().unwrap())?;

        let op_pair = inner_pairs.next().unwrap();
        let op = match op_pair.as_str() {
            "+=" => BinaryOperator::Add,
            "-=" => BinaryOperator::Sub,
            "*=" => BinaryOperator::Mult,
            "/=" => BinaryOperator::Div,
            "//=" => BinaryOperator::FloorDiv,
            "%=" => BinaryOperator::Mod,
            "**=" => BinaryOperator::Pow,
            _ => unreachable!("Invalid augmented assignment operator"),
        };

        let value = Self::parse_expression_from_pair(inner_pairs.next().unwrap())?;

        Ok(AugAssign {
            target,
            op,
            value,
            span,
        })
    }

    /// Parse an assignment target into a `Name` in store context
    fn parse_target(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let identifier = pair.into_inner().next().unwrap();

        Ok(Expression {
            kind: ExpressionKind::Name(Name {
                id: identifier.as_str().to_string(),
                ctx: ExprContext::Store,
                span: span.clone(),
            }),
            span,
        })
    }

    /// Build a span from a pair
    pub(crate) fn span_from_pair(pair: &pest::iterators::Pair<Rule>) -> Span {
        let pest_span = pair.as_span();
        Span::new(pest_span.start(), pest_span.end())
    }

    /// Build a span covering two existing nodes
    pub(crate) fn span_between(start: &Span, end: &Span) -> Span {
        Span::new(start.start, end.end)
    }

    /// Convert an AST span into a miette span
    pub(crate) fn source_span(span: &Span) -> miette::SourceSpan {
        miette::SourceSpan::new(span.start.into(), span.end - span.start)
    }
}
