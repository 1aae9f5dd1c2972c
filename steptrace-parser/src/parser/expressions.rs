// Expression parsing module
// Handles boolean operations, comparison chains, operator precedence and primaries

use pest::pratt_parser::{Assoc, Op, PrattParser};

use crate::ast::*;
use crate::error::*;
use crate::parser::{PythonParser, Rule};

impl PythonParser {
    /// Arithmetic operator precedence parser
    /// Precedence levels from lowest to highest (following Python precedence)
    pub(crate) fn pratt_parser() -> PrattParser<Rule> {
        PrattParser::new()
            // Level 1: Additive
            .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_subtract, Assoc::Left))
            // Level 2: Multiplicative
            .op(Op::infix(Rule::op_multiply, Assoc::Left)
                | Op::infix(Rule::op_divide, Assoc::Left)
                | Op::infix(Rule::op_floor_divide, Assoc::Left)
                | Op::infix(Rule::op_modulo, Assoc::Left))
            // Level 3: Unary sign, weaker than `**` on its right (-2 ** 2 == -4)
            .op(Op::prefix(Rule::op_negate) | Op::prefix(Rule::op_plus))
            // Level 4: Exponentiation (highest precedence, right associative)
            .op(Op::infix(Rule::op_power, Assoc::Right))
    }

    /// Parse arithmetic using precedence climbing
    pub(crate) fn parse_arithmetic(pairs: pest::iterators::Pairs<Rule>) -> ParseResult<Expression> {
        Self::pratt_parser()
            .map_primary(Self::parse_primary_expr)
            .map_prefix(|op, operand: ParseResult<Expression>| {
                let operand = operand?;
                let op_span = Self::span_from_pair(&op);
                let span = Self::span_between(&op_span, &operand.span);

                let op = match op.as_rule() {
                    Rule::op_negate => UnaryOperator::USub,
                    Rule::op_plus => UnaryOperator::UAdd,
                    _ => unreachable!("Unexpected prefix operator: {:?}", op.as_rule()),
                };

                Ok(Expression {
                    kind: ExpressionKind::UnaryOp(UnaryOperation {
                        op,
                        operand: Box::new(operand),
                        span: span.clone(),
                    }),
                    span,
                })
            })
            .map_infix(
                |left: ParseResult<Expression>,
                 op: pest::iterators::Pair<Rule>,
                 right: ParseResult<Expression>| {
                    let left = left?;
                    let right = right?;

                    let op = match op.as_rule() {
                        Rule::op_add => BinaryOperator::Add,
                        Rule::op_subtract => BinaryOperator::Sub,
                        Rule::op_multiply => BinaryOperator::Mult,
                        Rule::op_divide => BinaryOperator::Div,
                        Rule::op_floor_divide => BinaryOperator::FloorDiv,
                        Rule::op_modulo => BinaryOperator::Mod,
                        Rule::op_power => BinaryOperator::Pow,
                        _ => unreachable!("Unexpected binary operator: {:?}", op.as_rule()),
                    };

                    let span = Self::span_between(&left.span, &right.span);

                    Ok(Expression {
                        kind: ExpressionKind::BinOp(BinaryOperation {
                            left: Box::new(left),
                            op,
                            right: Box::new(right),
                            span: span.clone(),
                        }),
                        span,
                    })
                },
            )
            .parse(pairs)
    }

    /// Parse an expression from a Pest pair at any precedence level
    pub(crate) fn parse_expression_from_pair(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<Expression> {
        match pair.as_rule() {
            Rule::expression => Self::parse_boolean_operation(pair, BooleanOperator::Or),
            Rule::conjunction => Self::parse_boolean_operation(pair, BooleanOperator::And),
            Rule::inversion => Self::parse_inversion(pair),
            Rule::comparison => Self::parse_comparison(pair),
            Rule::arith => Self::parse_arithmetic(pair.into_inner()),
            Rule::primary_expr => Self::parse_primary_expr(pair),
            Rule::loop_test => {
                let inner = pair.into_inner().next().unwrap();
                Self::parse_expression_from_pair(inner)
            }
            other => Err(ParseError::UnexpectedRule {
                expected: "expression".to_string(),
                found: other,
                span: Self::span_from_pair(&pair),
            }),
        }
    }

    /// Parse `a or b or c` / `a and b and c` into a single flattened operation
    fn parse_boolean_operation(
        pair: pest::iterators::Pair<Rule>,
        op: BooleanOperator,
    ) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);

        let mut values = Vec::new();
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::op_or | Rule::op_and => {} // Skip the keyword
                _ => values.push(Self::parse_expression_from_pair(inner)?),
            }
        }

        if values.len() == 1 {
            return Ok(values.pop().unwrap());
        }

        Ok(Expression {
            kind: ExpressionKind::BoolOp(BooleanOperation {
                op,
                values,
                span: span.clone(),
            }),
            span,
        })
    }

    /// Parse `not x` or fall through to a comparison
    fn parse_inversion(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();
        let first = inner_pairs.next().unwrap();

        if first.as_rule() != Rule::op_not {
            return Self::parse_expression_from_pair(first);
        }

        let operand = Self::parse_expression_from_pair(inner_pairs.next().unwrap())?;

        Ok(Expression {
            kind: ExpressionKind::UnaryOp(UnaryOperation {
                op: UnaryOperator::Not,
                operand: Box::new(operand),
                span: span.clone(),
            }),
            span,
        })
    }

    /// Parse a (possibly chained) comparison: `a < b <= c`
    fn parse_comparison(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        let left = Self::parse_expression_from_pair(inner_pairs.next().unwrap())?;

        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op_pair) = inner_pairs.next() {
            let op = match op_pair.as_rule() {
                Rule::op_equal => ComparisonOperator::Eq,
                Rule::op_not_equal => ComparisonOperator::NotEq,
                Rule::op_less => ComparisonOperator::Lt,
                Rule::op_less_equal => ComparisonOperator::LtE,
                Rule::op_greater => ComparisonOperator::Gt,
                Rule::op_greater_equal => ComparisonOperator::GtE,
                _ => unreachable!("Unexpected comparison operator: {:?}", op_pair.as_rule()),
            };
            let comparator = Self::parse_expression_from_pair(inner_pairs.next().unwrap())?;
            ops.push(op);
            comparators.push(comparator);
        }

        if ops.is_empty() {
            return Ok(left);
        }

        Ok(Expression {
            kind: ExpressionKind::Compare(Comparison {
                left: Box::new(left),
                ops,
                comparators,
                span: span.clone(),
            }),
            span,
        })
    }

    /// Parse primary expressions (highest precedence)
    pub(crate) fn parse_primary_expr(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let inner = pair.into_inner().next().unwrap();

        let kind = match inner.as_rule() {
            // Parenthesized expression: no node of its own
            Rule::expression => return Self::parse_expression_from_pair(inner),
            Rule::call => ExpressionKind::Call(Self::parse_call(inner)?),
            Rule::list => ExpressionKind::List(Self::parse_list(inner)?),
            Rule::float => ExpressionKind::Num(Self::parse_float(inner)?),
            Rule::integer => ExpressionKind::Num(Self::parse_integer(inner)?),
            Rule::string => ExpressionKind::Str(Self::parse_string(inner)?),
            Rule::constant => ExpressionKind::NameConstant(Self::parse_constant(inner)),
            Rule::identifier => ExpressionKind::Name(Self::parse_name(inner, ExprContext::Load)),
            other => {
                return Err(ParseError::UnexpectedRule {
                    expected: "primary expression".to_string(),
                    found: other,
                    span,
                })
            }
        };

        Ok(Expression { kind, span })
    }

    /// Parse an identifier into a `Name`
    pub(crate) fn parse_name(pair: pest::iterators::Pair<Rule>, ctx: ExprContext) -> Name {
        Name {
            id: pair.as_str().to_string(),
            ctx,
            span: Self::span_from_pair(&pair),
        }
    }

    /// Parse a list display: `[a, b, c]`
    pub(crate) fn parse_list(pair: pest::iterators::Pair<Rule>) -> ParseResult<ListLiteral> {
        let span = Self::span_from_pair(&pair);
        let elts = pair
            .into_inner()
            .map(Self::parse_expression_from_pair)
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(ListLiteral {
            elts,
            ctx: ExprContext::Load,
            span,
        })
    }
}
