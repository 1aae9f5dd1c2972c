// Uniform syntax node view
// A borrowed handle over any tree node, exposing its kind name and children

use crate::ast::*;

/// A reference to any node of the syntax tree
///
/// Operator and context nodes are small `Copy` enums, so they are held by
/// value; everything else borrows from the parsed `Program`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyntaxNode<'a> {
    Module(&'a Program),
    Statement(&'a Statement),
    Arguments(&'a Arguments),
    Arg(&'a Arg),
    Expression(&'a Expression),
    BinaryOperator(BinaryOperator),
    UnaryOperator(UnaryOperator),
    BooleanOperator(BooleanOperator),
    ComparisonOperator(ComparisonOperator),
    Context(ExprContext),
}

impl<'a> SyntaxNode<'a> {
    /// Python AST class name of the node
    pub fn type_name(&self) -> &'static str {
        match self {
            SyntaxNode::Module(_) => "Module",
            SyntaxNode::Statement(statement) => statement.type_name(),
            SyntaxNode::Arguments(_) => "arguments",
            SyntaxNode::Arg(_) => "arg",
            SyntaxNode::Expression(expression) => expression.type_name(),
            SyntaxNode::BinaryOperator(op) => op.type_name(),
            SyntaxNode::UnaryOperator(op) => op.type_name(),
            SyntaxNode::BooleanOperator(op) => op.type_name(),
            SyntaxNode::ComparisonOperator(op) => op.type_name(),
            SyntaxNode::Context(ctx) => ctx.type_name(),
        }
    }

    /// Whether this is a `Load`/`Store` context marker
    pub fn is_context(&self) -> bool {
        matches!(self, SyntaxNode::Context(_))
    }

    /// The statement behind this node, if it is one
    pub fn as_statement(&self) -> Option<&'a Statement> {
        match self {
            SyntaxNode::Statement(statement) => Some(statement),
            _ => None,
        }
    }

    /// Child nodes in field order, list fields expanded per element
    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        match *self {
            SyntaxNode::Module(program) => statements(&program.body),
            SyntaxNode::Statement(statement) => Self::statement_children(statement),
            SyntaxNode::Arguments(arguments) => arguments.args.iter().map(SyntaxNode::Arg).collect(),
            SyntaxNode::Expression(expression) => Self::expression_children(expression),
            SyntaxNode::Arg(_)
            | SyntaxNode::BinaryOperator(_)
            | SyntaxNode::UnaryOperator(_)
            | SyntaxNode::BooleanOperator(_)
            | SyntaxNode::ComparisonOperator(_)
            | SyntaxNode::Context(_) => Vec::new(),
        }
    }

    fn statement_children(statement: &'a Statement) -> Vec<SyntaxNode<'a>> {
        match &statement.kind {
            StatementKind::FunctionDef(def) => {
                let mut children = vec![SyntaxNode::Arguments(&def.args)];
                children.extend(statements(&def.body));
                children
            }
            StatementKind::Return(ret) => ret.value.iter().map(SyntaxNode::Expression).collect(),
            StatementKind::Assign(assign) => {
                let mut children: Vec<_> =
                    assign.targets.iter().map(SyntaxNode::Expression).collect();
                children.push(SyntaxNode::Expression(&assign.value));
                children
            }
            StatementKind::AugAssign(aug) => vec![
                SyntaxNode::Expression(&aug.target),
                SyntaxNode::BinaryOperator(aug.op),
                SyntaxNode::Expression(&aug.value),
            ],
            StatementKind::Expr(value) => vec![SyntaxNode::Expression(value)],
            StatementKind::While(while_stmt) => {
                let mut children = vec![SyntaxNode::Expression(&while_stmt.test)];
                children.extend(statements(&while_stmt.body));
                children
            }
            StatementKind::Pass => Vec::new(),
        }
    }

    fn expression_children(expression: &'a Expression) -> Vec<SyntaxNode<'a>> {
        match &expression.kind {
            ExpressionKind::Name(name) => vec![SyntaxNode::Context(name.ctx)],
            ExpressionKind::List(list) => {
                let mut children: Vec<_> = list.elts.iter().map(SyntaxNode::Expression).collect();
                children.push(SyntaxNode::Context(list.ctx));
                children
            }
            ExpressionKind::BinOp(op) => vec![
                SyntaxNode::Expression(&op.left),
                SyntaxNode::BinaryOperator(op.op),
                SyntaxNode::Expression(&op.right),
            ],
            ExpressionKind::UnaryOp(op) => vec![
                SyntaxNode::UnaryOperator(op.op),
                SyntaxNode::Expression(&op.operand),
            ],
            ExpressionKind::BoolOp(op) => {
                let mut children = vec![SyntaxNode::BooleanOperator(op.op)];
                children.extend(op.values.iter().map(SyntaxNode::Expression));
                children
            }
            ExpressionKind::Compare(cmp) => {
                let mut children = vec![SyntaxNode::Expression(&cmp.left)];
                children.extend(cmp.ops.iter().copied().map(SyntaxNode::ComparisonOperator));
                children.extend(cmp.comparators.iter().map(SyntaxNode::Expression));
                children
            }
            ExpressionKind::Call(call) => {
                let mut children = vec![SyntaxNode::Expression(&call.func)];
                children.extend(call.args.iter().map(SyntaxNode::Expression));
                children
            }
            ExpressionKind::Num(_) | ExpressionKind::Str(_) | ExpressionKind::NameConstant(_) => {
                Vec::new()
            }
        }
    }
}

fn statements(body: &[Statement]) -> Vec<SyntaxNode<'_>> {
    body.iter().map(SyntaxNode::Statement).collect()
}
