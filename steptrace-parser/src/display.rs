// Display tree building and printing
// Mirrors the syntax tree with depth-annotated nodes and renders it as dashes

use std::fmt::{self, Write};

use crate::ast::*;
use crate::repr::float_repr;
use crate::tree::SyntaxNode;

/// A node of the display tree
///
/// `children` and `syntax_nodes` run in parallel: the syntax node at index
/// `i` is the tree node that `children[i]` was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode<'a> {
    pub name: &'static str,
    pub depth: usize,
    pub children: Vec<DisplayNode<'a>>,
    pub syntax_nodes: Vec<SyntaxNode<'a>>,
}

impl<'a> DisplayNode<'a> {
    pub fn new(name: &'static str, depth: usize) -> Self {
        Self {
            name,
            depth,
            children: Vec::new(),
            syntax_nodes: Vec::new(),
        }
    }

    /// Top-level statements held by a `Module` root, in source order
    pub fn statements(&self) -> impl Iterator<Item = &'a Statement> + '_ {
        self.syntax_nodes.iter().filter_map(SyntaxNode::as_statement)
    }
}

/// Build the display tree for a program, rooted at a depth-0 `Module` node
pub fn build_display_tree(program: &Program) -> DisplayNode<'_> {
    let mut root = DisplayNode::new("Module", 0);
    populate(&mut root, SyntaxNode::Module(program));
    root
}

/// Recursively mirror the children of `syntax` under `node`, skipping contexts
fn populate<'a>(node: &mut DisplayNode<'a>, syntax: SyntaxNode<'a>) {
    for child in syntax.children() {
        if child.is_context() {
            continue;
        }

        let mut child_node = DisplayNode::new(child.type_name(), node.depth + 1);
        populate(&mut child_node, child);

        node.children.push(child_node);
        node.syntax_nodes.push(child);
    }
}

/// Write the tree one node per line, each prefixed by `depth` dashes
pub fn write_tree<W: Write>(
    out: &mut W,
    node: &DisplayNode<'_>,
    syntax: SyntaxNode<'_>,
) -> fmt::Result {
    writeln!(out, "{}{}", "-".repeat(node.depth), label(node, syntax))?;

    for (child, child_syntax) in node.children.iter().zip(&node.syntax_nodes) {
        write_tree(out, child, *child_syntax)?;
    }

    Ok(())
}

/// Render a whole program's display tree to a string
pub fn render_tree(program: &Program) -> String {
    let root = build_display_tree(program);
    let mut output = String::new();
    // Writing into a String cannot fail
    let _ = write_tree(&mut output, &root, SyntaxNode::Module(program));
    output
}

fn label(node: &DisplayNode<'_>, syntax: SyntaxNode<'_>) -> String {
    match syntax {
        SyntaxNode::Statement(Statement {
            kind: StatementKind::FunctionDef(def),
            ..
        }) => format!("function:  {}", def.name),
        SyntaxNode::Statement(Statement {
            kind: StatementKind::Assign(_),
            ..
        }) => "=".to_string(),
        SyntaxNode::Arg(arg) => arg.arg.clone(),
        SyntaxNode::Expression(expression) => match &expression.kind {
            ExpressionKind::Name(name) => name.id.clone(),
            ExpressionKind::Num(num) => match num.value {
                Number::Integer(value) => value.to_string(),
                Number::Float(value) => float_repr(value),
            },
            _ => node.name.to_string(),
        },
        SyntaxNode::BinaryOperator(BinaryOperator::Add) => "+".to_string(),
        SyntaxNode::ComparisonOperator(ComparisonOperator::Lt) => "<".to_string(),
        _ => node.name.to_string(),
    }
}
