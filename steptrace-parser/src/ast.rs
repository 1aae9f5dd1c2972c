// steptrace AST Definitions
// Syntax tree nodes for the traced Python subset, named after the Python AST

use crate::repr::{float_repr, string_repr};

/// Byte range of an AST node in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 1-based line of the first character within `source`
    pub fn line_in(&self, source: &str) -> usize {
        let end = self.start.min(source.len());
        source.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
    }
}

/// A whole input file
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    FunctionDef(FunctionDef),
    Return(Return),
    Assign(Assign),
    AugAssign(AugAssign),
    Expr(Expression),
    While(While),
    Pass,
}

impl Statement {
    /// Python AST class name of this statement
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            StatementKind::FunctionDef(_) => "FunctionDef",
            StatementKind::Return(_) => "Return",
            StatementKind::Assign(_) => "Assign",
            StatementKind::AugAssign(_) => "AugAssign",
            StatementKind::Expr(_) => "Expr",
            StatementKind::While(_) => "While",
            StatementKind::Pass => "Pass",
        }
    }
}

/// `def name(args): body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub args: Arguments,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// Parameter list of a function definition
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    pub args: Vec<Arg>,
    pub span: Span,
}

/// A single positional parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub arg: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expression>,
    pub span: Span,
}

/// `a = b = value`; every target is a `Name` in store context
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub targets: Vec<Expression>,
    pub value: Expression,
    pub span: Span,
}

/// `target op= value`
#[derive(Debug, Clone, PartialEq)]
pub struct AugAssign {
    pub target: Expression,
    pub op: BinaryOperator,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub test: Expression,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Name(Name),
    Num(NumericLiteral),
    Str(StringLiteral),
    NameConstant(Constant),
    List(ListLiteral),
    BinOp(BinaryOperation),
    UnaryOp(UnaryOperation),
    BoolOp(BooleanOperation),
    Compare(Comparison),
    Call(Call),
}

impl Expression {
    /// Python AST class name of this expression
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ExpressionKind::Name(_) => "Name",
            ExpressionKind::Num(_) => "Num",
            ExpressionKind::Str(_) => "Str",
            ExpressionKind::NameConstant(_) => "NameConstant",
            ExpressionKind::List(_) => "List",
            ExpressionKind::BinOp(_) => "BinOp",
            ExpressionKind::UnaryOp(_) => "UnaryOp",
            ExpressionKind::BoolOp(_) => "BoolOp",
            ExpressionKind::Compare(_) => "Compare",
            ExpressionKind::Call(_) => "Call",
        }
    }

    /// The identifier, if this expression is a plain name
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Name(name) => Some(&name.id),
            _ => None,
        }
    }
}

/// Whether a name is read or written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprContext {
    Load,
    Store,
}

impl ExprContext {
    pub fn type_name(&self) -> &'static str {
        match self {
            ExprContext::Load => "Load",
            ExprContext::Store => "Store",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub id: String,
    pub ctx: ExprContext,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    pub value: Number,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// Content with escape sequences processed
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    True,
    False,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub elts: Vec<Expression>,
    pub ctx: ExprContext,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub op: BinaryOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn type_name(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "Add",
            BinaryOperator::Sub => "Sub",
            BinaryOperator::Mult => "Mult",
            BinaryOperator::Div => "Div",
            BinaryOperator::FloorDiv => "FloorDiv",
            BinaryOperator::Mod => "Mod",
            BinaryOperator::Pow => "Pow",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub op: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    USub,
    UAdd,
    Not,
}

impl UnaryOperator {
    pub fn type_name(&self) -> &'static str {
        match self {
            UnaryOperator::USub => "USub",
            UnaryOperator::UAdd => "UAdd",
            UnaryOperator::Not => "Not",
        }
    }
}

/// `a and b and c` is a single operation with three values
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanOperation {
    pub op: BooleanOperator,
    pub values: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    And,
    Or,
}

impl BooleanOperator {
    pub fn type_name(&self) -> &'static str {
        match self {
            BooleanOperator::And => "And",
            BooleanOperator::Or => "Or",
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            BooleanOperator::And => "and",
            BooleanOperator::Or => "or",
        }
    }
}

/// `left op0 c0 op1 c1 ...`; `ops` and `comparators` always have the same length
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: Box<Expression>,
    pub ops: Vec<ComparisonOperator>,
    pub comparators: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
}

impl ComparisonOperator {
    pub fn type_name(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "Eq",
            ComparisonOperator::NotEq => "NotEq",
            ComparisonOperator::Lt => "Lt",
            ComparisonOperator::LtE => "LtE",
            ComparisonOperator::Gt => "Gt",
            ComparisonOperator::GtE => "GtE",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::NotEq => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::LtE => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::GtE => ">=",
        }
    }
}

/// Invocation by name: `func` is always a `Name` in load context
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: Box<Expression>,
    pub args: Vec<Expression>,
    pub span: Span,
}

// Source regeneration. Compound expressions are fully parenthesized so the
// printed code shows exactly how the tree groups its operands.

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, statement) in self.body.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StatementKind::FunctionDef(def) => write!(f, "{}", def),
            StatementKind::Return(ret) => write!(f, "{}", ret),
            StatementKind::Assign(assign) => write!(f, "{}", assign),
            StatementKind::AugAssign(aug) => write!(f, "{}", aug),
            StatementKind::Expr(expr) => write!(f, "{}", expr),
            StatementKind::While(while_stmt) => write!(f, "{}", while_stmt),
            StatementKind::Pass => write!(f, "pass"),
        }
    }
}

fn write_block(f: &mut std::fmt::Formatter<'_>, body: &[Statement]) -> std::fmt::Result {
    for statement in body {
        for line in statement.to_string().lines() {
            write!(f, "\n    {}", line)?;
        }
    }
    Ok(())
}

impl std::fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "def {}({}):", self.name, self.args)?;
        write_block(f, &self.body)
    }
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.args.iter().map(|arg| arg.arg.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl std::fmt::Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {}", value),
            None => write!(f, "return"),
        }
    }
}

impl std::fmt::Display for Assign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for target in &self.targets {
            write!(f, "{} = ", target)?;
        }
        write!(f, "{}", self.value)
    }
}

impl std::fmt::Display for AugAssign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}= {}", self.target, self.op.symbol(), self.value)
    }
}

impl std::fmt::Display for While {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while {}:", self.test)?;
        write_block(f, &self.body)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExpressionKind::Name(name) => write!(f, "{}", name.id),
            ExpressionKind::Num(num) => write!(f, "{}", num),
            ExpressionKind::Str(string) => write!(f, "{}", string_repr(&string.value)),
            ExpressionKind::NameConstant(constant) => write!(f, "{}", constant),
            ExpressionKind::List(list) => {
                let elements: Vec<String> = list.elts.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            ExpressionKind::BinOp(op) => {
                write!(f, "({} {} {})", op.left, op.op.symbol(), op.right)
            }
            ExpressionKind::UnaryOp(op) => match op.op {
                UnaryOperator::USub => write!(f, "(- {})", op.operand),
                UnaryOperator::UAdd => write!(f, "(+ {})", op.operand),
                UnaryOperator::Not => write!(f, "(not {})", op.operand),
            },
            ExpressionKind::BoolOp(op) => {
                let values: Vec<String> = op.values.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", values.join(&format!(" {} ", op.op.keyword())))
            }
            ExpressionKind::Compare(cmp) => {
                write!(f, "({}", cmp.left)?;
                for (op, comparator) in cmp.ops.iter().zip(&cmp.comparators) {
                    write!(f, " {} {}", op.symbol(), comparator)?;
                }
                write!(f, ")")
            }
            ExpressionKind::Call(call) => {
                let args: Vec<String> = call.args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", call.func, args.join(", "))
            }
        }
    }
}

impl std::fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", float_repr(value)),
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Constant::True => "True",
            Constant::False => "False",
            Constant::None => "None",
        };
        write!(f, "{}", text)
    }
}
