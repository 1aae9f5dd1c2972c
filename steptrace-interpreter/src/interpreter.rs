//! Core interpreter implementation for evaluating steptrace AST nodes.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::config::TraceConfig;
use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;
use steptrace_parser::{
    BinaryOperator, BooleanOperator, Call, ComparisonOperator, Comparison, Expression,
    ExpressionKind, Number, Program, Statement, StatementKind, UnaryOperator,
};

/// How a block of statements finished
#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Normal,
    Return(Value),
}

/// The main interpreter for evaluating steptrace programs
#[derive(Debug)]
pub struct Interpreter {
    /// Variable environment and scope management
    environment: Environment,
    /// Text written by `print` since the last `take_output`
    output: String,
    /// Number of user function calls currently active
    call_depth: usize,
    recursion_limit: usize,
}

impl Interpreter {
    /// Create a new interpreter with default limits
    pub fn new() -> Self {
        Self::with_config(&TraceConfig::default())
    }

    /// Create a new interpreter using the limits of `config`
    pub fn with_config(config: &TraceConfig) -> Self {
        let mut interpreter = Self {
            environment: Environment::new(),
            output: String::new(),
            call_depth: 0,
            recursion_limit: config.recursion_limit,
        };

        // Register built-in functions
        crate::builtins::register_builtins(&mut interpreter.environment);

        interpreter
    }

    /// Run every statement of a program without tracing
    pub fn eval_program(&mut self, program: &Program) -> Result<()> {
        for statement in &program.body {
            self.exec_statement(statement)?;
        }
        Ok(())
    }

    /// Execute one module-level statement
    pub fn exec_statement(&mut self, statement: &Statement) -> Result<()> {
        match self.exec(statement)? {
            Flow::Normal => Ok(()),
            Flow::Return(_) => Err(RuntimeError::custom(
                "'return' outside function".to_string(),
            )
            .with_span(&statement.span)),
        }
    }

    fn exec_block(&mut self, body: &[Statement]) -> Result<Flow> {
        for statement in body {
            if let Flow::Return(value) = self.exec(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec(&mut self, statement: &Statement) -> Result<Flow> {
        match &statement.kind {
            StatementKind::FunctionDef(def) => {
                self.environment
                    .define(def.name.clone(), Value::Function(Rc::new(def.clone())));
            }
            StatementKind::Return(ret) => {
                let value = match &ret.value {
                    Some(value) => self.eval_expression(value)?,
                    None => Value::None,
                };
                return Ok(Flow::Return(value));
            }
            StatementKind::Assign(assign) => {
                // Evaluated once, then bound to every target left to right
                let value = self.eval_expression(&assign.value)?;
                for target in &assign.targets {
                    self.assign(target, value.clone())?;
                }
            }
            StatementKind::AugAssign(aug) => {
                let current = self.eval_expression(&aug.target)?;
                let operand = self.eval_expression(&aug.value)?;
                let result = Self::binary_operation(aug.op, &current, &operand)
                    .map_err(|e| e.with_span(&statement.span))?;
                self.assign(&aug.target, result)?;
            }
            StatementKind::Expr(value) => {
                self.eval_expression(value)?;
            }
            StatementKind::While(while_stmt) => {
                while self.eval_expression(&while_stmt.test)?.is_truthy() {
                    if let Flow::Return(value) = self.exec_block(&while_stmt.body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            StatementKind::Pass => {}
        }

        Ok(Flow::Normal)
    }

    fn assign(&mut self, target: &Expression, value: Value) -> Result<()> {
        match target.as_name() {
            Some(name) => {
                self.environment.define(name.to_string(), value);
                Ok(())
            }
            None => Err(RuntimeError::custom(format!(
                "cannot assign to {}",
                target.type_name()
            ))
            .with_span(&target.span)),
        }
    }

    /// Evaluate an expression
    pub fn eval_expression(&mut self, expr: &Expression) -> Result<Value> {
        let result = match &expr.kind {
            // Literals
            ExpressionKind::Num(num) => Ok(match num.value {
                Number::Integer(n) => Value::Integer(n),
                Number::Float(f) => Value::Float(f),
            }),
            ExpressionKind::Str(lit) => Ok(Value::String(lit.value.clone())),
            ExpressionKind::NameConstant(constant) => Ok(match constant {
                steptrace_parser::Constant::True => Value::Boolean(true),
                steptrace_parser::Constant::False => Value::Boolean(false),
                steptrace_parser::Constant::None => Value::None,
            }),
            ExpressionKind::List(list) => list
                .elts
                .iter()
                .map(|element| self.eval_expression(element))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),

            // Variables
            ExpressionKind::Name(name) => self.environment.get(&name.id),

            // Operators
            ExpressionKind::BinOp(op) => {
                let left = self.eval_expression(&op.left)?;
                let right = self.eval_expression(&op.right)?;
                Self::binary_operation(op.op, &left, &right)
            }
            ExpressionKind::UnaryOp(op) => {
                let operand = self.eval_expression(&op.operand)?;
                match op.op {
                    UnaryOperator::USub => operand.negate(),
                    UnaryOperator::UAdd => operand.positive(),
                    UnaryOperator::Not => Ok(Value::Boolean(!operand.is_truthy())),
                }
            }
            ExpressionKind::BoolOp(op) => self.eval_boolean_operation(op.op, &op.values),
            ExpressionKind::Compare(cmp) => self.eval_comparison(cmp),
            ExpressionKind::Call(call) => self.eval_call(call),
        };

        result.map_err(|e| e.with_span(&expr.span))
    }

    /// Apply an arithmetic operator to two values
    pub fn binary_operation(op: BinaryOperator, left: &Value, right: &Value) -> Result<Value> {
        match op {
            BinaryOperator::Add => left.add(right),
            BinaryOperator::Sub => left.subtract(right),
            BinaryOperator::Mult => left.multiply(right),
            BinaryOperator::Div => left.divide(right),
            BinaryOperator::FloorDiv => left.floor_divide(right),
            BinaryOperator::Mod => left.modulo(right),
            BinaryOperator::Pow => left.power(right),
        }
    }

    /// `and`/`or` return the operand that decided the result
    fn eval_boolean_operation(&mut self, op: BooleanOperator, values: &[Expression]) -> Result<Value> {
        let mut last = Value::None;
        for value in values {
            last = self.eval_expression(value)?;
            let decided = match op {
                BooleanOperator::And => !last.is_truthy(),
                BooleanOperator::Or => last.is_truthy(),
            };
            if decided {
                break;
            }
        }
        Ok(last)
    }

    /// Chained comparisons evaluate each middle operand once
    fn eval_comparison(&mut self, cmp: &Comparison) -> Result<Value> {
        let mut left = self.eval_expression(&cmp.left)?;

        for (op, comparator) in cmp.ops.iter().zip(&cmp.comparators) {
            let right = self.eval_expression(comparator)?;
            if !Self::compare_values(*op, &left, &right)? {
                return Ok(Value::Boolean(false));
            }
            left = right;
        }

        Ok(Value::Boolean(true))
    }

    fn compare_values(op: ComparisonOperator, left: &Value, right: &Value) -> Result<bool> {
        let ordering = |wanted: &[Ordering]| -> Result<bool> {
            Ok(left
                .compare(right, op.symbol())?
                .is_some_and(|ordering| wanted.contains(&ordering)))
        };

        match op {
            ComparisonOperator::Eq => Ok(left.equals(right)),
            ComparisonOperator::NotEq => Ok(!left.equals(right)),
            ComparisonOperator::Lt => ordering(&[Ordering::Less]),
            ComparisonOperator::LtE => ordering(&[Ordering::Less, Ordering::Equal]),
            ComparisonOperator::Gt => ordering(&[Ordering::Greater]),
            ComparisonOperator::GtE => ordering(&[Ordering::Greater, Ordering::Equal]),
        }
    }

    fn eval_call(&mut self, call: &Call) -> Result<Value> {
        let callee = self.eval_expression(&call.func)?;
        let args = call
            .args
            .iter()
            .map(|arg| self.eval_expression(arg))
            .collect::<Result<Vec<_>>>()?;

        self.call_value(&callee, &args)
    }

    /// Call a function or builtin value with evaluated arguments
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> Result<Value> {
        match callee {
            Value::BuiltinFunction { function, .. } => function(args, &mut self.output),
            Value::Function(def) => {
                if args.len() != def.args.args.len() {
                    return Err(RuntimeError::wrong_arity(
                        &def.name,
                        def.args.args.len(),
                        args.len(),
                    ));
                }
                if self.call_depth >= self.recursion_limit {
                    return Err(RuntimeError::recursion_limit(self.recursion_limit));
                }

                tracing::trace!(function = %def.name, depth = self.call_depth + 1, "call");

                self.environment.push_scope();
                for (param, value) in def.args.args.iter().zip(args) {
                    self.environment.define(param.arg.clone(), value.clone());
                }

                self.call_depth += 1;
                let result = ensure_sufficient_stack(|| self.exec_block(&def.body));
                self.call_depth -= 1;
                self.environment.pop_scope()?;

                match result? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Ok(Value::None),
                }
            }
            other => Err(RuntimeError::not_callable(other.type_name())),
        }
    }

    /// Take everything printed since the last call
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Get reference to the environment (for testing and tracing)
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
