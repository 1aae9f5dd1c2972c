//! Statement-by-statement execution tracer.
//!
//! Drives a work queue over module-level statements. Plain statements are
//! printed, executed and followed by the current variable mapping; `while`
//! loops print their test, its truth value and the distance to the loop
//! boundary, then either splice their body into the queue (followed by a
//! line marker) or fall through.

use std::collections::VecDeque;
use std::io::Write;

use crate::config::TraceConfig;
use crate::error::{Result, RuntimeError, TraceError};
use crate::interpreter::Interpreter;
use crate::value::Value;
use steptrace_parser::{Comparison, Expression, ExpressionKind, Program, Statement, StatementKind, While};

/// An entry of the work queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkItem<'a> {
    Statement(&'a Statement),
    /// Restores the line counter once a loop body has been visited
    Marker(usize),
}

/// Work-queue driven tracer writing its report to `out`
pub struct Tracer<'a, W: Write> {
    queue: VecDeque<WorkItem<'a>>,
    interpreter: Interpreter,
    line: usize,
    steps: usize,
    config: TraceConfig,
    out: W,
}

impl<'a, W: Write> Tracer<'a, W> {
    /// Create a tracer over module-level statements, in source order
    pub fn new(
        statements: impl IntoIterator<Item = &'a Statement>,
        out: W,
        config: TraceConfig,
    ) -> Self {
        Self {
            queue: statements.into_iter().map(WorkItem::Statement).collect(),
            interpreter: Interpreter::with_config(&config),
            line: 1,
            steps: 0,
            config,
            out,
        }
    }

    /// Process the queue until it is empty
    pub fn run(&mut self) -> std::result::Result<(), TraceError> {
        while self.step()? {}
        Ok(())
    }

    /// Process the item at the head of the queue
    ///
    /// Returns `false` once the queue is empty.
    pub fn step(&mut self) -> std::result::Result<bool, TraceError> {
        let Some(item) = self.queue.front().copied() else {
            return Ok(false);
        };

        self.steps += 1;
        if let Some(limit) = self.config.max_steps {
            if self.steps > limit {
                return Err(RuntimeError::StepLimit { limit }.into());
            }
        }

        match item {
            WorkItem::Marker(line) => {
                tracing::trace!(line, queue_len = self.queue.len(), "marker restore");
                self.queue.pop_front();
                self.line = line;
            }
            WorkItem::Statement(statement) => match &statement.kind {
                StatementKind::FunctionDef(def) => {
                    tracing::debug!(function = %def.name, source = %statement, "function definition");
                    self.interpreter.exec_statement(statement)?;
                    self.queue.pop_front();
                }
                StatementKind::While(while_stmt) => self.visit_loop(while_stmt)?,
                _ => self.visit_statement(statement)?,
            },
        }

        Ok(true)
    }

    fn visit_statement(&mut self, statement: &Statement) -> std::result::Result<(), TraceError> {
        tracing::debug!(line = self.line, queue_len = self.queue.len(), "statement");

        writeln!(self.out, "The statement of line {}: {}", self.line, statement)?;
        self.interpreter.exec_statement(statement)?;
        self.flush_printed()?;
        writeln!(self.out, "\t {}", self.variable_mapping())?;

        self.queue.pop_front();
        self.line += 1;
        Ok(())
    }

    fn visit_loop(&mut self, while_stmt: &'a While) -> std::result::Result<(), TraceError> {
        let test = &while_stmt.test;
        let result = self.interpreter.eval_expression(test)?.is_truthy();
        self.flush_printed()?;

        tracing::debug!(line = self.line, queue_len = self.queue.len(), result, "loop test");

        let variables = test_variables(test)
            .into_iter()
            .map(|name| {
                let value = self.interpreter.environment().get(name)?;
                Ok(format!("{}={}", name, value.to_string_repr()))
            })
            .collect::<Result<Vec<_>>>()?;

        writeln!(
            self.out,
            "The test condition of line {}: {} \t the values of test variable:  {} \t the result is:  {}",
            self.line,
            test,
            variables.join("  "),
            if result { "True" } else { "False" }
        )?;

        let quantities = self.quantities(test)?;
        self.flush_printed()?;

        let state = if result { "open" } else { "close" };
        if quantities.is_empty() {
            // The open form ends with a period, the close form does not
            let period = if result { "." } else { "" };
            writeln!(self.out, "\tThe bool operation is {}{}", state, period)?;
        } else {
            let quantities: Vec<String> = quantities.iter().map(Value::to_string_repr).collect();
            writeln!(
                self.out,
                "\tThe bool operation is {}, quantity is: {}",
                state,
                quantities.join("  ")
            )?;
        }

        if result {
            // The loop stays queued behind its body and the marker
            self.queue.push_front(WorkItem::Marker(self.line));
            for statement in while_stmt.body.iter().rev() {
                self.queue.push_front(WorkItem::Statement(statement));
            }
        } else {
            self.queue.pop_front();
        }
        self.line += 1;

        Ok(())
    }

    /// Distance to the loop boundary for each comparison of the test
    fn quantities(&mut self, test: &Expression) -> Result<Vec<Value>> {
        match &test.kind {
            ExpressionKind::Compare(cmp) => Ok(vec![self.quantity(cmp, &test.span)?]),
            ExpressionKind::BoolOp(op) => op
                .values
                .iter()
                .map(|value| match &value.kind {
                    ExpressionKind::Compare(cmp) => self.quantity(cmp, &value.span),
                    _ => Err(RuntimeError::undefined_quantity(value.type_name())
                        .with_span(&value.span)),
                })
                .collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// First comparator minus the left operand
    fn quantity(&mut self, cmp: &Comparison, span: &steptrace_parser::Span) -> Result<Value> {
        let right = self.interpreter.eval_expression(&cmp.comparators[0])?;
        let left = self.interpreter.eval_expression(&cmp.left)?;
        right.subtract(&left).map_err(|e| e.with_span(span))
    }

    /// Global bindings as `k=v` pairs, callables excluded
    fn variable_mapping(&self) -> String {
        let pairs: Vec<String> = self
            .interpreter
            .environment()
            .globals()
            .filter(|(_, value)| !value.is_callable())
            .map(|(name, value)| format!("{}={}", name, value.to_string_repr()))
            .collect();
        pairs.join("  ")
    }

    /// Forward anything the program printed to the trace output
    fn flush_printed(&mut self) -> std::io::Result<()> {
        let printed = self.interpreter.take_output();
        self.out.write_all(printed.as_bytes())
    }

    /// Current line counter
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of pending work items
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Consume the tracer, returning the output sink
    pub fn into_output(self) -> W {
        self.out
    }
}

/// Trace every module-level statement of `program` into `out`
pub fn trace_program<W: Write>(
    program: &Program,
    out: W,
    config: TraceConfig,
) -> std::result::Result<(), TraceError> {
    Tracer::new(&program.body, out, config).run()
}

/// Names referenced by a loop test, in traversal order
///
/// Comparisons and arithmetic contribute the names found along their
/// `left`/`right` operands; a boolean test applies this to each value.
/// Any other test has no test variables.
pub fn test_variables(test: &Expression) -> Vec<&str> {
    let mut names = Vec::new();
    match &test.kind {
        ExpressionKind::Compare(_) | ExpressionKind::BinOp(_) => collect_names(test, &mut names),
        ExpressionKind::BoolOp(op) => {
            for value in &op.values {
                collect_names(value, &mut names);
            }
        }
        _ => {}
    }
    names
}

fn collect_names<'e>(expr: &'e Expression, names: &mut Vec<&'e str>) {
    match &expr.kind {
        ExpressionKind::Name(name) => names.push(&name.id),
        ExpressionKind::Compare(cmp) => collect_names(&cmp.left, names),
        ExpressionKind::BinOp(op) => {
            collect_names(&op.left, names);
            collect_names(&op.right, names);
        }
        _ => {}
    }
}
