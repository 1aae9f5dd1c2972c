//! Built-in functions for the steptrace interpreter.
//!
//! Provides the Python builtins the traced subset can call: output, sizes,
//! numeric helpers and type conversions.

use std::cmp::Ordering;

use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::value::{BuiltinFn, Value};

/// Register all built-in functions with the environment
pub fn register_builtins(env: &mut Environment) {
    let builtins: [(&'static str, BuiltinFn); 9] = [
        // I/O functions
        ("print", builtin_print),
        // Collection and numeric helpers
        ("len", builtin_len),
        ("abs", builtin_abs),
        ("min", builtin_min),
        ("max", builtin_max),
        // Type conversion functions
        ("str", builtin_str),
        ("int", builtin_int),
        ("float", builtin_float),
        ("bool", builtin_bool),
    ];

    for (name, function) in builtins {
        env.register_builtin(name.to_string(), Value::BuiltinFunction { name, function });
    }
}

fn expect_at_most(function: &str, args: &[Value], max: usize) -> Result<()> {
    if args.len() > max {
        let expected = if max == 0 {
            "no".to_string()
        } else {
            format!("at most {}", max)
        };
        return Err(RuntimeError::wrong_arity(function, expected, args.len()));
    }
    Ok(())
}

fn expect_exactly(function: &str, args: &[Value], count: usize) -> Result<()> {
    if args.len() != count {
        return Err(RuntimeError::wrong_arity(function, count, args.len()));
    }
    Ok(())
}

// I/O Functions

/// Print space-separated values followed by a newline
fn builtin_print(args: &[Value], out: &mut String) -> Result<Value> {
    let parts: Vec<String> = args.iter().map(Value::to_string_repr).collect();
    out.push_str(&parts.join(" "));
    out.push('\n');
    Ok(Value::None)
}

// Collection and numeric helpers

fn builtin_len(args: &[Value], _out: &mut String) -> Result<Value> {
    expect_exactly("len", args, 1)?;

    let length = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::List(items) => items.len(),
        other => return Err(RuntimeError::type_error("str or list", other.type_name())),
    };

    i64::try_from(length)
        .map(Value::Integer)
        .map_err(|_| RuntimeError::overflow("len"))
}

fn builtin_abs(args: &[Value], _out: &mut String) -> Result<Value> {
    expect_exactly("abs", args, 1)?;

    match &args[0] {
        Value::Integer(n) => n
            .checked_abs()
            .map(Value::Integer)
            .ok_or_else(|| RuntimeError::overflow("abs")),
        Value::Boolean(b) => Ok(Value::Integer(*b as i64)),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(RuntimeError::type_error("a number", other.type_name())),
    }
}

fn builtin_min(args: &[Value], _out: &mut String) -> Result<Value> {
    extreme("min", args, Ordering::Less)
}

fn builtin_max(args: &[Value], _out: &mut String) -> Result<Value> {
    extreme("max", args, Ordering::Greater)
}

/// Shared body of `min`/`max`: a single sequence argument or several values
fn extreme(function: &str, args: &[Value], wanted: Ordering) -> Result<Value> {
    let candidates: Vec<Value> = match args {
        [] => return Err(RuntimeError::wrong_arity(function, "at least 1", 0)),
        [Value::List(items)] => items.clone(),
        [Value::String(s)] => s.chars().map(|c| Value::String(c.to_string())).collect(),
        [single] => return Err(RuntimeError::type_error("str or list", single.type_name())),
        several => several.to_vec(),
    };

    let operation = if wanted == Ordering::Less { "<" } else { ">" };
    let mut candidates = candidates.into_iter();
    let mut best = candidates
        .next()
        .ok_or_else(|| RuntimeError::custom(format!("{}() arg is an empty sequence", function)))?;

    for candidate in candidates {
        if candidate.compare(&best, operation)? == Some(wanted) {
            best = candidate;
        }
    }

    Ok(best)
}

// Type Conversion Functions

fn builtin_str(args: &[Value], _out: &mut String) -> Result<Value> {
    expect_at_most("str", args, 1)?;

    Ok(Value::String(
        args.first().map(Value::to_string_repr).unwrap_or_default(),
    ))
}

fn builtin_int(args: &[Value], _out: &mut String) -> Result<Value> {
    expect_at_most("int", args, 1)?;

    match args.first() {
        None => Ok(Value::Integer(0)),
        Some(Value::Integer(n)) => Ok(Value::Integer(*n)),
        Some(Value::Boolean(b)) => Ok(Value::Integer(*b as i64)),
        Some(Value::Float(f)) => {
            let truncated = f.trunc();
            if !truncated.is_finite() {
                return Err(RuntimeError::custom(format!(
                    "cannot convert float {} to integer",
                    Value::Float(*f)
                )));
            }
            if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(RuntimeError::overflow("int"));
            }
            Ok(Value::Integer(truncated as i64))
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Value::Integer).map_err(|_| {
            RuntimeError::custom(format!(
                "invalid literal for int() with base 10: {}",
                Value::String(s.clone()).to_display_string()
            ))
        }),
        Some(other) => Err(RuntimeError::type_error(
            "a string or a number",
            other.type_name(),
        )),
    }
}

fn builtin_float(args: &[Value], _out: &mut String) -> Result<Value> {
    expect_at_most("float", args, 1)?;

    match args.first() {
        None => Ok(Value::Float(0.0)),
        Some(Value::Integer(n)) => Ok(Value::Float(*n as f64)),
        Some(Value::Boolean(b)) => Ok(Value::Float(*b as i64 as f64)),
        Some(Value::Float(f)) => Ok(Value::Float(*f)),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
            RuntimeError::custom(format!(
                "could not convert string to float: {}",
                Value::String(s.clone()).to_display_string()
            ))
        }),
        Some(other) => Err(RuntimeError::type_error(
            "a string or a number",
            other.type_name(),
        )),
    }
}

fn builtin_bool(args: &[Value], _out: &mut String) -> Result<Value> {
    expect_at_most("bool", args, 1)?;

    Ok(Value::Boolean(
        args.first().map(Value::is_truthy).unwrap_or(false),
    ))
}
