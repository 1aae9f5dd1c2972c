//! Runtime value representation for the steptrace interpreter.
//!
//! This module defines the Value enum for every runtime value of the traced
//! Python subset, along with Python's arithmetic, comparison and conversion
//! rules.

use crate::error::{Result, RuntimeError};
use std::cmp::Ordering;
use std::rc::Rc;
use steptrace_parser::FunctionDef;
use steptrace_parser::repr::{float_repr, string_repr};

/// Signature of a builtin: arguments plus the interpreter's output buffer
pub type BuiltinFn = fn(&[Value], &mut String) -> Result<Value>;

/// Runtime values in the steptrace interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// UTF-8 string
    String(String),
    /// Ordered list of values
    List(Vec<Value>),

    /// Function defined with `def`
    Function(Rc<FunctionDef>),
    /// Built-in function
    BuiltinFunction {
        name: &'static str,
        function: BuiltinFn,
    },

    None,
}

/// A numeric view of a value; booleans count as 0 and 1
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn to_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(f) => f,
        }
    }
}

impl Value {
    /// Get the Python type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::Boolean(_) => "bool",
            Value::String(_) => "str",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::BuiltinFunction { .. } => "builtin_function_or_method",
            Value::None => "NoneType",
        }
    }

    /// Check if this value is truthy (for loop tests and logical operators)
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::None => false,
            Value::Integer(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(list) => !list.is_empty(),
            Value::Function(_) | Value::BuiltinFunction { .. } => true,
        }
    }

    /// Whether the value can be called
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::BuiltinFunction { .. })
    }

    fn numeric(&self) -> Option<Numeric> {
        match self {
            Value::Integer(n) => Some(Numeric::Int(*n)),
            Value::Boolean(b) => Some(Numeric::Int(*b as i64)),
            Value::Float(f) => Some(Numeric::Float(*f)),
            _ => None,
        }
    }

    /// Python `str()` of the value
    pub fn to_string_repr(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Float(f) => float_repr(*f),
            Value::Boolean(true) => "True".to_string(),
            Value::Boolean(false) => "False".to_string(),
            Value::String(s) => s.clone(),
            Value::List(items) => {
                let item_strings: Vec<String> =
                    items.iter().map(|v| v.to_display_string()).collect();
                format!("[{}]", item_strings.join(", "))
            }
            Value::Function(def) => format!("<function {}>", def.name),
            Value::BuiltinFunction { name, .. } => format!("<built-in function {}>", name),
            Value::None => "None".to_string(),
        }
    }

    /// Python `repr()` of the value
    pub fn to_display_string(&self) -> String {
        match self {
            Value::String(s) => string_repr(s),
            _ => self.to_string_repr(),
        }
    }

    fn unsupported(&self, operation: &str, other: &Value) -> RuntimeError {
        RuntimeError::invalid_operation(operation, vec![self.type_name(), other.type_name()])
    }

    // Arithmetic operations

    /// Addition operation
    pub fn add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            (Value::List(a), Value::List(b)) => {
                let mut result = a.clone();
                result.extend(b.iter().cloned());
                Ok(Value::List(result))
            }
            _ => match (self.numeric(), other.numeric()) {
                (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => a
                    .checked_add(b)
                    .map(Value::Integer)
                    .ok_or_else(|| RuntimeError::overflow("+")),
                (Some(a), Some(b)) => Ok(Value::Float(a.to_f64() + b.to_f64())),
                _ => Err(self.unsupported("+", other)),
            },
        }
    }

    /// Subtraction operation
    pub fn subtract(&self, other: &Value) -> Result<Value> {
        match (self.numeric(), other.numeric()) {
            (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => a
                .checked_sub(b)
                .map(Value::Integer)
                .ok_or_else(|| RuntimeError::overflow("-")),
            (Some(a), Some(b)) => Ok(Value::Float(a.to_f64() - b.to_f64())),
            _ => Err(self.unsupported("-", other)),
        }
    }

    /// Multiplication operation, including sequence repetition
    pub fn multiply(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::String(s), count) | (count, Value::String(s))
                if matches!(count.numeric(), Some(Numeric::Int(_))) =>
            {
                let times = repeat_count(count);
                repeated_len(s.len(), times)?;
                Ok(Value::String(s.repeat(times)))
            }
            (Value::List(items), count) | (count, Value::List(items))
                if matches!(count.numeric(), Some(Numeric::Int(_))) =>
            {
                let times = repeat_count(count);
                let mut result = Vec::with_capacity(repeated_len(items.len(), times)?);
                for _ in 0..times {
                    result.extend(items.iter().cloned());
                }
                Ok(Value::List(result))
            }
            _ => match (self.numeric(), other.numeric()) {
                (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => a
                    .checked_mul(b)
                    .map(Value::Integer)
                    .ok_or_else(|| RuntimeError::overflow("*")),
                (Some(a), Some(b)) => Ok(Value::Float(a.to_f64() * b.to_f64())),
                _ => Err(self.unsupported("*", other)),
            },
        }
    }

    /// True division; always produces a float
    pub fn divide(&self, other: &Value) -> Result<Value> {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => {
                let divisor = b.to_f64();
                if divisor == 0.0 {
                    Err(RuntimeError::division_by_zero())
                } else {
                    Ok(Value::Float(a.to_f64() / divisor))
                }
            }
            _ => Err(self.unsupported("/", other)),
        }
    }

    /// Floor division, rounding toward negative infinity
    pub fn floor_divide(&self, other: &Value) -> Result<Value> {
        match (self.numeric(), other.numeric()) {
            (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => {
                if b == 0 {
                    return Err(RuntimeError::division_by_zero());
                }
                let quotient = a.checked_div(b).ok_or_else(|| RuntimeError::overflow("//"))?;
                if (a % b != 0) && ((a < 0) != (b < 0)) {
                    Ok(Value::Integer(quotient - 1))
                } else {
                    Ok(Value::Integer(quotient))
                }
            }
            (Some(a), Some(b)) => {
                let divisor = b.to_f64();
                if divisor == 0.0 {
                    Err(RuntimeError::division_by_zero())
                } else {
                    Ok(Value::Float((a.to_f64() / divisor).floor()))
                }
            }
            _ => Err(self.unsupported("//", other)),
        }
    }

    /// Modulo operation; the result takes the sign of the divisor
    pub fn modulo(&self, other: &Value) -> Result<Value> {
        match (self.numeric(), other.numeric()) {
            (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => {
                if b == 0 {
                    return Err(RuntimeError::division_by_zero());
                }
                // i64::MIN % -1 is 0 mathematically but overflows in Rust
                let remainder = a.checked_rem(b).unwrap_or(0);
                if remainder != 0 && ((remainder < 0) != (b < 0)) {
                    Ok(Value::Integer(remainder + b))
                } else {
                    Ok(Value::Integer(remainder))
                }
            }
            (Some(a), Some(b)) => {
                let (a, b) = (a.to_f64(), b.to_f64());
                if b == 0.0 {
                    return Err(RuntimeError::division_by_zero());
                }
                let remainder = a % b;
                if remainder != 0.0 && ((remainder < 0.0) != (b < 0.0)) {
                    Ok(Value::Float(remainder + b))
                } else {
                    Ok(Value::Float(remainder))
                }
            }
            _ => Err(self.unsupported("%", other)),
        }
    }

    /// Exponentiation; a negative integer exponent produces a float
    pub fn power(&self, other: &Value) -> Result<Value> {
        match (self.numeric(), other.numeric()) {
            (Some(Numeric::Int(base)), Some(Numeric::Int(exponent))) if exponent >= 0 => {
                u32::try_from(exponent)
                    .ok()
                    .and_then(|exponent| base.checked_pow(exponent))
                    .map(Value::Integer)
                    .ok_or_else(|| RuntimeError::overflow("**"))
            }
            (Some(a), Some(b)) => {
                let (base, exponent) = (a.to_f64(), b.to_f64());
                if base == 0.0 && exponent < 0.0 {
                    return Err(RuntimeError::division_by_zero());
                }
                Ok(Value::Float(base.powf(exponent)))
            }
            _ => Err(self.unsupported("**", other)),
        }
    }

    /// Unary minus
    pub fn negate(&self) -> Result<Value> {
        match self.numeric() {
            Some(Numeric::Int(n)) => n
                .checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| RuntimeError::overflow("unary -")),
            Some(Numeric::Float(f)) => Ok(Value::Float(-f)),
            None => Err(RuntimeError::type_error("a number", self.type_name())),
        }
    }

    /// Unary plus; booleans become integers
    pub fn positive(&self) -> Result<Value> {
        match self.numeric() {
            Some(Numeric::Int(n)) => Ok(Value::Integer(n)),
            Some(Numeric::Float(f)) => Ok(Value::Float(f)),
            None => Err(RuntimeError::type_error("a number", self.type_name())),
        }
    }

    // Comparison operations

    /// Equality comparison (works for all types)
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            (Value::None, Value::None) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::BuiltinFunction { name: a, .. }, Value::BuiltinFunction { name: b, .. }) => {
                a == b
            }
            _ => match (self.numeric(), other.numeric()) {
                (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => a == b,
                (Some(a), Some(b)) => a.to_f64() == b.to_f64(),
                _ => false, // Unrelated types are never equal
            },
        }
    }

    /// Ordering comparison (for <, >, <=, >=)
    ///
    /// `None` means the values are unordered (a NaN is involved), which makes
    /// every ordering comparison false.
    pub fn compare(&self, other: &Value, operation: &str) -> Result<Option<Ordering>> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    if !x.equals(y) {
                        return x.compare(y, operation);
                    }
                }
                Ok(Some(a.len().cmp(&b.len())))
            }
            _ => match (self.numeric(), other.numeric()) {
                (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => Ok(Some(a.cmp(&b))),
                (Some(a), Some(b)) => Ok(a.to_f64().partial_cmp(&b.to_f64())),
                _ => Err(self.unsupported(operation, other)),
            },
        }
    }
}

/// Repetition count for `*`; negative counts repeat zero times
fn repeat_count(count: &Value) -> usize {
    match count.numeric() {
        Some(Numeric::Int(n)) => usize::try_from(n).unwrap_or(0),
        _ => 0,
    }
}

/// Largest string (in bytes) or list a repetition may build
pub const MAX_REPEAT_LEN: usize = 1 << 28;

/// Length of `len` elements repeated `times`, or an overflow error past the cap
fn repeated_len(len: usize, times: usize) -> Result<usize> {
    len.checked_mul(times)
        .filter(|total| *total <= MAX_REPEAT_LEN)
        .ok_or_else(|| RuntimeError::overflow("*"))
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Integer(42).type_name(), "int");
        assert_eq!(Value::Float(42.5).type_name(), "float");
        assert_eq!(Value::Boolean(true).type_name(), "bool");
        assert_eq!(Value::String("hello".to_string()).type_name(), "str");
        assert_eq!(Value::None.type_name(), "NoneType");
    }

    #[test]
    fn test_truthiness() {
        assert!(Value::Boolean(true).is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::Integer(42).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(Value::Float(1.5).is_truthy());
        assert!(Value::String("hello".to_string()).is_truthy());
        assert!(!Value::String("".to_string()).is_truthy());
        assert!(!Value::List(vec![]).is_truthy());
        assert!(!Value::None.is_truthy());
    }

    #[test]
    fn test_arithmetic() {
        let a = Value::Integer(5);
        let b = Value::Integer(3);

        assert_eq!(a.add(&b).unwrap(), Value::Integer(8));
        assert_eq!(a.subtract(&b).unwrap(), Value::Integer(2));
        assert_eq!(a.multiply(&b).unwrap(), Value::Integer(15));
        assert_eq!(a.divide(&b).unwrap(), Value::Float(5.0 / 3.0));
        assert_eq!(a.floor_divide(&b).unwrap(), Value::Integer(1));
        assert_eq!(a.modulo(&b).unwrap(), Value::Integer(2));
        assert_eq!(a.power(&b).unwrap(), Value::Integer(125));
    }

    #[test]
    fn test_floor_semantics_follow_divisor_sign() {
        let cases = [(-7, 2, -4, 1), (7, -2, -4, -1), (-7, -2, 3, -1), (7, 2, 3, 1)];

        for (a, b, quotient, remainder) in cases {
            let (a, b) = (Value::Integer(a), Value::Integer(b));
            assert_eq!(a.floor_divide(&b).unwrap(), Value::Integer(quotient));
            assert_eq!(a.modulo(&b).unwrap(), Value::Integer(remainder));
        }

        assert_eq!(
            Value::Float(-7.5).modulo(&Value::Integer(2)).unwrap(),
            Value::Float(0.5)
        );
    }

    #[test]
    fn test_negative_exponent_gives_float() {
        assert_eq!(
            Value::Integer(2).power(&Value::Integer(-1)).unwrap(),
            Value::Float(0.5)
        );
    }

    #[test]
    fn test_mixed_numeric_arithmetic() {
        let int_val = Value::Integer(5);
        let float_val = Value::Float(2.5);

        assert_eq!(int_val.add(&float_val).unwrap(), Value::Float(7.5));
        assert_eq!(float_val.add(&int_val).unwrap(), Value::Float(7.5));
        assert_eq!(
            Value::Boolean(true).add(&Value::Integer(1)).unwrap(),
            Value::Integer(2)
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let max = Value::Integer(i64::MAX);
        assert!(matches!(
            max.add(&Value::Integer(1)),
            Err(RuntimeError::Overflow { .. })
        ));
        assert!(matches!(
            Value::Integer(i64::MIN).floor_divide(&Value::Integer(-1)),
            Err(RuntimeError::Overflow { .. })
        ));
    }

    #[test]
    fn test_huge_repetition_is_an_overflow() {
        let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
        let string = Value::String("ab".to_string());
        let huge = Value::Integer(i64::MAX);

        assert!(matches!(
            list.multiply(&huge),
            Err(RuntimeError::Overflow { .. })
        ));
        assert!(matches!(
            huge.multiply(&string),
            Err(RuntimeError::Overflow { .. })
        ));
        // Past the cap without overflowing usize
        assert!(matches!(
            string.multiply(&Value::Integer(MAX_REPEAT_LEN as i64)),
            Err(RuntimeError::Overflow { .. })
        ));
        assert_eq!(
            string.multiply(&Value::Integer(-3)).unwrap(),
            Value::String(String::new())
        );
    }

    #[test]
    fn test_sequence_operations() {
        let a = Value::String("ab".to_string());

        assert_eq!(
            a.add(&Value::String("c".to_string())).unwrap(),
            Value::String("abc".to_string())
        );
        assert_eq!(
            a.multiply(&Value::Integer(3)).unwrap(),
            Value::String("ababab".to_string())
        );
        assert_eq!(
            Value::Integer(2)
                .multiply(&Value::List(vec![Value::Integer(1)]))
                .unwrap(),
            Value::List(vec![Value::Integer(1), Value::Integer(1)])
        );
        assert!(a.add(&Value::Integer(1)).is_err());
    }

    #[test]
    fn test_equality() {
        assert!(Value::Integer(42).equals(&Value::Integer(42)));
        assert!(Value::Integer(5).equals(&Value::Float(5.0)));
        assert!(Value::Boolean(true).equals(&Value::Integer(1)));
        assert!(!Value::Integer(5).equals(&Value::String("5".to_string())));
        assert!(!Value::None.equals(&Value::Integer(0)));
    }

    #[test]
    fn test_ordering() {
        assert_eq!(
            Value::Integer(1).compare(&Value::Float(1.5), "<").unwrap(),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::List(vec![Value::Integer(1), Value::Integer(2)])
                .compare(&Value::List(vec![Value::Integer(1)]), "<")
                .unwrap(),
            Some(Ordering::Greater)
        );
        assert!(
            Value::Integer(1)
                .compare(&Value::String("a".to_string()), "<")
                .is_err()
        );
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Value::Float(3.0).to_string_repr(), "3.0");
        assert_eq!(Value::Boolean(false).to_string_repr(), "False");
        assert_eq!(
            Value::List(vec![Value::Integer(1), Value::String("a".to_string())]).to_string_repr(),
            "[1, 'a']"
        );
        assert_eq!(Value::String("a".to_string()).to_display_string(), "'a'");
        assert_eq!(Value::None.to_string_repr(), "None");
    }

    #[test]
    fn test_division_by_zero() {
        let a = Value::Integer(5);
        let zero = Value::Integer(0);

        assert!(matches!(
            a.divide(&zero),
            Err(RuntimeError::DivisionByZero { .. })
        ));
        assert!(matches!(
            a.modulo(&zero),
            Err(RuntimeError::DivisionByZero { .. })
        ));
    }
}
