// File: src/interpreter/value.rs
//
// Runtime value types for the Vinyl scripting language.
// Defines the four value kinds and the casts applied by typed declarations.

use crate::ast::TypeAnnotation;
use crate::errors::{Result, VinylError};
use std::fmt;

/// A runtime value, produced only during evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
        }
    }

    /// Integer view of ints and bools (`false` is 0, `true` is 1)
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Numeric view of every kind except strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            other => other.as_int().map(|n| n as f64),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
        }
    }

    /// Converts the value to a declared type.
    ///
    /// `int` truncates toward zero, `float` widens, `bool` tests truthiness
    /// and `string` takes the printed form. Strings are parsed for the
    /// numeric types; text that is not a number is a type error.
    pub fn cast(self, target: TypeAnnotation) -> Result<Value> {
        match target {
            TypeAnnotation::Int => self.to_int().map(Value::Int),
            TypeAnnotation::Float => self.to_float().map(Value::Float),
            TypeAnnotation::Bool => Ok(Value::Bool(self.is_truthy())),
            TypeAnnotation::String => Ok(match self {
                Value::Str(s) => Value::Str(s),
                other => Value::Str(other.to_string()),
            }),
        }
    }

    fn to_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(n) => float_to_int(*n),
            Value::Str(s) => s.trim().parse::<i64>().map_err(|_| {
                VinylError::type_error(format!("invalid literal for int: '{}'", s))
            }),
        }
    }

    fn to_float(&self) -> Result<f64> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::Float(n) => Ok(*n),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s.trim().parse::<f64>().map_err(|_| {
                VinylError::type_error(format!("could not convert string to float: '{}'", s))
            }),
        }
    }
}

fn float_to_int(n: f64) -> Result<i64> {
    if n.is_nan() {
        return Err(VinylError::type_error("cannot convert float NaN to int"));
    }
    let truncated = n.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if truncated < -(2f64.powi(63)) || truncated >= 2f64.powi(63) {
        return Err(VinylError::type_error(format!("cannot convert float {} to int", n)));
    }
    Ok(truncated as i64)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            // Integral floats keep one fractional digit: 9.0, not 9
            Value::Float(n) if n.is_finite() && n.fract() == 0.0 => {
                write!(f, "{:.1}", n)
            }
            Value::Float(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => f.write_str(s),
        }
    }
}
