// File: src/interpreter/operators.rs
//
// Binary operator semantics for the Vinyl interpreter.
//
// - `+` adds numbers; if either side is a string both sides are printed and joined
// - `-`, `*` work on numbers; bools count as 0 and 1, and int/bool
//   pairs stay int (checked for overflow)
// - `/` always divides as floats, and a zero divisor is an error
// - comparisons order numbers by exact value (3 == 3.0, true == 1) and
//   strings lexically; a string against anything else is a type error

use super::value::Value;
use crate::ast::BinaryOp;
use crate::errors::{Result, VinylError};
use std::cmp::Ordering;

pub fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match op {
        BinaryOp::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            Ok(Value::Str(format!("{}{}", left, right)))
        }
        BinaryOp::Add => arithmetic(op, left, right, i64::checked_add, |a, b| a + b),
        BinaryOp::Sub => arithmetic(op, left, right, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => arithmetic(op, left, right, i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => divide(left, right),
        BinaryOp::Eq => Ok(Value::Bool(order(op, left, right)? == Some(Ordering::Equal))),
        BinaryOp::NotEq => Ok(Value::Bool(order(op, left, right)? != Some(Ordering::Equal))),
        BinaryOp::Lt => Ok(Value::Bool(order(op, left, right)? == Some(Ordering::Less))),
        BinaryOp::Gt => Ok(Value::Bool(order(op, left, right)? == Some(Ordering::Greater))),
        BinaryOp::LtEq => Ok(Value::Bool(matches!(
            order(op, left, right)?,
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::GtEq => Ok(Value::Bool(matches!(
            order(op, left, right)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))),
    }
}

fn arithmetic(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    if let (Some(a), Some(b)) = (left.as_int(), right.as_int()) {
        return int_op(a, b)
            .map(Value::Int)
            .ok_or_else(|| VinylError::Overflow { op: op.symbol().to_string() });
    }
    let (a, b) = numeric_operands(op, left, right)?;
    Ok(Value::Float(float_op(a, b)))
}

fn numeric_operands(op: BinaryOp, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(unsupported(op, left, right)),
    }
}

fn divide(left: &Value, right: &Value) -> Result<Value> {
    let (a, b) = numeric_operands(BinaryOp::Div, left, right)?;
    if b == 0.0 {
        return Err(VinylError::DivisionByZero);
    }
    Ok(Value::Float(a / b))
}

/// Orders two comparable values; `None` only for NaN, which is unordered
fn order(op: BinaryOp, left: &Value, right: &Value) -> Result<Option<Ordering>> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        (Value::Float(a), Value::Float(b)) => Ok(a.partial_cmp(b)),
        (other, Value::Float(b)) => match other.as_int() {
            Some(a) => Ok(compare_int_float(a, *b)),
            None => Err(unsupported(op, left, right)),
        },
        (Value::Float(a), other) => match other.as_int() {
            Some(b) => Ok(compare_int_float(b, *a).map(Ordering::reverse)),
            None => Err(unsupported(op, left, right)),
        },
        _ => match (left.as_int(), right.as_int()) {
            (Some(a), Some(b)) => Ok(Some(a.cmp(&b))),
            _ => Err(unsupported(op, left, right)),
        },
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer through f64
fn compare_int_float(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    // 2^63 is exactly representable; every i64 lies in [-2^63, 2^63)
    let bound = 2f64.powi(63);
    if float >= bound {
        return Some(Ordering::Less);
    }
    if float < -bound {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(float - whole)),
        unequal => Some(unequal),
    }
}

fn unsupported(op: BinaryOp, left: &Value, right: &Value) -> VinylError {
    VinylError::type_error(format!(
        "unsupported operand types for '{}': {} and {}",
        op,
        left.type_name(),
        right.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
        apply_binary(op, &left, &right)
    }

    #[test]
    fn test_int_arithmetic_stays_int() {
        assert_eq!(apply(BinaryOp::Add, Value::Int(2), Value::Int(3)).unwrap(), Value::Int(5));
        assert_eq!(apply(BinaryOp::Mul, Value::Int(4), Value::Int(-3)).unwrap(), Value::Int(-12));
    }

    #[test]
    fn test_mixed_arithmetic_promotes_to_float() {
        assert_eq!(apply(BinaryOp::Sub, Value::Int(5), Value::Float(0.5)).unwrap(), Value::Float(4.5));
    }

    #[test]
    fn test_division_is_always_float() {
        assert_eq!(apply(BinaryOp::Div, Value::Int(7), Value::Int(2)).unwrap(), Value::Float(3.5));
        assert_eq!(apply(BinaryOp::Div, Value::Int(6), Value::Int(3)).unwrap(), Value::Float(2.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            apply(BinaryOp::Div, Value::Int(1), Value::Int(0)),
            Err(VinylError::DivisionByZero)
        ));
        assert!(matches!(
            apply(BinaryOp::Div, Value::Float(1.0), Value::Float(0.0)),
            Err(VinylError::DivisionByZero)
        ));
    }

    #[test]
    fn test_plus_coerces_toward_string() {
        assert_eq!(
            apply(BinaryOp::Add, Value::Str("a".into()), Value::Int(1)).unwrap(),
            Value::Str("a1".into())
        );
        assert_eq!(
            apply(BinaryOp::Add, Value::Float(1.0), Value::Str("x".into())).unwrap(),
            Value::Str("1.0x".into())
        );
    }

    #[test]
    fn test_minus_on_strings_is_type_error() {
        assert!(matches!(
            apply(BinaryOp::Sub, Value::Str("a".into()), Value::Int(1)),
            Err(VinylError::Type { .. })
        ));
    }

    #[test]
    fn test_bools_count_as_zero_and_one() {
        assert_eq!(apply(BinaryOp::Add, Value::Bool(true), Value::Int(1)).unwrap(), Value::Int(2));
        assert_eq!(apply(BinaryOp::Add, Value::Bool(true), Value::Bool(true)).unwrap(), Value::Int(2));
        assert_eq!(apply(BinaryOp::Mul, Value::Int(2), Value::Bool(true)).unwrap(), Value::Int(2));
        assert_eq!(apply(BinaryOp::Sub, Value::Bool(false), Value::Float(0.5)).unwrap(), Value::Float(-0.5));
        assert_eq!(apply(BinaryOp::Div, Value::Bool(true), Value::Int(4)).unwrap(), Value::Float(0.25));
        assert!(matches!(
            apply(BinaryOp::Div, Value::Int(1), Value::Bool(false)),
            Err(VinylError::DivisionByZero)
        ));
    }

    #[test]
    fn test_bools_compare_with_numbers() {
        assert_eq!(apply(BinaryOp::Eq, Value::Bool(true), Value::Int(1)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Lt, Value::Bool(true), Value::Int(2)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Eq, Value::Float(0.0), Value::Bool(false)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::NotEq, Value::Bool(true), Value::Float(1.5)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_int_float_comparison_is_exact() {
        // 2^53 + 1 has no f64 representation
        let big = Value::Int(9_007_199_254_740_993);
        let near = Value::Float(9_007_199_254_740_992.0);
        assert_eq!(apply(BinaryOp::Eq, big.clone(), near.clone()).unwrap(), Value::Bool(false));
        assert_eq!(apply(BinaryOp::Gt, big.clone(), near.clone()).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Lt, near, big).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Lt, Value::Int(-3), Value::Float(-2.5)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Gt, Value::Int(-2), Value::Float(-2.5)).unwrap(), Value::Bool(true));
        assert_eq!(
            apply(BinaryOp::Lt, Value::Int(i64::MAX), Value::Float(f64::INFINITY)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(apply(BinaryOp::Eq, Value::Int(0), Value::Float(f64::NAN)).unwrap(), Value::Bool(false));
        assert_eq!(apply(BinaryOp::NotEq, Value::Int(0), Value::Float(f64::NAN)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(
            apply(BinaryOp::Add, Value::Int(i64::MAX), Value::Int(1)),
            Err(VinylError::Overflow { .. })
        ));
    }

    #[test]
    fn test_comparisons_use_numeric_value() {
        assert_eq!(apply(BinaryOp::Eq, Value::Int(3), Value::Float(3.0)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Lt, Value::Int(2), Value::Float(2.5)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::GtEq, Value::Int(2), Value::Int(2)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::NotEq, Value::Int(2), Value::Int(2)).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_string_and_bool_comparisons() {
        assert_eq!(
            apply(BinaryOp::Lt, Value::Str("apple".into()), Value::Str("banana".into())).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(apply(BinaryOp::Gt, Value::Bool(true), Value::Bool(false)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_incompatible_comparison_is_type_error() {
        assert!(matches!(
            apply(BinaryOp::Eq, Value::Str("3".into()), Value::Int(3)),
            Err(VinylError::Type { .. })
        ));
        assert!(matches!(
            apply(BinaryOp::Lt, Value::Bool(true), Value::Str("a".into())),
            Err(VinylError::Type { .. })
        ));
        assert!(matches!(
            apply(BinaryOp::GtEq, Value::Float(1.0), Value::Str("1".into())),
            Err(VinylError::Type { .. })
        ));
    }
}
