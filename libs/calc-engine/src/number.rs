//! Numeric values produced by the evaluator
//!
//! Integer arithmetic stays exact while it fits in `i64` and falls back to
//! `f64` on overflow. Division always yields a float.

use std::fmt;

use crate::error::{CalcError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Truncate toward zero into an `i64`
    pub fn truncate(self) -> Result<i64> {
        match self {
            Number::Int(i) => Ok(i),
            Number::Float(f) => float_to_i64(f),
        }
    }

    pub fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Number::Float(a as f64 + b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(b)
                .map_or_else(|| Number::Float(a as f64 - b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }

    pub fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map_or_else(|| Number::Float(a as f64 * b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }

    pub fn div(self, rhs: Number) -> Result<Number> {
        let divisor = rhs.as_f64();
        if divisor == 0.0 {
            return Err(CalcError::evaluation("division by zero"));
        }
        Ok(Number::Float(self.as_f64() / divisor))
    }

    pub fn neg(self) -> Number {
        match self {
            Number::Int(i) => i
                .checked_neg()
                .map_or_else(|| Number::Float(-(i as f64)), Number::Int),
            Number::Float(f) => Number::Float(-f),
        }
    }

    /// Exponentiation
    ///
    /// Integer base with a non-negative integer exponent stays an integer
    /// while the result fits.
    pub fn pow(self, exponent: Number) -> Result<Number> {
        if let (Number::Int(base), Number::Int(exp)) = (self, exponent) {
            if exp >= 0 {
                if let Some(value) = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e)) {
                    return Ok(Number::Int(value));
                }
            }
        }

        let base = self.as_f64();
        let exp = exponent.as_f64();

        if base == 0.0 && exp < 0.0 {
            return Err(CalcError::evaluation(
                "0.0 cannot be raised to a negative power",
            ));
        }
        if base < 0.0 && exp.fract() != 0.0 {
            return Err(CalcError::evaluation(
                "negative number cannot be raised to a fractional power",
            ));
        }

        let value = base.powf(exp);
        if !value.is_finite() {
            return Err(CalcError::evaluation("numeric result out of range"));
        }
        Ok(Number::Float(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

/// Plain numeric-to-string conversion
///
/// Integers print without a fraction, floats always carry one (`4` vs `4.0`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

pub(crate) fn float_to_i64(value: f64) -> Result<i64> {
    if !value.is_finite() {
        return Err(CalcError::evaluation(format!(
            "cannot convert float {} to integer",
            format_float(value)
        )));
    }
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(CalcError::evaluation(format!(
            "integer value out of range: {}",
            format_float(value)
        )));
    }
    Ok(truncated as i64)
}

/// Shortest round-trip float representation
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        return exponent_form(&format!("{:e}", value));
    }
    if value.fract() == 0.0 {
        return format!("{:.1}", value);
    }
    format!("{}", value)
}

/// General-precision notation with `precision` significant digits (`%.Ng`)
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let mantissa = trim_fraction(mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Rewrite Rust's `1.5e-7` as `1.5e-07`
fn exponent_form(raw: &str) -> String {
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        },
        None => raw.to_string(),
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
