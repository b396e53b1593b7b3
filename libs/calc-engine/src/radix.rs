//! Number system conversion
//!
//! Values pass through a signed 64-bit integer: parse in the source base,
//! format in the target base. Output is unprefixed and hex digits are
//! uppercase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum NumberSystem {
    Decimal,
    Binary,
    Octal,
    Hexadecimal,
}

impl NumberSystem {
    pub fn radix(&self) -> u32 {
        match self {
            NumberSystem::Decimal => 10,
            NumberSystem::Binary => 2,
            NumberSystem::Octal => 8,
            NumberSystem::Hexadecimal => 16,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberSystem::Decimal => "decimal",
            NumberSystem::Binary => "binary",
            NumberSystem::Octal => "octal",
            NumberSystem::Hexadecimal => "hexadecimal",
        }
    }

    fn prefix(&self) -> Option<&'static str> {
        match self {
            NumberSystem::Decimal => None,
            NumberSystem::Binary => Some("0b"),
            NumberSystem::Octal => Some("0o"),
            NumberSystem::Hexadecimal => Some("0x"),
        }
    }
}

impl fmt::Display for NumberSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decimal" => Ok(NumberSystem::Decimal),
            "binary" => Ok(NumberSystem::Binary),
            "octal" => Ok(NumberSystem::Octal),
            "hexadecimal" => Ok(NumberSystem::Hexadecimal),
            other => Err(CalcError::conversion(format!("Unsupported base: {}", other))),
        }
    }
}

/// Convert `value` between number systems given by name
pub fn convert_named(value: &str, from_base: &str, to_base: &str) -> Result<String> {
    let from: NumberSystem = from_base.parse()?;
    let to: NumberSystem = to_base.parse()?;
    convert(value, from, to)
}

pub fn convert(value: &str, from: NumberSystem, to: NumberSystem) -> Result<String> {
    let parsed = parse_integer(value, from)?;
    Ok(format_integer(parsed, to))
}

/// Parse a numeral in `system`
///
/// Decimal input accepts any float literal and truncates toward zero.
/// Other systems accept an optional sign, an optional matching prefix
/// (`0x`, `0o`, `0b`) and `_` between digits.
pub fn parse_integer(value: &str, system: NumberSystem) -> Result<i64> {
    let text = value.trim();
    match system {
        NumberSystem::Decimal => parse_decimal(text),
        _ => parse_radix(text, system),
    }
}

fn parse_decimal(text: &str) -> Result<i64> {
    if let Ok(i) = text.parse::<i64>() {
        return Ok(i);
    }

    let float: f64 = text.parse().map_err(|_| {
        CalcError::conversion(format!("could not convert string to float: '{}'", text))
    })?;
    if !float.is_finite() {
        return Err(CalcError::conversion(format!(
            "cannot convert float {} to integer",
            text
        )));
    }
    let truncated = float.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(CalcError::conversion(format!("value out of range: {}", text)));
    }
    Ok(truncated as i64)
}

fn parse_radix(text: &str, system: NumberSystem) -> Result<i64> {
    let invalid = || {
        CalcError::conversion(format!(
            "invalid literal for base {}: '{}'",
            system.radix(),
            text
        ))
    };

    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let rest = match (system.prefix(), rest.get(..2), rest.get(2..)) {
        (Some(prefix), Some(head), Some(tail))
            if !tail.is_empty() && head.eq_ignore_ascii_case(prefix) =>
        {
            tail.trim_start_matches('_')
        },
        _ => rest,
    };

    if rest.is_empty()
        || rest.starts_with('_')
        || rest.ends_with('_')
        || rest.contains("__")
        || !rest.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        return Err(invalid());
    }

    let digits: String = rest.chars().filter(|c| *c != '_').collect();
    let magnitude = u64::from_str_radix(&digits, system.radix()).map_err(|_| invalid())?;

    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(CalcError::conversion(format!("value out of range: {}", text)));
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude)
            .map_err(|_| CalcError::conversion(format!("value out of range: {}", text)))
    }
}

/// Format an integer in `system`, negative values as `-` plus magnitude
pub fn format_integer(value: i64, system: NumberSystem) -> String {
    let magnitude = value.unsigned_abs();
    let digits = match system {
        NumberSystem::Decimal => magnitude.to_string(),
        NumberSystem::Binary => format!("{:b}", magnitude),
        NumberSystem::Octal => format!("{:o}", magnitude),
        NumberSystem::Hexadecimal => format!("{:X}", magnitude),
    };
    if value < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}
