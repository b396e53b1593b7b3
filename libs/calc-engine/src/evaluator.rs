//! Mode-aware expression evaluation
//!
//! - `basic` / `financial`: numeric literals and `+ - * / ^ ( )`
//! - `scientific`: adds the functions and constants from [`crate::functions`]
//! - `programming`: basic arithmetic, result truncated and re-based

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalcError, Result};
use crate::functions::Scope;
use crate::number::{format_general, Number};
use crate::parser::parse;
use crate::radix::{format_integer, NumberSystem};

/// Significant digits used when rendering scientific results
pub const SCIENTIFIC_PRECISION: usize = 10;

/// Calculation category selecting the evaluation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Basic,
    Scientific,
    Financial,
    Programming,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Basic => "basic",
            Mode::Scientific => "scientific",
            Mode::Financial => "financial",
            Mode::Programming => "programming",
        }
    }

    fn scope(&self) -> Scope {
        match self {
            Mode::Scientific => Scope::Scientific,
            Mode::Basic | Mode::Financial | Mode::Programming => Scope::Arithmetic,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Mode::Basic),
            "scientific" => Ok(Mode::Scientific),
            "financial" => Ok(Mode::Financial),
            "programming" => Ok(Mode::Programming),
            other => Err(CalcError::evaluation(format!("Unsupported mode: {}", other))),
        }
    }
}

/// Evaluated expression with both renderings
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Raw numeric value
    pub value: Number,
    /// Plain string form of `value`
    pub result: String,
    /// Display form for the requested mode and number system
    pub formatted_result: String,
}

/// Evaluate an expression to a number
///
/// Scientific results are always floats; other modes keep integer results
/// exact where possible.
pub fn evaluate(expression: &str, mode: Mode) -> Result<Number> {
    let value = parse(expression, mode.scope())?.eval()?;

    if !value.as_f64().is_finite() {
        return Err(CalcError::evaluation("numeric result out of range"));
    }

    Ok(match mode {
        Mode::Scientific => Number::Float(value.as_f64()),
        _ => value,
    })
}

/// Evaluate and format according to mode and number system
///
/// The number system only affects programming mode. Non-decimal systems
/// truncate the result toward zero before re-basing.
pub fn evaluate_formatted(
    expression: &str,
    mode: Mode,
    number_system: NumberSystem,
) -> Result<Evaluation> {
    let value = evaluate(expression, mode)?;

    let formatted_result = match (mode, number_system) {
        (Mode::Scientific, _) => format_general(value.as_f64(), SCIENTIFIC_PRECISION),
        (Mode::Programming, NumberSystem::Decimal) => value.to_string(),
        (Mode::Programming, system) => format_integer(value.truncate()?, system),
        (Mode::Basic | Mode::Financial, _) => value.to_string(),
    };

    debug!(
        expression,
        mode = %mode,
        number_system = %number_system,
        result = %formatted_result,
        "evaluated"
    );

    Ok(Evaluation {
        value,
        result: value.to_string(),
        formatted_result,
    })
}
