//! Bitwise operations for programming mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
    /// Unary; the second operand is ignored
    Not,
    #[serde(rename = "LSHIFT")]
    LeftShift,
    #[serde(rename = "RSHIFT")]
    RightShift,
}

impl BitwiseOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BitwiseOp::And => "AND",
            BitwiseOp::Or => "OR",
            BitwiseOp::Xor => "XOR",
            BitwiseOp::Not => "NOT",
            BitwiseOp::LeftShift => "LSHIFT",
            BitwiseOp::RightShift => "RSHIFT",
        }
    }

    pub fn apply(&self, a: i64, b: i64) -> Result<i64> {
        match self {
            BitwiseOp::And => Ok(a & b),
            BitwiseOp::Or => Ok(a | b),
            BitwiseOp::Xor => Ok(a ^ b),
            BitwiseOp::Not => Ok(!a),
            BitwiseOp::LeftShift => {
                let shift = shift_count(b)?;
                let shifted = a << shift;
                if shifted >> shift != a {
                    return Err(CalcError::invalid_parameter(format!(
                        "{} << {} overflows a 64-bit integer",
                        a, b
                    )));
                }
                Ok(shifted)
            },
            // Arithmetic shift, rounds toward negative infinity
            BitwiseOp::RightShift => Ok(a >> shift_count(b)?),
        }
    }
}

fn shift_count(b: i64) -> Result<u32> {
    if b < 0 {
        return Err(CalcError::invalid_parameter("negative shift count"));
    }
    if b >= 64 {
        return Err(CalcError::invalid_parameter(format!(
            "shift count {} out of range (0-63)",
            b
        )));
    }
    Ok(b as u32)
}

impl fmt::Display for BitwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitwiseOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(BitwiseOp::And),
            "OR" => Ok(BitwiseOp::Or),
            "XOR" => Ok(BitwiseOp::Xor),
            "NOT" => Ok(BitwiseOp::Not),
            "LSHIFT" => Ok(BitwiseOp::LeftShift),
            "RSHIFT" => Ok(BitwiseOp::RightShift),
            _ => Err(CalcError::unsupported_operation(s)),
        }
    }
}
