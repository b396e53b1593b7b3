//! Built-in names for scientific expressions
//!
//! Every identifier the evaluator accepts is listed here. Lookup is by whole
//! token, so `exp` and `e` are distinct entries.
//!
//! | Name | Arity | Meaning |
//! |------|-------|---------|
//! | `sin`, `cos`, `tan` | 1 | Trigonometry in radians |
//! | `log` | 1 | Base-10 logarithm |
//! | `ln` | 1 | Natural logarithm |
//! | `sqrt` | 1 | Square root |
//! | `exp` | 1 | e^x |
//! | `abs` | 1 | Absolute value |
//! | `pow` | 2 | Same as `^` |
//! | `round` | 1 or 2 | Half-to-even rounding, optional decimals |
//! | `pi`, `e` | constant | |

use crate::error::{CalcError, Result};
use crate::number::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Sqrt,
    Exp,
    Abs,
    Pow,
    Round,
}

const FUNCTIONS: &[(&str, Function)] = &[
    ("sin", Function::Sin),
    ("cos", Function::Cos),
    ("tan", Function::Tan),
    ("log", Function::Log10),
    ("ln", Function::Ln),
    ("sqrt", Function::Sqrt),
    ("exp", Function::Exp),
    ("abs", Function::Abs),
    ("pow", Function::Pow),
    ("round", Function::Round),
];

const CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

/// Set of names visible to an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Numeric literals and operators only
    Arithmetic,
    /// Arithmetic plus the scientific functions and constants
    Scientific,
}

impl Scope {
    pub fn function(self, name: &str) -> Option<Function> {
        match self {
            Scope::Arithmetic => None,
            Scope::Scientific => FUNCTIONS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, f)| *f),
        }
    }

    pub fn constant(self, name: &str) -> Option<f64> {
        match self {
            Scope::Arithmetic => None,
            Scope::Scientific => CONSTANTS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v),
        }
    }
}

impl Function {
    pub fn name(self) -> &'static str {
        FUNCTIONS
            .iter()
            .find(|(_, f)| *f == self)
            .map_or("?", |(n, _)| n)
    }

    fn arity(self) -> (usize, usize) {
        match self {
            Function::Pow => (2, 2),
            Function::Round => (1, 2),
            _ => (1, 1),
        }
    }

    pub fn call(self, args: &[Number]) -> Result<Number> {
        let (min, max) = self.arity();
        if args.len() < min || args.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{} to {}", min, max)
            };
            return Err(CalcError::evaluation(format!(
                "{}() takes {} argument(s), got {}",
                self.name(),
                expected,
                args.len()
            )));
        }

        let x = args[0].as_f64();
        let value = match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Log10 => {
                ensure_positive(self, x)?;
                x.log10()
            },
            Function::Ln => {
                ensure_positive(self, x)?;
                x.ln()
            },
            Function::Sqrt => {
                if x < 0.0 {
                    return Err(domain_error(self));
                }
                x.sqrt()
            },
            Function::Exp => x.exp(),
            Function::Abs => {
                return Ok(match args[0] {
                    Number::Int(i) => i
                        .checked_abs()
                        .map_or_else(|| Number::Float((i as f64).abs()), Number::Int),
                    Number::Float(f) => Number::Float(f.abs()),
                });
            },
            Function::Pow => return args[0].pow(args[1]),
            Function::Round => return round(args),
        };

        if !value.is_finite() {
            return Err(CalcError::evaluation(format!(
                "{}(): numeric result out of range",
                self.name()
            )));
        }
        Ok(Number::Float(value))
    }
}

fn ensure_positive(function: Function, x: f64) -> Result<()> {
    if x <= 0.0 {
        Err(domain_error(function))
    } else {
        Ok(())
    }
}

fn domain_error(function: Function) -> CalcError {
    CalcError::evaluation(format!("{}(): math domain error", function.name()))
}

/// `round(x)` returns an integer, `round(x, n)` a float with `n` decimals
fn round(args: &[Number]) -> Result<Number> {
    match args {
        [Number::Int(i)] => Ok(Number::Int(*i)),
        [x] => {
            let rounded = x.as_f64().round_ties_even();
            Ok(crate::number::float_to_i64(rounded)
                .map_or(Number::Float(rounded), Number::Int))
        },
        [x, decimals] => {
            let decimals = match decimals {
                Number::Int(d) => *d,
                Number::Float(f) if f.fract() == 0.0 => *f as i64,
                Number::Float(_) => {
                    return Err(CalcError::evaluation(
                        "round(): decimals must be an integer",
                    ))
                },
            };
            let decimals = decimals.clamp(-308, 308) as i32;
            let factor = 10f64.powi(decimals);
            let value = x.as_f64();
            let scaled = value * factor;
            if !scaled.is_finite() {
                return Ok(Number::Float(value));
            }
            Ok(Number::Float(scaled.round_ties_even() / factor))
        },
        _ => Err(CalcError::evaluation("round() takes 1 to 2 argument(s)")),
    }
}
