//! calc-engine - Calculation library for calcsrv
//!
//! Evaluates calculator expressions without handing any text to a host
//! evaluator: input is tokenized, parsed by a recursive-descent parser and
//! resolved against a fixed symbol table.
//!
//! # Example
//!
//! ```rust
//! use calc_engine::{evaluate, evaluate_formatted, Mode, Number, NumberSystem};
//!
//! assert_eq!(evaluate("(10 + 5) * 2", Mode::Basic).unwrap(), Number::Int(30));
//!
//! let eval = evaluate_formatted("255", Mode::Programming, NumberSystem::Hexadecimal).unwrap();
//! assert_eq!(eval.formatted_result, "FF");
//!
//! let eval = evaluate_formatted("sqrt(2)", Mode::Scientific, NumberSystem::Decimal).unwrap();
//! assert_eq!(eval.formatted_result, "1.414213562");
//! ```
//!
//! # Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`evaluator`] | Mode selection and result formatting |
//! | [`parser`] / [`lexer`] | Expression grammar |
//! | [`functions`] | Scientific allow-list |
//! | [`radix`] | Number system conversion |
//! | [`finance`] | Compound interest, loan payment, present value |
//! | [`bitwise`] | AND / OR / XOR / NOT / shifts |

pub mod bitwise;
pub mod error;
pub mod evaluator;
pub mod finance;
pub mod functions;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod radix;

// Re-exports for convenience
pub use bitwise::BitwiseOp;
pub use error::{CalcError, Result};
pub use evaluator::{evaluate, evaluate_formatted, Evaluation, Mode};
pub use finance::{compound_interest, loan_payment, present_value, FinancialCalculation};
pub use number::{format_general, Number};
pub use radix::{convert, convert_named, format_integer, parse_integer, NumberSystem};
