//! Closed-form financial formulas

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// Compound interest: `A = P(1 + r/n)^(n*t)`
pub fn compound_interest(principal: f64, rate: f64, time: f64, periods_per_year: f64) -> f64 {
    principal * (1.0 + rate / periods_per_year).powf(periods_per_year * time)
}

/// Amortized payment per period
///
/// A zero rate degrades to straight division of the principal.
pub fn loan_payment(principal: f64, rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return principal / periods;
    }
    let growth = (1.0 + rate).powf(periods);
    principal * (rate * growth) / (growth - 1.0)
}

/// Present value: `PV = FV / (1 + r)^n`
pub fn present_value(future_value: f64, rate: f64, periods: f64) -> f64 {
    future_value / (1.0 + rate).powf(periods)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FinancialCalculation {
    CompoundInterest,
    LoanPayment,
    PresentValue,
}

impl FinancialCalculation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialCalculation::CompoundInterest => "compound_interest",
            FinancialCalculation::LoanPayment => "loan_payment",
            FinancialCalculation::PresentValue => "present_value",
        }
    }

    /// Evaluate the formula from named parameters
    ///
    /// `compound_interest` reads `principal`, `rate`, `time` and an optional
    /// `n` (alias `compounding_periods_per_year`, default 1).
    /// `loan_payment` reads `principal`, `rate`, `periods`.
    /// `present_value` reads `future_value`, `rate`, `periods`.
    pub fn compute(&self, parameters: &HashMap<String, f64>) -> Result<f64> {
        let value = match self {
            FinancialCalculation::CompoundInterest => {
                let n = parameters
                    .get("n")
                    .or_else(|| parameters.get("compounding_periods_per_year"))
                    .copied()
                    .unwrap_or(1.0);
                compound_interest(
                    required(parameters, "principal")?,
                    required(parameters, "rate")?,
                    required(parameters, "time")?,
                    n,
                )
            },
            FinancialCalculation::LoanPayment => loan_payment(
                required(parameters, "principal")?,
                required(parameters, "rate")?,
                required(parameters, "periods")?,
            ),
            FinancialCalculation::PresentValue => present_value(
                required(parameters, "future_value")?,
                required(parameters, "rate")?,
                required(parameters, "periods")?,
            ),
        };

        if !value.is_finite() {
            return Err(CalcError::invalid_parameter(format!(
                "{} produced a non-finite result (division by zero or overflow)",
                self.as_str()
            )));
        }
        Ok(value)
    }
}

impl fmt::Display for FinancialCalculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialCalculation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compound_interest" => Ok(FinancialCalculation::CompoundInterest),
            "loan_payment" => Ok(FinancialCalculation::LoanPayment),
            "present_value" => Ok(FinancialCalculation::PresentValue),
            other => Err(CalcError::unsupported_calculation(other)),
        }
    }
}

fn required(parameters: &HashMap<String, f64>, name: &str) -> Result<f64> {
    parameters
        .get(name)
        .copied()
        .ok_or_else(|| CalcError::missing_parameter(name))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_compound_interest() {
        let value = compound_interest(1000.0, 0.05, 2.0, 1.0);
        assert!((1100.0..=1110.0).contains(&value));
        assert!((value - 1102.5).abs() < 1e-9);

        // Monthly compounding beats annual
        assert!(compound_interest(1000.0, 0.05, 2.0, 12.0) > value);
    }

    #[test]
    fn test_present_value() {
        let value = present_value(1000.0, 0.05, 2.0);
        assert!((900.0..=920.0).contains(&value));
    }

    #[test]
    fn test_loan_payment() {
        assert_eq!(loan_payment(12000.0, 0.0, 12.0), 1000.0);

        // 100k over 360 months at 0.5% per month
        let payment = loan_payment(100_000.0, 0.005, 360.0);
        assert!((payment - 599.55).abs() < 0.01);
    }

    #[test]
    fn test_compute_from_parameters() {
        let calc: FinancialCalculation = "compound_interest".parse().unwrap();
        let value = calc
            .compute(&params(&[("principal", 1000.0), ("rate", 0.05), ("time", 2.0)]))
            .unwrap();
        assert!((value - 1102.5).abs() < 1e-9);

        let value = calc
            .compute(&params(&[
                ("principal", 1000.0),
                ("rate", 0.12),
                ("time", 1.0),
                ("n", 12.0),
            ]))
            .unwrap();
        assert!((value - 1126.825).abs() < 1e-3);
    }

    #[test]
    fn test_missing_parameter() {
        let err = FinancialCalculation::LoanPayment
            .compute(&params(&[("principal", 1000.0), ("rate", 0.05)]))
            .unwrap_err();
        assert_eq!(err, CalcError::MissingParameter("periods".to_string()));
    }

    #[test]
    fn test_unsupported_type() {
        let err = "npv".parse::<FinancialCalculation>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported calculation type: npv");
    }

    #[test]
    fn test_non_finite_result() {
        let err = FinancialCalculation::LoanPayment
            .compute(&params(&[("principal", 1000.0), ("rate", 0.0), ("periods", 0.0)]))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidParameter(_)));
    }
}
