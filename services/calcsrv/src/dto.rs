//! Request and response bodies for the HTTP API

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::history::CalculationRecord;

fn default_mode() -> String {
    "basic".to_string()
}

fn default_number_system() -> String {
    "decimal".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Mode and number system stay strings so an unknown value is reported in
/// the response body rather than rejected by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"expression": "sqrt(16) + 2^3", "mode": "scientific"}))]
pub struct CalculationRequest {
    pub expression: String,
    /// basic, scientific, financial or programming
    #[serde(default = "default_mode")]
    pub mode: String,
    /// decimal, binary, octal or hexadecimal; only programming mode uses it
    #[serde(default = "default_number_system")]
    pub number_system: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculationResponse {
    /// Plain value, or `"Error"`
    pub result: String,
    /// Display value, or `"Error"`
    pub formatted_result: String,
    pub expression: String,
    pub mode: String,
    pub number_system: String,
    pub timestamp: String,
    pub calculation_id: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"value": "255", "from_base": "decimal", "to_base": "hexadecimal"}))]
pub struct NumberConversionRequest {
    pub value: String,
    pub from_base: String,
    pub to_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NumberConversionResponse {
    pub original: String,
    pub converted: String,
    pub from_base: String,
    pub to_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "calculation_type": "compound_interest",
    "parameters": {"principal": 1000.0, "rate": 0.05, "time": 2.0, "n": 12.0}
}))]
pub struct FinancialCalculationRequest {
    /// compound_interest, loan_payment or present_value
    pub calculation_type: String,
    pub parameters: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinancialCalculationResponse {
    pub calculation_type: String,
    pub result: f64,
    pub parameters: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"a": 12, "b": 10, "operation": "XOR", "number_system": "binary"}))]
pub struct BitwiseRequest {
    pub a: i64,
    /// Ignored by NOT; shift count for LSHIFT/RSHIFT
    #[serde(default)]
    pub b: i64,
    /// AND, OR, XOR, NOT, LSHIFT or RSHIFT
    pub operation: String,
    #[serde(default = "default_number_system")]
    pub number_system: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BitwiseResponse {
    pub operation: String,
    pub a: i64,
    pub b: i64,
    pub result: i64,
    pub formatted_result: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Maximum number of records, newest first
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub session_id: String,
    pub history: Vec<CalculationRecord>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearHistoryResponse {
    pub session_id: String,
    pub deleted_count: u64,
}
