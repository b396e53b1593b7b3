use axum::response::Json;
use calc_engine::FinancialCalculation;

use crate::dto::{FinancialCalculationRequest, FinancialCalculationResponse};
use crate::error::Result;

/// Run one of the closed-form financial formulas
///
/// - `compound_interest`: principal, rate, time, optional n (default 1)
/// - `loan_payment`: principal, rate, periods
/// - `present_value`: future_value, rate, periods
#[utoipa::path(
    post,
    path = "/api/financial-calculation",
    request_body = FinancialCalculationRequest,
    responses(
        (status = 200, description = "Formula result", body = FinancialCalculationResponse),
        (status = 400, description = "Unsupported type, missing or invalid parameter", body = common::ErrorResponse)
    ),
    tag = "calcsrv"
)]
pub async fn financial_calculation(
    Json(request): Json<FinancialCalculationRequest>,
) -> Result<Json<FinancialCalculationResponse>> {
    let calculation: FinancialCalculation = request.calculation_type.parse()?;
    let result = calculation.compute(&request.parameters)?;
    Ok(Json(FinancialCalculationResponse {
        calculation_type: request.calculation_type,
        result,
        parameters: request.parameters,
    }))
}
