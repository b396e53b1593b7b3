use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::app_state::AppState;
use crate::dto::{CalculationRequest, CalculationResponse};

/// Evaluate an expression and record it in the session history
///
/// Evaluation errors do not change the status code: the body carries
/// `result = "Error"` and the message in `error`.
///
/// @route POST /api/calculate
/// @input Json<CalculationRequest>
/// @output Json<CalculationResponse>
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Evaluated, or failed with `error` set", body = CalculationResponse,
            example = json!({
                "result": "12.0",
                "formatted_result": "12",
                "expression": "sqrt(16) + 2^3",
                "mode": "scientific",
                "number_system": "decimal",
                "timestamp": "2026-01-05T09:12:44.809123Z",
                "calculation_id": "3f1c1c3e-8f47-4f4e-9b56-0a3c0c8f9d11",
                "error": null
            })
        )
    ),
    tag = "calcsrv"
)]
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CalculationRequest>,
) -> Json<CalculationResponse> {
    Json(state.dispatcher.calculate(request).await)
}
