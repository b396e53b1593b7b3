use axum::response::Json;
use calc_engine::{format_integer, BitwiseOp, NumberSystem};

use crate::dto::{BitwiseRequest, BitwiseResponse};
use crate::error::Result;

/// Apply a bitwise operator to two 64-bit integers
///
/// @route POST /api/bitwise
#[utoipa::path(
    post,
    path = "/api/bitwise",
    request_body = BitwiseRequest,
    responses(
        (status = 200, description = "Operation result", body = BitwiseResponse,
            example = json!({"operation": "XOR", "a": 12, "b": 10, "result": 6, "formatted_result": "110"})),
        (status = 400, description = "Unsupported operation or shift out of range", body = common::ErrorResponse)
    ),
    tag = "calcsrv"
)]
pub async fn bitwise(Json(request): Json<BitwiseRequest>) -> Result<Json<BitwiseResponse>> {
    let operation: BitwiseOp = request.operation.parse()?;
    let number_system: NumberSystem = request.number_system.parse()?;
    let result = operation.apply(request.a, request.b)?;

    Ok(Json(BitwiseResponse {
        operation: operation.to_string(),
        a: request.a,
        b: request.b,
        result,
        formatted_result: format_integer(result, number_system),
    }))
}
