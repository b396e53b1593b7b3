use axum::response::Json;

use crate::dto::{NumberConversionRequest, NumberConversionResponse};
use crate::error::Result;

/// Convert an integer between decimal, binary, octal and hexadecimal
///
/// @route POST /api/convert-number
#[utoipa::path(
    post,
    path = "/api/convert-number",
    request_body = NumberConversionRequest,
    responses(
        (status = 200, description = "Converted", body = NumberConversionResponse,
            example = json!({"original": "255", "converted": "FF", "from_base": "decimal", "to_base": "hexadecimal"})),
        (status = 400, description = "Unknown base or invalid numeral", body = common::ErrorResponse)
    ),
    tag = "calcsrv"
)]
pub async fn convert_number(
    Json(request): Json<NumberConversionRequest>,
) -> Result<Json<NumberConversionResponse>> {
    let converted = calc_engine::convert_named(&request.value, &request.from_base, &request.to_base)?;
    Ok(Json(NumberConversionResponse {
        original: request.value,
        converted,
        from_base: request.from_base,
        to_base: request.to_base,
    }))
}
