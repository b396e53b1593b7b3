//! Route table

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;

use crate::api::bitwise_handlers::bitwise;
use crate::api::calculation_handlers::calculate;
use crate::api::conversion_handlers::convert_number;
use crate::api::financial_handlers::financial_calculation;
use crate::api::health_handlers::health_check;
use crate::api::history_handlers::{clear_history, get_history};
use crate::app_state::AppState;

#[cfg(feature = "swagger-ui")]
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health_handlers::health_check,
        crate::api::calculation_handlers::calculate,
        crate::api::conversion_handlers::convert_number,
        crate::api::financial_handlers::financial_calculation,
        crate::api::bitwise_handlers::bitwise,
        crate::api::history_handlers::get_history,
        crate::api::history_handlers::clear_history
    ),
    components(
        schemas(
            crate::dto::HealthResponse,
            crate::dto::CalculationRequest,
            crate::dto::CalculationResponse,
            crate::dto::NumberConversionRequest,
            crate::dto::NumberConversionResponse,
            crate::dto::FinancialCalculationRequest,
            crate::dto::FinancialCalculationResponse,
            crate::dto::BitwiseRequest,
            crate::dto::BitwiseResponse,
            crate::dto::HistoryResponse,
            crate::dto::ClearHistoryResponse,
            crate::history::CalculationRecord,
            common::ErrorResponse,
            common::ErrorInfo
        )
    ),
    tags(
        (name = "calcsrv", description = "Calculator API")
    )
)]
pub struct CalcsrvApiDoc;

pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/calculate", post(calculate))
        .route("/api/convert-number", post(convert_number))
        .route("/api/financial-calculation", post(financial_calculation))
        .route("/api/bitwise", post(bitwise))
        .route(
            "/api/history/{session_id}",
            get(get_history).delete(clear_history),
        )
        .layer(axum::middleware::from_fn(common::logging::http_request_logger))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
