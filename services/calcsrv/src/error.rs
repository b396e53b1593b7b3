//! calcsrv error types
//!
//! Domain failures from calc-engine map to 400, storage and configuration
//! failures to 500. Bodies use the shared `ErrorResponse` shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calc_engine::CalcError;
use common::AppError;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, CalcSrvError>;

#[derive(Error, Debug)]
pub enum CalcSrvError {
    #[error(transparent)]
    Calculation(#[from] CalcError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcSrvError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CalcSrvError::Calculation(_) => StatusCode::BAD_REQUEST,
            CalcSrvError::Storage(_) | CalcSrvError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for CalcSrvError {
    fn from(err: sqlx::Error) -> Self {
        CalcSrvError::Storage(err.to_string())
    }
}

impl IntoResponse for CalcSrvError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        AppError::new(status, self.to_string()).into_response()
    }
}
