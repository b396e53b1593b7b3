//! Shared building blocks for the calculator services
//!
//! - API error bodies ([`api_types`])
//! - logging setup and HTTP access logging ([`logging`])
//! - graceful shutdown ([`shutdown`])
//! - SQLite pool construction ([`sqlite`])

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub mod api_types;
pub mod logging;
pub mod shutdown;

pub use api_types::{ErrorInfo, ErrorResponse};

#[cfg(feature = "axum")]
pub use api_types::AppError;

pub use logging::LogConfig;
