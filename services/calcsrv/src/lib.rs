//! calcsrv - calculator HTTP service
//!
//! Evaluates basic, scientific, financial and programming-mode expressions
//! through `calc-engine`, converts between number systems, runs financial
//! formulas and keeps a per-session calculation history.

pub mod api;
pub mod app_state;
pub mod config;
pub mod dispatcher;
pub mod dto;
pub mod error;
pub mod history;
pub mod routes;

pub use app_state::AppState;
pub use config::Config;
pub use error::{CalcSrvError, Result};
pub use routes::create_routes;
