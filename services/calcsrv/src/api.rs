//! HTTP handlers

pub mod bitwise_handlers;
pub mod calculation_handlers;
pub mod conversion_handlers;
pub mod financial_handlers;
pub mod health_handlers;
pub mod history_handlers;
