//! SQLite connection management

pub mod client;

pub use client::{SqliteClient, SqlitePool};
