//! HTTP surface of the school recycle bin.
//!
//! This crate provides:
//! - Recycle-bin listing, restore and hard delete
//! - The audit history query
//! - Entity reads and single-item soft delete
//! - Configuration loading and backend wiring

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::Actor;
pub use config::AppConfig;
pub use error::{HttpError, HttpResult};
pub use routes::create_router;
pub use state::AppState;
