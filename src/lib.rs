//! Catalog Actions
//!
//! Request forms reached from action buttons in the library catalog. A
//! request is routed to the staff of the location holding the item and
//! sent to them by email.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult, RequestError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
