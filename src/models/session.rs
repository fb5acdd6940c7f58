//! Session-stored types: flash messages and cached form values

use serde::{Deserialize, Serialize};

/// Bootstrap alert level of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

/// Session keys for per-client state
pub mod keys {
    /// Last values submitted to the schedule for use form
    pub const CATALOG_SCHEDULE: &str = "catalog_schedule";

    /// Messages to show on the next rendered page
    pub const FLASH: &str = "flash";

    /// Token expected back from form posts
    pub const CSRF_TOKEN: &str = "csrf_token";
}
