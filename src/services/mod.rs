//! Business logic services

pub mod csrf;
pub mod email;
pub mod notification;
pub mod redis;
pub mod session;
pub mod validation;

use std::sync::Arc;

use crate::models::location::LocationSet;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub locations: Arc<LocationSet>,
    pub notifications: notification::NotificationService,
}

impl Services {
    /// Wire services around the configured locations and collaborators
    pub fn new(locations: LocationSet, mailer: Arc<dyn email::Mailer>) -> Self {
        Self {
            locations: Arc::new(locations),
            notifications: notification::NotificationService::new(mailer),
        }
    }
}
