//! Rendering of user notifications.

use std::fmt;

use crate::board::{Notification, NotificationLevel};

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.level {
            NotificationLevel::Info => "Success:",
            NotificationLevel::Error => "Error:",
        };
        writeln!(f, "{label} {}", self.message)
    }
}
