//! User-facing notifications and analytics events produced by the claim flow.

use serde::Serialize;
use tracing::info;

use crate::error::ClaimError;

pub const REGISTERED_MESSAGE: &str = "Your name has been registered!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// One transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    /// Render without the usual width cap.
    pub wide: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            wide: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            wide: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl From<&ClaimError> for Notification {
    fn from(err: &ClaimError) -> Self {
        Self {
            level: Level::Error,
            message: err.to_string(),
            wide: err.is_wide(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            Level::Success => write!(f, "✔ {}", self.message),
            Level::Error => write!(f, "✘ {}", self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalyticsEvent {
    ClaimSuccess,
    ClaimFail,
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::ClaimSuccess => "Claim success",
            AnalyticsEvent::ClaimFail => "Claim fail",
        }
    }
}

/// Emit an analytics event as a structured log record.
pub fn record(event: AnalyticsEvent) {
    info!(target: "subclaim::analytics", event = event.name(), "analytics event");
}
