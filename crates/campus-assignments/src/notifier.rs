//! Best-effort notification dispatch.
//!
//! Delivery transports (mail, push, in-app) are external collaborators;
//! the core only defines the seam and a structured-log implementation.
//! Notifier failures are logged by the engine and never surfaced to
//! callers: at-most-once, fire-and-forget.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors a notifier implementation may report.
///
/// The engine only logs these; they never propagate.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// The transport rejected or dropped the message.
    #[error("Failed to deliver notification: {0}")]
    Delivery(String),

    /// The transport is not configured.
    #[error("Notifier configuration error: {0}")]
    Configuration(String),
}

/// A notification addressed to one recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Who receives the message (central user ID).
    pub recipient_id: Uuid,
    /// Recipient classification (e.g., "professor").
    pub recipient_type: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Message classification (e.g., "module_assignment").
    pub kind: String,
    /// Structured context for downstream consumers.
    pub metadata: serde_json::Value,
}

/// Delivery seam for assignment notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt to deliver one notification.
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError>;
}

/// Notifier that records deliveries in the structured log only.
///
/// Used when no transport is configured; the log line carries enough
/// context to verify what would have been sent.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        tracing::info!(
            recipient_id = %notification.recipient_id,
            recipient_type = %notification.recipient_type,
            kind = %notification.kind,
            title = %notification.title,
            "Notification delivered to log"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> Notification {
        Notification {
            recipient_id: Uuid::new_v4(),
            recipient_type: "professor".to_string(),
            title: "Module assigned".to_string(),
            message: "You have been assigned to a module".to_string(),
            kind: "module_assignment".to_string(),
            metadata: serde_json::json!({}),
        }
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notifier = LogNotifier;
        assert!(notifier.notify(&notification()).await.is_ok());
    }

    #[test]
    fn test_notification_serializes() {
        let value = serde_json::to_value(notification()).unwrap();
        assert_eq!(value["recipient_type"], "professor");
        assert_eq!(value["kind"], "module_assignment");
    }

    #[test]
    fn test_notifier_error_display() {
        let err = NotifierError::Delivery("timeout".to_string());
        assert_eq!(err.to_string(), "Failed to deliver notification: timeout");
    }
}
