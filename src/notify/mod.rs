//! Toast notifications for operation outcomes

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Broadcast feed of toasts. Toasts published with no subscriber are dropped.
#[derive(Clone)]
pub struct Toasts {
    tx: broadcast::Sender<Toast>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(ToastLevel::Error, message.into());
    }

    fn publish(&self, level: ToastLevel, message: String) {
        let toast = Toast {
            level,
            message,
            at: Utc::now(),
        };
        if self.tx.send(toast).is_err() {
            tracing::trace!("No toast subscribers");
        }
    }
}
