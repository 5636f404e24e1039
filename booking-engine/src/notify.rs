//! Explicit dependency injection for UI notifications and the staff session
//!
//! The wizard and status machine receive a [`NotificationSink`] and an
//! [`AuthSession`] as constructor arguments instead of reading ambient
//! context.

use std::sync::Mutex;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// Sink for user-facing notifications (toasts/alerts in the console)
pub trait NotificationSink: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(NoticeLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Discards all notifications
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _level: NoticeLevel, _message: &str) {}
}

/// Forwards notifications to the tracing subscriber
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(target: "notify", "{message}"),
            NoticeLevel::Warn => tracing::warn!(target: "notify", "{message}"),
            NoticeLevel::Error => tracing::error!(target: "notify", "{message}"),
        }
    }
}

/// Records notifications for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(NoticeLevel, String)> {
        self.messages.lock().expect("sink lock poisoned").clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == NoticeLevel::Warn)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.messages
            .lock()
            .expect("sink lock poisoned")
            .push((level, message.to_string()));
    }
}

/// The authenticated staff member driving a wizard or status change
///
/// Permission checks are an opaque predicate; the engine never models
/// roles itself.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: u64,
    pub display_name: String,
    permissions: Vec<String>,
}

impl AuthSession {
    pub fn new(user_id: u64, display_name: impl Into<String>, permissions: Vec<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            permissions,
        }
    }

    /// Opaque authorization predicate ("*" grants everything)
    pub fn can(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == "*" || p == permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_captures_levels() {
        let sink = RecordingSink::new();
        sink.info("loaded");
        sink.warn("stale selection cleared");
        sink.error("network down");

        assert_eq!(sink.messages().len(), 3);
        assert_eq!(sink.warnings(), vec!["stale selection cleared"]);
    }

    #[test]
    fn test_auth_session_predicate() {
        let session = AuthSession::new(1, "Marta", vec!["reservations.write".to_string()]);
        assert!(session.can("reservations.write"));
        assert!(!session.can("reservations.delete"));

        let admin = AuthSession::new(2, "Root", vec!["*".to_string()]);
        assert!(admin.can("anything"));
    }
}
