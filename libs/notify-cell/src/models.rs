use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn new(level: NotificationLevel, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn success(message: &str) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: &str) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}
