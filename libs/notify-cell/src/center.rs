use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::Notification;

/// How long a displayed notification lives before `dismiss_expired`
/// drops it.
pub const DISPLAY_TTL_SECONDS: i64 = 5;

/// Delivery port. The embedding interface implements this to render
/// notifications however it likes.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: &Notification);
}

/// Default sink that drops everything; useful until an interface
/// injects a real one.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn deliver(&self, _notification: &Notification) {}
}

/// Queue with an explicit lifecycle: enqueue, display (drain to the
/// sink), dismiss by id or by age. Shareable via `Arc`; interior
/// mutability keeps the API `&self`.
pub struct NotificationCenter {
    queue: Mutex<VecDeque<Notification>>,
    displayed: Mutex<Vec<Notification>>,
    sink: Mutex<Arc<dyn NotificationSink>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            displayed: Mutex::new(Vec::new()),
            sink: Mutex::new(Arc::new(NullSink)),
        }
    }

    pub fn set_sink(&self, sink: Arc<dyn NotificationSink>) {
        if let Ok(mut current) = self.sink.lock() {
            *current = sink;
        }
    }

    pub fn success(&self, message: &str) -> Uuid {
        self.enqueue(Notification::success(message))
    }

    pub fn warning(&self, message: &str) -> Uuid {
        self.enqueue(Notification::warning(message))
    }

    pub fn error(&self, message: &str) -> Uuid {
        self.enqueue(Notification::error(message))
    }

    fn enqueue(&self, notification: Notification) -> Uuid {
        let id = notification.id;
        debug!("Notification queued: {:?} {}", notification.level, notification.message);
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(notification);
        }
        id
    }

    /// Drains the queue through the sink, moving every notification to
    /// the displayed set. Returns how many were delivered.
    pub fn display(&self) -> usize {
        let drained: Vec<Notification> = match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => return 0,
        };
        if drained.is_empty() {
            return 0;
        }

        let sink = match self.sink.lock() {
            Ok(sink) => sink.clone(),
            Err(_) => return 0,
        };
        for notification in &drained {
            sink.deliver(notification);
        }

        let count = drained.len();
        if let Ok(mut displayed) = self.displayed.lock() {
            displayed.extend(drained);
        }
        count
    }

    /// Removes one displayed notification, as when the user closes it.
    pub fn dismiss(&self, id: Uuid) -> bool {
        if let Ok(mut displayed) = self.displayed.lock() {
            let before = displayed.len();
            displayed.retain(|notification| notification.id != id);
            return displayed.len() < before;
        }
        false
    }

    /// Auto-dismisses displayed notifications older than the TTL.
    pub fn dismiss_expired(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::seconds(DISPLAY_TTL_SECONDS);
        if let Ok(mut displayed) = self.displayed.lock() {
            let before = displayed.len();
            displayed.retain(|notification| notification.created_at > cutoff);
            return before - displayed.len();
        }
        0
    }

    pub fn pending(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn displayed(&self) -> Vec<Notification> {
        self.displayed
            .lock()
            .map(|displayed| displayed.clone())
            .unwrap_or_default()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
