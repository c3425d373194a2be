//! User-facing notifications as an injected port. The engine enqueues;
//! whatever interface embeds it decides how a notification is shown.

pub mod center;
pub mod models;

pub use center::{NotificationCenter, NotificationSink, NullSink, DISPLAY_TTL_SECONDS};
pub use models::{Notification, NotificationLevel};
