use std::sync::{Arc, Mutex, PoisonError};
use tokio::time::Instant;
use tracing::info;
use crate::models::notification::Notification;

/// Surfaces user facing outcome messages.
pub trait Notifier {
    fn show_notification(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn show_notification(&self, message: &str) {
        (**self).show_notification(message)
    }
}

/// Holds at most one transient notification. Opening a new one replaces the
/// current one; it disappears once its duration has elapsed or it is dismissed.
#[derive(Default)]
pub struct Snackbar {
    active: Mutex<Option<(Notification, Instant)>>,
}

impl Snackbar {
    pub fn open(&self, notification: Notification) {
        info!("Notification: {}", notification.message);
        *self.slot() = Some((notification, Instant::now()));
    }

    /// Returns whether there was a visible notification to dismiss.
    pub fn dismiss(&self) -> bool {
        let mut slot = self.slot();
        let was_visible = matches!(&*slot, Some((notification, opened)) if opened.elapsed() < notification.duration);
        *slot = None;
        was_visible
    }

    /// The notification currently on screen, if it has not expired.
    pub fn current(&self) -> Option<Notification> {
        let mut slot = self.slot();
        match &*slot {
            Some((notification, opened)) if opened.elapsed() < notification.duration => {
                Some(notification.clone())
            }
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<(Notification, Instant)>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for Snackbar {
    fn show_notification(&self, message: &str) {
        self.open(Notification::new(message));
    }
}
