use std::time::Duration;

/// How long a notification stays on screen unless dismissed.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);
pub const DISMISS_ACTION: &str = "Close";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalPosition {
    Top,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub action: String,
    pub duration: Duration,
    pub vertical_position: VerticalPosition,
}

impl Notification {
    /// A top-anchored notification with a `Close` action.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: DISMISS_ACTION.to_string(),
            duration: NOTIFICATION_DURATION,
            vertical_position: VerticalPosition::Top,
        }
    }
}
