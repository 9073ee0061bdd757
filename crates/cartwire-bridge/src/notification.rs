/// Severity of a user-visible notification.
///
/// Determines the banner styling on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationType {
    /// Indicates a successful operation. Default severity.
    #[default]
    Success,
    /// Indicates an error or failure.
    Error,
}

/// A notification payload intended for the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    /// The type/severity of the notification, determining its visual style.
    pub notification_type: NotificationType,
    /// The text content to display to the user.
    pub message: String,
}

impl NotificationMessage {
    /// Builds a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Success,
            message: message.into(),
        }
    }

    /// Builds an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Error,
            message: message.into(),
        }
    }
}
