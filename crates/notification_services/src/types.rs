/// Errors raised while dispatching notifications.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Simple email service (SES) errors.
    #[error("AWS SES error: {0}")]
    SesError(String),

    /// The service was built without a required setting.
    #[error("Notification configuration error: {0}")]
    Configuration(String),

    /// Invalid email format.
    #[error("Invalid email format")]
    InvalidEmail,
}

/// A plain-text email ready to be handed to an [`crate::EmailService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl EmailMessage {
    /// Builds a message from a subject and a body.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}
