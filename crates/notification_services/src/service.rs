use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ses::Client as SesClient;
use aws_sdk_ses::types::{Body, Content, Destination, Message};

use crate::types::{EmailMessage, NotificationError};

/// Capability to deliver a plain-text email.
///
/// Implementations return a provider message id on success.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends `body` to `to` with the given `subject`.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, NotificationError>;

    /// Sends a prepared [`EmailMessage`].
    async fn send_message(
        &self,
        to: &str,
        message: &EmailMessage,
    ) -> Result<String, NotificationError> {
        self.send_email(to, &message.subject, &message.body).await
    }
}

/// Email service shared between handlers.
pub type SharedEmailService = Arc<dyn EmailService>;

/// AWS SES email service implementation.
#[derive(Debug, Clone)]
pub struct SesEmailService {
    ses_client: SesClient,
    from_email: String,
}

impl SesEmailService {
    /// Creates a new SES service, loading AWS credentials and region from the environment.
    pub async fn new(from_email: &str) -> Result<Self, NotificationError> {
        if from_email.trim().is_empty() {
            return Err(NotificationError::Configuration(
                "sender address is empty".to_string(),
            ));
        }

        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        Ok(Self {
            ses_client: SesClient::new(&config),
            from_email: from_email.to_string(),
        })
    }
}

fn content(data: &str, part: &str) -> Result<Content, NotificationError> {
    Content::builder().data(data).build().map_err(|e| {
        log::error!("❌ Failed to build {} content: {}", part, e);
        NotificationError::SesError(format!("Failed to build {}: {}", part, e))
    })
}

#[async_trait]
impl EmailService for SesEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        if !to.contains('@') {
            return Err(NotificationError::InvalidEmail);
        }

        let message = Message::builder()
            .subject(content(subject, "subject")?)
            .body(Body::builder().text(content(body, "text body")?).build())
            .build();

        let destination = Destination::builder().to_addresses(to).build();

        log::info!("📧 Sending \"{}\" to {} via AWS SES", subject, to);

        let result = self
            .ses_client
            .send_email()
            .source(&self.from_email)
            .destination(destination)
            .message(message)
            .send()
            .await;

        match result {
            Ok(output) => {
                let message_id = output.message_id().to_string();
                log::info!("✅ Email sent to {} (SES Message ID: {})", to, message_id);
                Ok(message_id)
            }
            Err(e) => {
                log::error!("❌ AWS SES error: {:#?}", e);
                let error_msg = if let Some(service_error) = e.as_service_error() {
                    format!("AWS SES service error: {:?}", service_error)
                } else {
                    format!("AWS SES error: {}", e)
                };
                Err(NotificationError::SesError(error_msg))
            }
        }
    }
}

/// Email service that only writes messages to the log, for development.
#[derive(Debug, Clone, Default)]
pub struct LogEmailService;

#[async_trait]
impl EmailService for LogEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        log::info!("📧 [LOG EMAIL] To: {}", to);
        log::info!("📧 [LOG EMAIL] Subject: {}", subject);
        log::info!("📧 [LOG EMAIL] Body:\n{}", body);

        Ok(format!("log-email-{}", uuid::Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_email_service_returns_id() {
        let service = LogEmailService;
        let id = service
            .send_email("ops@example.com", "Subject", "Body")
            .await
            .unwrap();

        assert!(id.starts_with("log-email-"));
    }

    #[tokio::test]
    async fn test_send_message_uses_subject_and_body() {
        let service: SharedEmailService = Arc::new(LogEmailService);
        let message = EmailMessage::new("Hello", "World");

        assert!(service.send_message("ops@example.com", &message).await.is_ok());
    }

    #[tokio::test]
    async fn test_ses_service_rejects_empty_sender() {
        let result = SesEmailService::new("  ").await;
        assert!(matches!(result, Err(NotificationError::Configuration(_))));
    }
}
