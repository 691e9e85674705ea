//! # Notification Services
//!
//! This crate provides transactional email delivery for the application.
//! It exposes a single [`EmailService`] capability with an AWS SES backend and
//! a logging backend for local development, plus the plain-text messages the
//! backend sends.

/// Plain-text messages sent to guests and to the operator mailbox.
pub mod messages;
/// Email service trait and its implementations.
pub mod service;
/// Types and errors used by the notification services.
pub mod types;

pub use service::{EmailService, LogEmailService, SesEmailService, SharedEmailService};
pub use types::{EmailMessage, NotificationError};
