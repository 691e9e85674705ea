//! # Web Handlers for the Lodge Backend
//!
//! This crate provides the HTTP handlers for bookings, feedback, contact messages
//! and the admin account.

/// Admin login and password recovery handlers
mod admin_handlers;
pub use admin_handlers::*;

/// Booking handlers
mod booking_handlers;
pub use booking_handlers::*;

/// Feedback and moderation handlers
mod feedback_handlers;
pub use feedback_handlers::*;

/// Contact form handlers
mod contact_handlers;
pub use contact_handlers::*;

/// Request body configuration shared by all routes
mod json_config;
pub use json_config::*;
