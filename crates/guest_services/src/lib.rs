//! # Guest Services
//!
//! This crate provides types and services for the records guests leave with the business:
//! booking requests, feedback and contact-form messages.
//! It handles validation and the database operations for each of them.

/// Types for bookings, feedback and contact messages
mod guest_types;
pub use guest_types::*;

/// Booking persistence
mod booking_service;
pub use booking_service::*;

/// Service for feedback database operations
mod feedback_service;
pub use feedback_service::*;

/// Service for contact message database operations
mod contact_service;
pub use contact_service::*;
