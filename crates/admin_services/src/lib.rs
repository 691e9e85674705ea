//! # Admin Services
//!
//! This crate provides the administrator account for the lodge backend.
//! It includes login with JWT issuing, the bearer-token middleware guarding admin
//! routes, and the one-time-code password recovery flow.

/// JWT token handling for admin sessions.
pub mod jwt;
/// Middleware for request authentication on admin routes.
pub mod middleware;
/// One-time reset codes and their lifecycle on the admin record.
pub mod recovery;
/// Admin login, provisioning and password recovery operations.
pub mod service;
/// Persistence for admin records.
pub mod store;
/// Types and structures used in admin services.
pub mod types;

pub use service::{AdminService, AdminSettings};
pub use store::{AdminStore, MemoryAdminStore, PgAdminStore};
pub use types::AdminError;
