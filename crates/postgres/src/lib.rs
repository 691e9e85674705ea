//! # Postgres
//!
//! This crate provides the PostgreSQL connection pool and schema bootstrap for the lodge backend.

/// Database client for the lodge backend.
pub mod database;
/// Table definitions applied at startup.
pub mod schema;
