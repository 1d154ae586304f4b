//! SQLite storage implementation for ipdesk.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in `ipdesk-core`
//! and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. All mutations funnel through a single writer actor that executes
//! each job inside an immediate transaction, which is also what makes the
//! lock guard's read-check-write sequence atomic: the guard runs inside the
//! job, on the writer's connection, so two concurrent acquire attempts are
//! serialized and the loser sees the winner's write.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod applications;
pub mod child_accounts;
pub mod correspondence;
pub mod notes;
pub mod payments;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from ipdesk-core for convenience
pub use ipdesk_core::errors::{DatabaseError, Error, Result};
