//! SQLite storage implementation for Taxcase.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `taxcase-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! Every write goes through the single writer actor in [`db::write_actor`],
//! and each write job is one `IMMEDIATE` transaction.
//!
//! ```text
//!        core (domain, services)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod audit;
pub mod defects;
pub mod notices;
pub mod payments;
pub mod reconciliation;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use audit::AuditLogRepository;
pub use defects::DefectRepository;
pub use notices::NoticeRepository;
pub use payments::PaymentRepository;
pub use reconciliation::ReconciliationRepository;
pub use settings::SettingsRepository;

// Re-export from taxcase-core for convenience
pub use taxcase_core::errors::{DatabaseError, Error, Result};
