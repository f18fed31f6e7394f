//! # tipsplit-db: Database Layer for Tipsplit
//!
//! This crate provides database access for Tipsplit.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tipsplit Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /calculations, GET /admin/dashboard)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tipsplit-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐    ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repository    │    │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │(calculation.rs) │    │ (embedded) │  │   │
//! │  │   │               │    │                 │    │            │  │   │
//! │  │   │ SqlitePool    │◄───│ Calculation     │    │ 001_create │  │   │
//! │  │   │ WAL mode      │    │ Repository      │    │ _calcs.sql │  │   │
//! │  │   └───────────────┘    └─────────────────┘    └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (DATABASE_PATH, default ./tipsplit.db)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The calculation record store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tipsplit_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./tipsplit.db")).await?;
//! let stats = db.calculations().aggregate().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CreateError, DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::calculation::CalculationRepository;
