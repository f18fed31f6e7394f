//! # Repository Module
//!
//! Database repository implementations for Tipsplit.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler / service                                                │
//! │       │                                                                 │
//! │       │  db.calculations().list(SortKey::BillAmount, Desc, 0, 20)      │
//! │       ▼                                                                 │
//! │  CalculationRepository                                                 │
//! │  ├── create(&self, candidate)      validate + insert                   │
//! │  ├── list(&self, sort, dir, ...)   one dashboard page                  │
//! │  ├── count(&self)                                                      │
//! │  └── aggregate(&self)              dashboard statistics                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CalculationRepository`](calculation::CalculationRepository) - The calculation history

pub mod calculation;
