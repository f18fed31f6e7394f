//! # tipsplit-core: Pure Business Logic for Tipsplit
//!
//! This crate holds the tip arithmetic, input rules and listing types as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tipsplit Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/web (axum)                              │   │
//! │  │   calculator form ──► POST /calculations     admin dashboard    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tipsplit-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌────────────┐  ┌─────────┐  │   │
//! │  │   │   money   │  │ calculation │  │ validation │  │ listing │  │   │
//! │  │   │   Money   │  │  calculate  │  │ parse_form │  │ SortKey │  │   │
//! │  │   │Percentage │  │  Breakdown  │  │   rules    │  │  pages  │  │   │
//! │  │   └───────────┘  └─────────────┘  └────────────┘  └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tipsplit-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money (cents) and Percentage (basis points)
//! - [`calculation`] - The tip / total / per-person engine
//! - [`types`] - Stored records and dashboard statistics
//! - [`validation`] - Form parsing and record rules
//! - [`listing`] - Sort keys and pagination
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tipsplit_core::validation::{parse_form, CalculationForm};
//! use tipsplit_core::NewCalculation;
//!
//! let input = parse_form(&CalculationForm::new("100", "20", "4")).unwrap();
//! let candidate = NewCalculation::from(input);
//!
//! assert_eq!(candidate.total_amount().to_string(), "120.00");
//! assert_eq!(candidate.per_person_amount().to_string(), "30.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculation;
pub mod error;
pub mod listing;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculation::{calculate, Breakdown, CalculationInput};
pub use error::{Field, ValidationError, ValidationErrors};
pub use listing::{Pagination, SortDirection, SortKey, PAGE_SIZE};
pub use money::{Money, Percentage};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency shown next to amounts in the HTML views.
pub const CURRENCY_CODE: &str = "UGX";

/// Exclusive upper bound for a bill, in cents (100,000,000.00).
///
/// ## Business Reason
/// Keeps every amount within ten significant digits, matching the column
/// width the history has always been stored with.
pub const MAX_BILL_AMOUNT_CENTS: i64 = 10_000_000_000;

/// Inclusive upper bound for a tip, in basis points (100.00%).
pub const MAX_TIP_PERCENTAGE_BPS: u32 = 10_000;

/// Inclusive upper bound for a party size.
pub const MAX_PEOPLE_COUNT: i64 = i32::MAX as i64;
