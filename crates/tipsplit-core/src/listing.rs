//! # Listing Module
//!
//! Sort and pagination types for the admin dashboard.
//!
//! Sort key and direction are closed enums: any unrecognised query value
//! falls back to the default instead of reaching SQL.
//!
//! ```text
//! ?page=2&sort=bill_amount&direction=asc
//!    │          │                 │
//!    ▼          ▼                 ▼
//! Pagination  SortKey::BillAmount  SortDirection::Asc
//! offset 20   column bill_amount   ORDER BY ... ASC
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Records per dashboard page.
pub const PAGE_SIZE: i64 = 20;

// =============================================================================
// Sort Key
// =============================================================================

/// Column the history is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortKey {
    /// `created_at`
    #[default]
    Date,
    BillAmount,
    TipPercentage,
}

impl SortKey {
    /// Parses a query value, falling back to [`SortKey::Date`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("bill_amount") => SortKey::BillAmount,
            Some("tip_percentage") => SortKey::TipPercentage,
            _ => SortKey::Date,
        }
    }

    /// Query parameter value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::BillAmount => "bill_amount",
            SortKey::TipPercentage => "tip_percentage",
        }
    }

    /// SQL column name. Only ever one of these literals.
    pub const fn column(&self) -> &'static str {
        match self {
            SortKey::Date => "created_at",
            SortKey::BillAmount => "bill_amount",
            SortKey::TipPercentage => "tip_percentage",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sort Direction
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parses a query value, falling back to [`SortDirection::Desc`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// SQL keyword.
    pub const fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// The other direction, for column header links.
    pub const fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of the history.
///
/// ```rust
/// use tipsplit_core::listing::Pagination;
///
/// let page = Pagination::new(Some(2));
/// assert_eq!(page.offset(), 20);
/// assert_eq!(Pagination::total_pages(25), 2);
/// assert_eq!(Pagination::total_pages(0), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    /// Page numbers below one are clamped to one.
    pub fn new(page: Option<i64>) -> Self {
        Pagination {
            page: page.unwrap_or(1).max(1),
            per_page: PAGE_SIZE,
        }
    }

    /// Parses a raw `?page=` value; anything non-numeric means page one.
    pub fn from_query(raw: Option<&str>) -> Self {
        Pagination::new(raw.and_then(|s| s.trim().parse::<i64>().ok()))
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// `ceil(total / PAGE_SIZE)`; zero records means zero pages.
    pub fn total_pages(total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + PAGE_SIZE - 1) / PAGE_SIZE
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(None)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::parse(Some("bill_amount")), SortKey::BillAmount);
        assert_eq!(SortKey::parse(Some("tip_percentage")), SortKey::TipPercentage);
        assert_eq!(SortKey::parse(Some("date")), SortKey::Date);
        assert_eq!(SortKey::parse(Some("id; DROP TABLE calculations")), SortKey::Date);
        assert_eq!(SortKey::parse(None), SortKey::Date);
        assert_eq!(SortKey::Date.column(), "created_at");
    }

    #[test]
    fn test_direction_fallback() {
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.keyword(), "DESC");
    }

    #[test]
    fn test_page_clamping() {
        assert_eq!(Pagination::new(None).page, 1);
        assert_eq!(Pagination::new(Some(0)).page, 1);
        assert_eq!(Pagination::new(Some(-3)).page, 1);
        assert_eq!(Pagination::from_query(Some("abc")).page, 1);
        assert_eq!(Pagination::from_query(Some("3")).offset(), 40);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::total_pages(0), 0);
        assert_eq!(Pagination::total_pages(1), 1);
        assert_eq!(Pagination::total_pages(20), 1);
        assert_eq!(Pagination::total_pages(21), 2);
        assert_eq!(Pagination::total_pages(25), 2);
    }
}
