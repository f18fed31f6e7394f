//! # Error Types
//!
//! Domain-specific error types for tipsplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tipsplit-core errors (this file)                                       │
//! │  ├── ValidationError   - One rule broken by one field                   │
//! │  └── ValidationErrors  - Every broken rule of one candidate record      │
//! │                                                                         │
//! │  tipsplit-db errors (separate crate)                                    │
//! │  ├── DbError           - Database operation failures                    │
//! │  └── CreateError       - Invalid candidate OR database failure          │
//! │                                                                         │
//! │  web errors (in app)                                                    │
//! │  └── WebError          - What the HTTP client sees                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Messages
//! `Display` renders a full message ("Bill amount must be greater than 0")
//! suitable for showing next to the form or returning in a JSON `errors`
//! list.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Field
// =============================================================================

/// The validated fields of a calculation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BillAmount,
    TipPercentage,
    TipAmount,
    TotalAmount,
    PeopleCount,
    PerPersonAmount,
}

impl Field {
    /// Human-readable label used at the start of a message.
    pub const fn label(&self) -> &'static str {
        match self {
            Field::BillAmount => "Bill amount",
            Field::TipPercentage => "Tip percentage",
            Field::TipAmount => "Tip amount",
            Field::TotalAmount => "Total amount",
            Field::PeopleCount => "People count",
            Field::PerPersonAmount => "Per person amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Bounds are carried pre-formatted (`"0"`, `"100"`) so the same variant
/// serves amounts, percentages and counts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} can't be blank")]
    Required { field: Field },

    /// Field value could not be parsed as a number.
    #[error("{field} is not a number")]
    NotANumber { field: Field },

    /// Field value has a fractional part where an integer is required.
    #[error("{field} must be an integer")]
    NotAnInteger { field: Field },

    /// Value must be strictly greater than `bound`.
    #[error("{field} must be greater than {bound}")]
    MustBeGreaterThan { field: Field, bound: String },

    /// Value must be at least `bound`.
    #[error("{field} must be greater than or equal to {bound}")]
    MustBeAtLeast { field: Field, bound: String },

    /// Value must be at most `bound`.
    #[error("{field} must be less than or equal to {bound}")]
    MustBeAtMost { field: Field, bound: String },

    /// Value must be strictly less than `bound`.
    #[error("{field} must be less than {bound}")]
    MustBeLessThan { field: Field, bound: String },
}

impl ValidationError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field }
            | ValidationError::NotAnInteger { field }
            | ValidationError::MustBeGreaterThan { field, .. }
            | ValidationError::MustBeAtLeast { field, .. }
            | ValidationError::MustBeAtMost { field, .. }
            | ValidationError::MustBeLessThan { field, .. } => *field,
        }
    }
}

// =============================================================================
// Validation Errors (collection)
// =============================================================================

/// Every validation failure found for one candidate record, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Records one failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates the recorded failures.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// True when at least one failure concerns `field`.
    pub fn has_error_on(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Every message, e.g. `["Bill amount must be greater than 0"]`.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors { errors: vec![error] }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: Field::BillAmount,
        };
        assert_eq!(err.to_string(), "Bill amount can't be blank");

        let err = ValidationError::MustBeGreaterThan {
            field: Field::PeopleCount,
            bound: "0".to_string(),
        };
        assert_eq!(err.to_string(), "People count must be greater than 0");

        let err = ValidationError::MustBeAtMost {
            field: Field::TipPercentage,
            bound: "100".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Tip percentage must be less than or equal to 100"
        );
    }

    #[test]
    fn test_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert!(errors.clone().into_result().is_ok());

        errors.push(ValidationError::Required {
            field: Field::BillAmount,
        });
        errors.push(ValidationError::NotAnInteger {
            field: Field::PeopleCount,
        });

        assert_eq!(errors.len(), 2);
        assert!(errors.has_error_on(Field::PeopleCount));
        assert!(!errors.has_error_on(Field::TipPercentage));
        assert_eq!(
            errors.full_messages(),
            vec![
                "Bill amount can't be blank".to_string(),
                "People count must be an integer".to_string(),
            ]
        );
        assert_eq!(
            errors.to_string(),
            "Bill amount can't be blank, People count must be an integer"
        );
        assert!(errors.into_result().is_err());
    }
}
