//! # Validation Module
//!
//! Input validation for calculation records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: parse_form (raw text → typed inputs)                          │
//! │  ├── presence            "can't be blank"                               │
//! │  ├── numericality        "is not a number" / "must be an integer"       │
//! │  └── sign / range        "must be greater than 0" ...                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Calculation engine fills tip / total / per-person                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: validate_new_calculation (record store gate)                  │
//! │  ├── same sign / range rules on the inputs                              │
//! │  └── derived amounts: tip >= 0, total > 0, per person > 0               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite CHECK constraints)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is evaluated and every failure is collected: the caller gets
//! the complete list in one round trip.
//!
//! ## Usage
//! ```rust
//! use tipsplit_core::validation::{parse_form, CalculationForm};
//!
//! let form = CalculationForm::new("100", "20", "4");
//! let input = parse_form(&form).unwrap();
//! assert_eq!(input.bill_amount.cents(), 10000);
//!
//! let bad = CalculationForm::new("", "150", "1.5");
//! let errors = parse_form(&bad).unwrap_err();
//! assert_eq!(errors.len(), 3);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::calculation::CalculationInput;
use crate::error::{Field, ValidationError, ValidationErrors};
use crate::money::{Money, Percentage};
use crate::types::NewCalculation;
use crate::{MAX_BILL_AMOUNT_CENTS, MAX_PEOPLE_COUNT, MAX_TIP_PERCENTAGE_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

// =============================================================================
// Raw Form
// =============================================================================

/// Parameter scope of the calculator form: `calculation[bill_amount]` in a
/// form body, `{"calculation": {...}}` in a JSON body.
pub const FORM_SCOPE: &str = "calculation";

/// The three user-supplied fields, exactly as submitted.
///
/// Accepts form-encoded text and JSON strings or numbers alike. Kept
/// verbatim so an invalid submission can be re-displayed unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationForm {
    #[serde(default, deserialize_with = "text_or_number")]
    pub bill_amount: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub tip_percentage: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub people_count: Option<String>,
}

impl CalculationForm {
    /// Convenience constructor for tests and seeding.
    pub fn new(
        bill_amount: impl Into<String>,
        tip_percentage: impl Into<String>,
        people_count: impl Into<String>,
    ) -> Self {
        CalculationForm {
            bill_amount: Some(bill_amount.into()),
            tip_percentage: Some(tip_percentage.into()),
            people_count: Some(people_count.into()),
        }
    }
}

impl CalculationForm {
    /// Builds a form from urlencoded key/value pairs.
    ///
    /// Scoped keys (`calculation[bill_amount]`) are what the calculator page
    /// posts. Flat keys (`bill_amount`) are only read when no scoped key is
    /// present at all.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut scoped = CalculationForm::default();
        let mut flat = CalculationForm::default();
        let mut saw_scoped = false;

        for (key, value) in pairs {
            let key = key.as_ref();
            match scoped_name(key) {
                Some(name) => {
                    saw_scoped = true;
                    scoped.set(name, value.into());
                }
                None => flat.set(key, value.into()),
            }
        }

        if saw_scoped {
            scoped
        } else {
            flat
        }
    }

    /// Builds a form from a JSON body, either `{"calculation": {...}}` or
    /// the three fields at the top level.
    pub fn from_json(mut body: serde_json::Value) -> Result<Self, serde_json::Error> {
        let scoped = body.as_object_mut().and_then(|o| o.remove(FORM_SCOPE));
        serde_json::from_value(scoped.unwrap_or(body))
    }

    fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "bill_amount" => &mut self.bill_amount,
            "tip_percentage" => &mut self.tip_percentage,
            "people_count" => &mut self.people_count,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// `calculation[bill_amount]` → `bill_amount`
fn scoped_name(key: &str) -> Option<&str> {
    key.strip_prefix(FORM_SCOPE)?
        .strip_prefix('[')?
        .strip_suffix(']')
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses one raw field into a decimal, recording presence / number errors.
fn parse_decimal(raw: Option<&str>, field: Field, errors: &mut ValidationErrors) -> Option<Decimal> {
    let text = raw.map(str::trim).unwrap_or("");

    if text.is_empty() {
        errors.push(ValidationError::Required { field });
        return None;
    }

    match Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(ValidationError::NotANumber { field });
            None
        }
    }
}

fn parse_bill_amount(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<Money> {
    let value = parse_decimal(raw, Field::BillAmount, errors)?;

    match Money::from_decimal(value) {
        Some(amount) => check_bill_amount(amount, errors).then_some(amount),
        None if value.is_sign_negative() => {
            errors.push(ValidationError::MustBeGreaterThan {
                field: Field::BillAmount,
                bound: "0".to_string(),
            });
            None
        }
        None => {
            push_too_large(Field::BillAmount, errors);
            None
        }
    }
}

fn parse_tip_percentage(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<Percentage> {
    let value = parse_decimal(raw, Field::TipPercentage, errors)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if value < Decimal::ZERO {
        errors.push(ValidationError::MustBeAtLeast {
            field: Field::TipPercentage,
            bound: "0".to_string(),
        });
        return None;
    }

    match Percentage::from_decimal(value) {
        Some(rate) => check_tip_percentage(rate, errors).then_some(rate),
        None => {
            errors.push(ValidationError::MustBeAtMost {
                field: Field::TipPercentage,
                bound: "100".to_string(),
            });
            None
        }
    }
}

fn parse_people_count(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<i64> {
    let value = parse_decimal(raw, Field::PeopleCount, errors)?;

    // "2.0" and "1e3" are numbers but not integers as written
    if !is_integer_text(raw.map(str::trim).unwrap_or("")) {
        errors.push(ValidationError::NotAnInteger {
            field: Field::PeopleCount,
        });
        return None;
    }

    match value.to_i64() {
        Some(count) => check_people_count(count, errors).then_some(count),
        None => {
            let error = if value.is_sign_negative() {
                ValidationError::MustBeGreaterThan {
                    field: Field::PeopleCount,
                    bound: "0".to_string(),
                }
            } else {
                ValidationError::MustBeAtMost {
                    field: Field::PeopleCount,
                    bound: MAX_PEOPLE_COUNT.to_string(),
                }
            };
            errors.push(error);
            None
        }
    }
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn push_too_large(field: Field, errors: &mut ValidationErrors) {
    errors.push(ValidationError::MustBeLessThan {
        field,
        bound: (MAX_BILL_AMOUNT_CENTS / 100).to_string(),
    });
}

// =============================================================================
// Typed Rules
// =============================================================================

/// `bill_amount > 0` and below the column maximum.
fn check_bill_amount(amount: Money, errors: &mut ValidationErrors) -> bool {
    if !amount.is_positive() {
        errors.push(ValidationError::MustBeGreaterThan {
            field: Field::BillAmount,
            bound: "0".to_string(),
        });
        return false;
    }

    if amount.cents() >= MAX_BILL_AMOUNT_CENTS {
        push_too_large(Field::BillAmount, errors);
        return false;
    }

    true
}

/// `0 <= tip_percentage <= 100`.
fn check_tip_percentage(rate: Percentage, errors: &mut ValidationErrors) -> bool {
    if rate.bps() > MAX_TIP_PERCENTAGE_BPS {
        errors.push(ValidationError::MustBeAtMost {
            field: Field::TipPercentage,
            bound: "100".to_string(),
        });
        return false;
    }

    true
}

/// `1 <= people_count <= MAX_PEOPLE_COUNT`.
fn check_people_count(count: i64, errors: &mut ValidationErrors) -> bool {
    if count <= 0 {
        errors.push(ValidationError::MustBeGreaterThan {
            field: Field::PeopleCount,
            bound: "0".to_string(),
        });
        return false;
    }

    if count > MAX_PEOPLE_COUNT {
        errors.push(ValidationError::MustBeAtMost {
            field: Field::PeopleCount,
            bound: MAX_PEOPLE_COUNT.to_string(),
        });
        return false;
    }

    true
}

// =============================================================================
// Public API
// =============================================================================

/// Parses and validates a raw submission.
///
/// Decimal inputs are rounded half-up to two places before the sign and
/// range rules run, so `0.004` is rejected as "must be greater than 0".
pub fn parse_form(form: &CalculationForm) -> ValidationResult<CalculationInput> {
    let mut errors = ValidationErrors::new();

    let bill_amount = parse_bill_amount(form.bill_amount.as_deref(), &mut errors);
    let tip_percentage = parse_tip_percentage(form.tip_percentage.as_deref(), &mut errors);
    let people_count = parse_people_count(form.people_count.as_deref(), &mut errors);

    match (bill_amount, tip_percentage, people_count) {
        (Some(bill_amount), Some(tip_percentage), Some(people_count)) if errors.is_empty() => {
            Ok(CalculationInput {
                bill_amount,
                tip_percentage,
                people_count,
            })
        }
        _ => Err(errors),
    }
}

/// Validates a candidate record before it is stored.
///
/// Checks the inputs again plus the engine's derived amounts: a bill of
/// `0.01` split 3 ways yields a per-person share of `0.00`, which is
/// rejected.
pub fn validate_new_calculation(candidate: &NewCalculation) -> ValidationResult<()> {
    let mut errors = ValidationErrors::new();

    check_bill_amount(candidate.bill_amount(), &mut errors);
    check_tip_percentage(candidate.tip_percentage(), &mut errors);
    check_people_count(candidate.people_count(), &mut errors);

    if candidate.tip_amount().is_negative() {
        errors.push(ValidationError::MustBeAtLeast {
            field: Field::TipAmount,
            bound: "0".to_string(),
        });
    }

    if !candidate.total_amount().is_positive() {
        errors.push(ValidationError::MustBeGreaterThan {
            field: Field::TotalAmount,
            bound: "0".to_string(),
        });
    }

    if !candidate.per_person_amount().is_positive() {
        errors.push(ValidationError::MustBeGreaterThan {
            field: Field::PerPersonAmount,
            bound: "0".to_string(),
        });
    }

    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(form: CalculationForm) -> Vec<String> {
        parse_form(&form).unwrap_err().full_messages()
    }

    #[test]
    fn test_valid_form() {
        let input = parse_form(&CalculationForm::new("33.33", "18", "3")).unwrap();
        assert_eq!(input.bill_amount.cents(), 3333);
        assert_eq!(input.tip_percentage.bps(), 1800);
        assert_eq!(input.people_count, 3);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let input = parse_form(&CalculationForm::new(" 100.00 ", "15.5", " 2 ")).unwrap();
        assert_eq!(input.bill_amount.cents(), 10000);
        assert_eq!(input.tip_percentage.bps(), 1550);
        assert_eq!(input.people_count, 2);
    }

    #[test]
    fn test_blank_fields() {
        assert_eq!(
            messages(CalculationForm::default()),
            vec![
                "Bill amount can't be blank",
                "Tip percentage can't be blank",
                "People count can't be blank",
            ]
        );
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(
            messages(CalculationForm::new("abc", "20", "1")),
            vec!["Bill amount is not a number"]
        );
    }

    #[test]
    fn test_bill_amount_must_be_positive() {
        assert_eq!(
            messages(CalculationForm::new("0", "20", "1")),
            vec!["Bill amount must be greater than 0"]
        );
        assert_eq!(
            messages(CalculationForm::new("-10", "20", "1")),
            vec!["Bill amount must be greater than 0"]
        );
        assert_eq!(
            messages(CalculationForm::new("0.004", "20", "1")),
            vec!["Bill amount must be greater than 0"]
        );
        // too large for i64 cents, still reported by sign
        assert_eq!(
            messages(CalculationForm::new("-1e20", "20", "1")),
            vec!["Bill amount must be greater than 0"]
        );
    }

    #[test]
    fn test_bill_amount_upper_bound() {
        assert!(parse_form(&CalculationForm::new("99999999.99", "0", "1")).is_ok());
        assert_eq!(
            messages(CalculationForm::new("100000000", "0", "1")),
            vec!["Bill amount must be less than 100000000"]
        );
    }

    #[test]
    fn test_tip_percentage_range() {
        assert!(parse_form(&CalculationForm::new("10", "0", "1")).is_ok());
        assert!(parse_form(&CalculationForm::new("10", "100", "1")).is_ok());
        assert_eq!(
            messages(CalculationForm::new("10", "-1", "1")),
            vec!["Tip percentage must be greater than or equal to 0"]
        );
        assert_eq!(
            messages(CalculationForm::new("10", "101", "1")),
            vec!["Tip percentage must be less than or equal to 100"]
        );
        assert_eq!(
            messages(CalculationForm::new("10", "1e3", "1")),
            vec!["Tip percentage must be less than or equal to 100"]
        );
    }

    #[test]
    fn test_people_count_rules() {
        assert_eq!(
            messages(CalculationForm::new("10", "10", "0")),
            vec!["People count must be greater than 0"]
        );
        assert_eq!(
            messages(CalculationForm::new("10", "10", "-1")),
            vec!["People count must be greater than 0"]
        );
        for raw in ["1.5", "2.0", "1e3"] {
            assert_eq!(
                messages(CalculationForm::new("10", "10", raw)),
                vec!["People count must be an integer"],
                "people_count = {raw}"
            );
        }
        assert_eq!(
            messages(CalculationForm::new("10", "10", "two")),
            vec!["People count is not a number"]
        );
        assert_eq!(
            messages(CalculationForm::new("10", "10", "3000000000")),
            vec!["People count must be less than or equal to 2147483647"]
        );
    }

    #[test]
    fn test_json_numbers_accepted() {
        let form: CalculationForm = serde_json::from_str(
            r#"{"bill_amount": 33.33, "tip_percentage": 18, "people_count": 3}"#,
        )
        .unwrap();
        assert_eq!(form.bill_amount.as_deref(), Some("33.33"));

        let input = parse_form(&form).unwrap();
        assert_eq!(input.bill_amount.cents(), 3333);
        assert_eq!(input.people_count, 3);
    }

    #[test]
    fn test_json_missing_and_null_fields() {
        let form: CalculationForm =
            serde_json::from_str(r#"{"bill_amount": null, "tip_percentage": "15"}"#).unwrap();
        assert_eq!(form.bill_amount, None);
        assert_eq!(form.people_count, None);
        assert_eq!(
            parse_form(&form).unwrap_err().full_messages(),
            vec!["Bill amount can't be blank", "People count can't be blank"]
        );
    }

    #[test]
    fn test_json_number_with_fraction_is_not_an_integer() {
        let form: CalculationForm = serde_json::from_str(
            r#"{"bill_amount": 50, "tip_percentage": 10, "people_count": 2.0}"#,
        )
        .unwrap();
        assert_eq!(
            parse_form(&form).unwrap_err().full_messages(),
            vec!["People count must be an integer"]
        );
    }

    #[test]
    fn test_scoped_pairs() {
        let form = CalculationForm::from_pairs([
            ("calculation[bill_amount]", "50"),
            ("calculation[tip_percentage]", "10"),
            ("calculation[people_count]", "2"),
            ("commit", "Calculate"),
        ]);
        assert_eq!(form, CalculationForm::new("50", "10", "2"));
    }

    #[test]
    fn test_flat_pairs_ignored_when_scoped_present() {
        let flat = CalculationForm::from_pairs([("bill_amount", "50"), ("people_count", "2")]);
        assert_eq!(flat.bill_amount.as_deref(), Some("50"));
        assert_eq!(flat.tip_percentage, None);

        let mixed = CalculationForm::from_pairs([
            ("bill_amount", "99"),
            ("calculation[bill_amount]", "50"),
        ]);
        assert_eq!(mixed.bill_amount.as_deref(), Some("50"));
        assert_eq!(mixed.people_count, None);

        // not a scoped key
        let odd = CalculationForm::from_pairs([("calculations[bill_amount]", "50")]);
        assert_eq!(odd, CalculationForm::default());
    }

    #[test]
    fn test_json_envelope() {
        let scoped = CalculationForm::from_json(serde_json::json!({
            "calculation": {"bill_amount": 50.0, "tip_percentage": 10.0, "people_count": 2}
        }))
        .unwrap();
        assert_eq!(scoped, CalculationForm::new("50.0", "10.0", "2"));

        let flat = CalculationForm::from_json(serde_json::json!({"bill_amount": "12"})).unwrap();
        assert_eq!(flat.bill_amount.as_deref(), Some("12"));

        assert!(CalculationForm::from_json(serde_json::json!({"calculation": null})).is_err());
    }

    #[test]
    fn test_candidate_derived_amounts() {
        let ok = NewCalculation::compute(Money::from_cents(10000), Percentage::from_bps(2000), 4);
        assert!(validate_new_calculation(&ok).is_ok());

        // 0.01 split three ways rounds to 0.00 per person
        let tiny = NewCalculation::compute(Money::from_cents(1), Percentage::zero(), 3);
        let errors = validate_new_calculation(&tiny).unwrap_err();
        assert_eq!(
            errors.full_messages(),
            vec!["Per person amount must be greater than 0"]
        );
    }

    #[test]
    fn test_candidate_rejects_bad_inputs() {
        let bad = NewCalculation::compute(Money::zero(), Percentage::from_bps(10001), 0);
        let errors = validate_new_calculation(&bad).unwrap_err();
        assert!(errors.has_error_on(Field::BillAmount));
        assert!(errors.has_error_on(Field::TipPercentage));
        assert!(errors.has_error_on(Field::PeopleCount));
        assert!(errors.has_error_on(Field::TotalAmount));
        assert!(errors.has_error_on(Field::PerPersonAmount));
    }
}
