//! # Domain Types
//!
//! Core domain types used throughout Tipsplit.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────┐   ┌───────────────────┐   ┌──────────────────┐  │
//! │  │  NewCalculation   │──►│   Calculation     │   │   Statistics     │  │
//! │  │  ───────────────  │   │  ───────────────  │   │  ──────────────  │  │
//! │  │  candidate, built │   │  id (UUID)        │   │  averages and    │  │
//! │  │  by the engine    │   │  6 amounts        │   │  totals over all │  │
//! │  │  (not yet stored) │   │  created_at       │   │  stored records  │  │
//! │  └───────────────────┘   └───────────────────┘   └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`Calculation`] is immutable once stored: there is no update path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculation::{calculate, Breakdown, CalculationInput};
use crate::money::{div_round_half_up, Money, Percentage};

// =============================================================================
// Calculation (stored record)
// =============================================================================

/// A persisted tip calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Calculation {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Bill before tip.
    pub bill_amount: Money,

    /// Tip rate applied to the bill.
    pub tip_percentage: Percentage,

    /// `round2(bill_amount × tip_percentage / 100)`.
    pub tip_amount: Money,

    /// `bill_amount + tip_amount`.
    pub total_amount: Money,

    /// Number of people splitting the bill.
    pub people_count: i64,

    /// `round2(total_amount / people_count)`.
    pub per_person_amount: Money,

    /// When the calculation was stored.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Calculation {
    /// True when the stored amounts agree with the engine.
    pub fn is_consistent(&self) -> bool {
        calculate(self.bill_amount, self.tip_percentage, self.people_count)
            == Breakdown {
                tip_amount: self.tip_amount,
                total_amount: self.total_amount,
                per_person_amount: self.per_person_amount,
            }
    }
}

// =============================================================================
// NewCalculation (candidate)
// =============================================================================

/// A candidate record: inputs plus the engine's derived amounts.
///
/// The only constructor runs the engine, so the three amount invariants
/// hold for every candidate. Sign and range rules are checked separately by
/// [`crate::validation::validate_new_calculation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewCalculation {
    bill_amount: Money,
    tip_percentage: Percentage,
    tip_amount: Money,
    total_amount: Money,
    people_count: i64,
    per_person_amount: Money,
}

impl NewCalculation {
    /// Builds a candidate by running the calculation engine.
    pub fn compute(bill_amount: Money, tip_percentage: Percentage, people_count: i64) -> Self {
        let breakdown = calculate(bill_amount, tip_percentage, people_count);

        NewCalculation {
            bill_amount,
            tip_percentage,
            tip_amount: breakdown.tip_amount,
            total_amount: breakdown.total_amount,
            people_count,
            per_person_amount: breakdown.per_person_amount,
        }
    }

    pub fn bill_amount(&self) -> Money {
        self.bill_amount
    }

    pub fn tip_percentage(&self) -> Percentage {
        self.tip_percentage
    }

    pub fn tip_amount(&self) -> Money {
        self.tip_amount
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn people_count(&self) -> i64 {
        self.people_count
    }

    pub fn per_person_amount(&self) -> Money {
        self.per_person_amount
    }

    /// Materializes the stored record.
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> Calculation {
        Calculation {
            id,
            bill_amount: self.bill_amount,
            tip_percentage: self.tip_percentage,
            tip_amount: self.tip_amount,
            total_amount: self.total_amount,
            people_count: self.people_count,
            per_person_amount: self.per_person_amount,
            created_at,
        }
    }
}

impl From<CalculationInput> for NewCalculation {
    fn from(input: CalculationInput) -> Self {
        NewCalculation::compute(input.bill_amount, input.tip_percentage, input.people_count)
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Raw sums over the stored records, as returned by one aggregate query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StatisticsTotals {
    pub count: i64,
    pub tip_percentage_bps_sum: i64,
    pub bill_amount_cents_sum: i64,
    pub tip_amount_cents_sum: i64,
    pub people_count_sum: i64,
}

/// Dashboard summary over every stored calculation.
///
/// Every field is zero when no records exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Statistics {
    pub total_calculations: i64,

    /// Mean tip rate, rounded to two decimals.
    pub average_tip_percentage: Percentage,

    /// Mean bill, rounded to the cent.
    pub average_bill_amount: Money,

    /// Sum of all tips.
    pub total_tips_collected: Money,

    /// Mean party size, rounded to one decimal.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub average_party_size: Decimal,
}

impl Statistics {
    /// Statistics for an empty store.
    pub fn empty() -> Self {
        Statistics {
            total_calculations: 0,
            average_tip_percentage: Percentage::zero(),
            average_bill_amount: Money::zero(),
            total_tips_collected: Money::zero(),
            average_party_size: Decimal::new(0, 1),
        }
    }

    /// Derives the rounded averages from raw sums.
    ///
    /// ```rust
    /// use tipsplit_core::types::{Statistics, StatisticsTotals};
    ///
    /// let stats = Statistics::from_totals(StatisticsTotals {
    ///     count: 2,
    ///     tip_percentage_bps_sum: 1000 + 2000,
    ///     bill_amount_cents_sum: 20000,
    ///     tip_amount_cents_sum: 3000,
    ///     people_count_sum: 3,
    /// });
    /// assert_eq!(stats.average_tip_percentage.bps(), 1500);
    /// assert_eq!(stats.average_party_size.to_string(), "1.5");
    /// ```
    pub fn from_totals(totals: StatisticsTotals) -> Self {
        if totals.count <= 0 {
            return Statistics::empty();
        }

        let count = totals.count as i128;
        let average_bps = div_round_half_up(totals.tip_percentage_bps_sum as i128, count);
        let average_cents = div_round_half_up(totals.bill_amount_cents_sum as i128, count);
        let average_party_tenths = div_round_half_up(totals.people_count_sum as i128 * 10, count);

        Statistics {
            total_calculations: totals.count,
            average_tip_percentage: Percentage::from_bps(average_bps as u32),
            average_bill_amount: Money::from_cents(average_cents as i64),
            total_tips_collected: Money::from_cents(totals.tip_amount_cents_sum),
            average_party_size: Decimal::new(average_party_tenths as i64, 1),
        }
    }

    /// True when no records contributed.
    pub fn is_empty(&self) -> bool {
        self.total_calculations == 0
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_calculation_runs_engine() {
        let candidate =
            NewCalculation::compute(Money::from_cents(10000), Percentage::from_bps(2000), 4);
        assert_eq!(candidate.tip_amount().cents(), 2000);
        assert_eq!(candidate.total_amount().cents(), 12000);
        assert_eq!(candidate.per_person_amount().cents(), 3000);

        let record = candidate.into_record("abc".to_string(), Utc::now());
        assert_eq!(record.id, "abc");
        assert!(record.is_consistent());
    }

    #[test]
    fn test_inconsistent_record_detected() {
        let mut record =
            NewCalculation::compute(Money::from_cents(10000), Percentage::from_bps(1500), 1)
                .into_record("x".to_string(), Utc::now());
        record.tip_amount = Money::from_cents(1);
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::from_totals(StatisticsTotals::default());
        assert!(stats.is_empty());
        assert_eq!(stats.average_tip_percentage.bps(), 0);
        assert!(stats.average_bill_amount.is_zero());
        assert!(stats.total_tips_collected.is_zero());
        assert_eq!(stats.average_party_size, Decimal::ZERO);
    }

    #[test]
    fn test_statistics_rounding() {
        // tips 10%, 20%, 15.01% → 15.0033% → 15.00%
        // bills 1.00, 1.00, 1.01 → 1.0033 → 1.00
        // parties 1, 2, 2 → 1.666 → 1.7
        let stats = Statistics::from_totals(StatisticsTotals {
            count: 3,
            tip_percentage_bps_sum: 1000 + 2000 + 1501,
            bill_amount_cents_sum: 100 + 100 + 101,
            tip_amount_cents_sum: 10 + 20 + 15,
            people_count_sum: 5,
        });
        assert_eq!(stats.total_calculations, 3);
        assert_eq!(stats.average_tip_percentage.bps(), 1500);
        assert_eq!(stats.average_bill_amount.cents(), 100);
        assert_eq!(stats.total_tips_collected.cents(), 45);
        assert_eq!(stats.average_party_size.to_string(), "1.7");
    }

    #[test]
    fn test_statistics_serialize_party_size_as_number() {
        let stats = Statistics::from_totals(StatisticsTotals {
            count: 2,
            tip_percentage_bps_sum: 3000,
            bill_amount_cents_sum: 20000,
            tip_amount_cents_sum: 3000,
            people_count_sum: 3,
        });
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["average_party_size"], serde_json::json!(1.5));
        assert_eq!(json["average_tip_percentage"], serde_json::json!(1500));
    }
}
