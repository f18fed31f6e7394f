//! # Calculation Engine
//!
//! Turns `(bill_amount, tip_percentage, people_count)` into the three
//! derived amounts. Pure: no validation, no side effects.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tip_amount        = round2(bill_amount × tip_percentage / 100)         │
//! │  total_amount      = round2(bill_amount + tip_amount)                   │
//! │  per_person_amount = round2(total_amount / people_count)                │
//! │                                                                         │
//! │  round2 = half-up to the cent, computed on integer cents                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use tipsplit_core::calculation::calculate;
//! use tipsplit_core::money::{Money, Percentage};
//!
//! let breakdown = calculate(Money::from_cents(3333), Percentage::from_bps(1800), 3);
//! assert_eq!(breakdown.tip_amount.cents(), 600);
//! assert_eq!(breakdown.total_amount.cents(), 3933);
//! assert_eq!(breakdown.per_person_amount.cents(), 1311);
//! ```

use serde::{Deserialize, Serialize};

use crate::money::{Money, Percentage};

/// The three validated inputs of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub bill_amount: Money,
    pub tip_percentage: Percentage,
    pub people_count: i64,
}

impl CalculationInput {
    /// Runs the engine on these inputs.
    pub fn calculate(&self) -> Breakdown {
        calculate(self.bill_amount, self.tip_percentage, self.people_count)
    }
}

/// The derived amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub tip_amount: Money,
    pub total_amount: Money,
    pub per_person_amount: Money,
}

/// Computes tip, total and per-person share.
///
/// Callers are expected to have validated the inputs. A `people_count`
/// below one is treated as a single person instead of dividing by zero.
pub fn calculate(bill_amount: Money, tip_percentage: Percentage, people_count: i64) -> Breakdown {
    let tip_amount = bill_amount.percentage(tip_percentage);
    let total_amount = bill_amount + tip_amount;
    let per_person_amount = total_amount.split(people_count);

    Breakdown {
        tip_amount,
        total_amount,
        per_person_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bill_cents: i64, tip_bps: u32, people: i64) -> Breakdown {
        calculate(
            Money::from_cents(bill_cents),
            Percentage::from_bps(tip_bps),
            people,
        )
    }

    #[test]
    fn test_single_person() {
        let b = run(10000, 2000, 1);
        assert_eq!(b.tip_amount.cents(), 2000);
        assert_eq!(b.total_amount.cents(), 12000);
        assert_eq!(b.per_person_amount.cents(), 12000);
    }

    #[test]
    fn test_split_four_ways() {
        let b = run(10000, 2000, 4);
        assert_eq!(b.per_person_amount.cents(), 3000);
    }

    #[test]
    fn test_fifteen_percent() {
        let b = run(10000, 1500, 1);
        assert_eq!(b.total_amount.cents(), 11500);
    }

    #[test]
    fn test_rounds_tip_up_from_below() {
        // 33.33 × 18% = 5.9994 → 6.00
        let b = run(3333, 1800, 3);
        assert_eq!(b.tip_amount.cents(), 600);
        assert_eq!(b.total_amount.cents(), 3933);
        assert_eq!(b.per_person_amount.cents(), 1311);
    }

    #[test]
    fn test_half_cent_rounds_up() {
        // 0.50 × 1% = 0.005 → 0.01
        let b = run(50, 100, 1);
        assert_eq!(b.tip_amount.cents(), 1);

        // 1.01 split two ways = 0.505 → 0.51
        let b = run(101, 0, 2);
        assert_eq!(b.per_person_amount.cents(), 51);
    }

    #[test]
    fn test_zero_and_full_tip() {
        let b = run(2500, 0, 1);
        assert!(b.tip_amount.is_zero());
        assert_eq!(b.total_amount.cents(), 2500);

        let b = run(2500, 10000, 1);
        assert_eq!(b.tip_amount.cents(), 2500);
        assert_eq!(b.total_amount.cents(), 5000);
    }

    #[test]
    fn test_non_positive_people_does_not_panic() {
        let b = run(1000, 0, 0);
        assert_eq!(b.per_person_amount.cents(), 1000);
    }

    #[test]
    fn test_input_calculate() {
        let input = CalculationInput {
            bill_amount: Money::from_cents(10000),
            tip_percentage: Percentage::from_bps(1500),
            people_count: 2,
        };
        assert_eq!(input.calculate().per_person_amount.cents(), 5750);
    }
}
