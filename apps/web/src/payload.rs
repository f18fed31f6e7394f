//! JSON payloads.
//!
//! Amounts and percentages leave the server as JSON numbers with two
//! decimals (`39.33`, `18.0`), not as the internal cents / basis points.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use tipsplit_core::{Calculation, SortDirection, SortKey, Statistics};

use crate::services::dashboard::DashboardView;

/// One stored calculation.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationPayload {
    pub id: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub bill_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub tip_percentage: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub tip_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    pub people_count: i64,

    #[serde(with = "rust_decimal::serde::float")]
    pub per_person_amount: Decimal,

    pub created_at: DateTime<Utc>,
}

impl From<&Calculation> for CalculationPayload {
    fn from(c: &Calculation) -> Self {
        CalculationPayload {
            id: c.id.clone(),
            bill_amount: c.bill_amount.to_decimal(),
            tip_percentage: c.tip_percentage.to_decimal(),
            tip_amount: c.tip_amount.to_decimal(),
            total_amount: c.total_amount.to_decimal(),
            people_count: c.people_count,
            per_person_amount: c.per_person_amount.to_decimal(),
            created_at: c.created_at,
        }
    }
}

/// Dashboard summary.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsPayload {
    pub total_calculations: i64,

    #[serde(with = "rust_decimal::serde::float")]
    pub average_tip_percentage: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub average_bill_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_tips_collected: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub average_party_size: Decimal,
}

impl From<&Statistics> for StatisticsPayload {
    fn from(s: &Statistics) -> Self {
        StatisticsPayload {
            total_calculations: s.total_calculations,
            average_tip_percentage: s.average_tip_percentage.to_decimal(),
            average_bill_amount: s.average_bill_amount.to_decimal(),
            total_tips_collected: s.total_tips_collected.to_decimal(),
            average_party_size: s.average_party_size,
        }
    }
}

/// One dashboard page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub calculations: Vec<CalculationPayload>,
    pub current_page: i64,
    pub total_pages: i64,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub statistics: StatisticsPayload,
}

impl From<&DashboardView> for DashboardPayload {
    fn from(view: &DashboardView) -> Self {
        DashboardPayload {
            calculations: view.calculations.iter().map(CalculationPayload::from).collect(),
            current_page: view.current_page,
            total_pages: view.total_pages,
            sort: view.sort,
            direction: view.direction,
            statistics: StatisticsPayload::from(&view.statistics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tipsplit_core::{Money, NewCalculation, Percentage};

    #[test]
    fn test_amounts_serialize_as_decimals() {
        let record = NewCalculation::compute(Money::from_cents(3333), Percentage::from_bps(1800), 3)
            .into_record("id-1".to_string(), Utc::now());

        let value = serde_json::to_value(CalculationPayload::from(&record)).unwrap();
        let number = |key: &str| value[key].as_f64().unwrap();

        assert!((number("bill_amount") - 33.33).abs() < 1e-9);
        assert!((number("tip_percentage") - 18.0).abs() < 1e-9);
        assert!((number("tip_amount") - 6.0).abs() < 1e-9);
        assert!((number("total_amount") - 39.33).abs() < 1e-9);
        assert!((number("per_person_amount") - 13.11).abs() < 1e-9);
        assert_eq!(value["people_count"], json!(3));
    }
}
