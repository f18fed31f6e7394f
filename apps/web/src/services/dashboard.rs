//! Admin listing and statistics.
//!
//! Read-only: turns the raw query string into one page of records plus the
//! summary over the whole history.

use serde::Deserialize;

use tipsplit_core::{Calculation, Pagination, SortDirection, SortKey, Statistics};
use tipsplit_db::{Database, DbResult};

/// Raw `?page=&sort=&direction=` parameters.
///
/// Kept as text so a malformed value falls back to its default instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub page: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub calculations: Vec<Calculation>,
    pub current_page: i64,
    pub total_pages: i64,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub statistics: Statistics,
}

impl DashboardView {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Loads one dashboard page.
pub async fn load_dashboard(db: &Database, query: &DashboardQuery) -> DbResult<DashboardView> {
    let pagination = Pagination::from_query(query.page.as_deref());
    let sort = SortKey::parse(query.sort.as_deref());
    let direction = SortDirection::parse(query.direction.as_deref());

    let repo = db.calculations();
    let calculations = repo
        .list(sort, direction, pagination.offset(), pagination.limit())
        .await?;
    let total = repo.count().await?;
    let statistics = repo.aggregate().await?;

    Ok(DashboardView {
        calculations,
        current_page: pagination.page,
        total_pages: Pagination::total_pages(total),
        sort,
        direction,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipsplit_core::{Money, NewCalculation, Percentage};
    use tipsplit_db::DbConfig;

    async fn seeded(count: i64) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for i in 0..count {
            let candidate = NewCalculation::compute(
                Money::from_cents(1000 + i * 100),
                Percentage::from_bps(if i % 2 == 0 { 1000 } else { 2000 }),
                1,
            );
            db.calculations().create(candidate).await.unwrap();
        }
        db
    }

    fn query(page: Option<&str>, sort: Option<&str>, direction: Option<&str>) -> DashboardQuery {
        DashboardQuery {
            page: page.map(String::from),
            sort: sort.map(String::from),
            direction: direction.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let db = seeded(0).await;
        let view = load_dashboard(&db, &DashboardQuery::default()).await.unwrap();

        assert!(view.calculations.is_empty());
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 0);
        assert!(view.statistics.is_empty());
        assert!(!view.has_next());
    }

    #[tokio::test]
    async fn test_second_page() {
        let db = seeded(25).await;
        let view = load_dashboard(&db, &query(Some("2"), None, None)).await.unwrap();

        assert_eq!(view.total_pages, 2);
        assert_eq!(view.current_page, 2);
        assert_eq!(view.calculations.len(), 5);
        assert!(view.has_previous());
        assert!(!view.has_next());
        assert_eq!(view.statistics.total_calculations, 25);
    }

    #[tokio::test]
    async fn test_fallbacks() {
        let db = seeded(3).await;
        let view = load_dashboard(&db, &query(Some("zero"), Some("people"), Some("up")))
            .await
            .unwrap();

        assert_eq!(view.current_page, 1);
        assert_eq!(view.sort, SortKey::Date);
        assert_eq!(view.direction, SortDirection::Desc);
    }

    #[tokio::test]
    async fn test_sort_by_bill_desc() {
        let db = seeded(5).await;
        let view = load_dashboard(&db, &query(None, Some("bill_amount"), Some("desc")))
            .await
            .unwrap();

        let bills: Vec<i64> = view
            .calculations
            .iter()
            .map(|c| c.bill_amount.cents())
            .collect();
        assert!(bills.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(bills[0], 1400);
    }

    #[tokio::test]
    async fn test_average_tip() {
        let db = seeded(2).await;
        let view = load_dashboard(&db, &DashboardQuery::default()).await.unwrap();

        assert_eq!(view.statistics.average_tip_percentage.bps(), 1500);
    }
}
