//! # Calculation Repository
//!
//! The record store: the only place calculations are written and read.
//!
//! ## Write Path
//! ```text
//! NewCalculation (engine output)
//!      │
//!      ▼
//! validate_new_calculation ──✗──► CreateError::Invalid (nothing written)
//!      │ ✓
//!      ▼
//! id = UUID v4, created_at = now
//!      │
//!      ▼
//! INSERT INTO calculations ... ──► Calculation
//! ```
//!
//! ## Ordering
//! `list` sorts by the requested column, then by `rowid` in the same
//! direction so rows with equal keys keep a stable insertion order.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CreateError, DbError, DbResult};
use tipsplit_core::validation::validate_new_calculation;
use tipsplit_core::{
    Calculation, NewCalculation, SortDirection, SortKey, Statistics, StatisticsTotals,
};

const COLUMNS: &str = "id, bill_amount, tip_percentage, tip_amount, total_amount, \
                       people_count, per_person_amount, created_at";

/// Repository for calculation records.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CalculationRepository::new(pool);
///
/// let saved = repo.create(candidate).await?;
/// let page = repo.list(SortKey::Date, SortDirection::Desc, 0, 20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CalculationRepository {
    pool: SqlitePool,
}

impl CalculationRepository {
    /// Creates a new CalculationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CalculationRepository { pool }
    }

    /// Validates and stores a candidate.
    ///
    /// ## Returns
    /// * `Ok(Calculation)` - the stored record with its id and timestamp
    /// * `Err(CreateError::Invalid)` - every failed rule; nothing written
    /// * `Err(CreateError::Db)` - the insert itself failed
    pub async fn create(&self, candidate: NewCalculation) -> Result<Calculation, CreateError> {
        validate_new_calculation(&candidate)?;

        let record = candidate.into_record(Uuid::new_v4().to_string(), Utc::now());
        self.insert(&record).await?;

        info!(
            id = %record.id,
            total = %record.total_amount,
            people = record.people_count,
            "Calculation stored"
        );
        Ok(record)
    }

    /// Inserts a record as-is, without validation.
    ///
    /// Used by `create` and by the seed tool, which back-dates
    /// `created_at`. The table's CHECK constraints still apply.
    pub async fn insert(&self, record: &Calculation) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO calculations (
                id, bill_amount, tip_percentage, tip_amount, total_amount,
                people_count, per_person_amount, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&record.id)
        .bind(record.bill_amount)
        .bind(record.tip_percentage)
        .bind(record.tip_amount)
        .bind(record.total_amount)
        .bind(record.people_count)
        .bind(record.per_person_amount)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a calculation by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Calculation>> {
        let sql = format!("SELECT {COLUMNS} FROM calculations WHERE id = ?1");

        let record = sqlx::query_as::<_, Calculation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Returns one page of records.
    ///
    /// `sort` and `direction` are closed enums, so the interpolated
    /// column name and keyword can only be known literals.
    pub async fn list(
        &self,
        sort: SortKey,
        direction: SortDirection,
        offset: i64,
        limit: i64,
    ) -> DbResult<Vec<Calculation>> {
        debug!(
            sort = %sort,
            direction = %direction,
            offset,
            limit,
            "Listing calculations"
        );

        let sql = format!(
            "SELECT {COLUMNS} FROM calculations ORDER BY {column} {dir}, rowid {dir} LIMIT ?1 OFFSET ?2",
            column = sort.column(),
            dir = direction.keyword(),
        );

        let records = sqlx::query_as::<_, Calculation>(&sql)
            .bind(limit.max(0))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "List returned calculations");
        Ok(records)
    }

    /// Number of stored calculations.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calculations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Dashboard statistics over every record.
    ///
    /// One aggregate query returns raw integer sums; rounding of the
    /// averages happens in [`Statistics::from_totals`].
    pub async fn aggregate(&self) -> DbResult<Statistics> {
        let totals = sqlx::query_as::<_, StatisticsTotals>(
            r#"
            SELECT
                COUNT(*)                           AS count,
                COALESCE(SUM(tip_percentage), 0)   AS tip_percentage_bps_sum,
                COALESCE(SUM(bill_amount), 0)      AS bill_amount_cents_sum,
                COALESCE(SUM(tip_amount), 0)       AS tip_amount_cents_sum,
                COALESCE(SUM(people_count), 0)     AS people_count_sum
            FROM calculations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        debug!(count = totals.count, "Aggregated calculations");
        Ok(Statistics::from_totals(totals))
    }

    /// Removes every record. Returns the number deleted.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM calculations")
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        info!(deleted = result.rows_affected(), "Calculation history cleared");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Tests
// =============================================================================
