//! # Fixed Cost Repository
//!
//! Database operations for fixed costs (server rental, tool seats, ads).
//!
//! ## Key Operations
//! - Admin CRUD with validation before every write
//! - Filtered listing for the admin table
//! - `list_active` feeding the proration engine
//!
//! ## Listing Filters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list("vps", Some(true))                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  name / category / notes LIKE '%vps%'                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  is_active = 1            (skipped when None)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY created_at DESC (newest first)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use aistore_core::validation::{validate_new_fixed_cost, validate_search_query};
use aistore_core::{FixedCostRecord, NewFixedCost};

use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, name, amount, category, start_date, end_date,
        is_active, notes, created_at, updated_at
    FROM fixed_costs
"#;

/// Repository for fixed cost database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = FixedCostRepository::new(pool);
///
/// let created = repo.insert(&new_cost).await?;
/// let active = repo.list_active().await?;
/// ```
#[derive(Debug, Clone)]
pub struct FixedCostRepository {
    pool: SqlitePool,
}

impl FixedCostRepository {
    /// Creates a new FixedCostRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FixedCostRepository { pool }
    }

    /// Every active fixed cost, for proration.
    pub async fn list_active(&self) -> DbResult<Vec<FixedCostRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE is_active = 1 ORDER BY start_date, id");

        let costs = sqlx::query_as::<_, FixedCostRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = costs.len(), "Loaded active fixed costs");
        Ok(costs)
    }

    /// Lists fixed costs for the admin table.
    ///
    /// ## Arguments
    /// * `search` - Substring matched against name, category and notes.
    ///   Empty matches everything.
    /// * `is_active` - `Some(flag)` filters on the flag, `None` returns both
    pub async fn list(&self, search: &str, is_active: Option<bool>) -> DbResult<Vec<FixedCostRecord>> {
        let search = validate_search_query(search)?;
        let pattern = format!("%{}%", search);

        debug!(search = %search, is_active = ?is_active, "Listing fixed costs");

        let sql = format!(
            "{SELECT_COLUMNS}
            WHERE (?1 = '' OR name LIKE ?2 OR category LIKE ?2 OR notes LIKE ?2)
              AND (?3 IS NULL OR is_active = ?3)
            ORDER BY created_at DESC, rowid DESC"
        );

        let costs = sqlx::query_as::<_, FixedCostRecord>(&sql)
            .bind(&search)
            .bind(&pattern)
            .bind(is_active)
            .fetch_all(&self.pool)
            .await?;

        Ok(costs)
    }

    /// Gets a fixed cost by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<FixedCostRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");

        let cost = sqlx::query_as::<_, FixedCostRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cost)
    }

    /// Validates and inserts a new fixed cost.
    ///
    /// ## Returns
    /// The stored record with generated ID and timestamps.
    pub async fn insert(&self, input: &NewFixedCost) -> DbResult<FixedCostRecord> {
        validate_new_fixed_cost(input)?;

        let now = Utc::now();
        let record = FixedCostRecord {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            notes: input.notes.trim().to_string(),
            amount: input.amount,
            start_date: input.start_date,
            end_date: input.end_date,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %record.id, name = %record.name, amount = %record.amount, "Inserting fixed cost");

        sqlx::query(
            r#"
            INSERT INTO fixed_costs (
                id, name, amount, category, start_date, end_date,
                is_active, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(record.amount)
        .bind(&record.category)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.is_active)
        .bind(&record.notes)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Validates and replaces the editable fields of a fixed cost.
    pub async fn update(&self, id: &str, input: &NewFixedCost) -> DbResult<FixedCostRecord> {
        validate_new_fixed_cost(input)?;

        debug!(id = %id, "Updating fixed cost");

        let result = sqlx::query(
            r#"
            UPDATE fixed_costs
            SET
                name = ?2,
                amount = ?3,
                category = ?4,
                start_date = ?5,
                end_date = ?6,
                is_active = ?7,
                notes = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.amount)
        .bind(input.category.trim())
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.is_active)
        .bind(input.notes.trim())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("FixedCost", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("FixedCost", id))
    }

    /// Deletes a fixed cost permanently.
    ///
    /// Reports are computed on demand, so no history depends on the row.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting fixed cost");

        let result = sqlx::query("DELETE FROM fixed_costs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("FixedCost", id));
        }

        Ok(())
    }

    /// Counts active fixed costs (dashboard badge).
    pub async fn active_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fixed_costs WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
