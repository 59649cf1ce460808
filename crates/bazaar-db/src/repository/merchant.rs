//! # Merchant Repository
//!
//! Database operations for merchants.
//!
//! ## Merchant Find
//! ```text
//! find_first_by_name("mart")
//!
//!   candidates               name_folded      contains "mart"?
//!   ──────────────────────   ──────────────   ────────────────
//!   walmart                  walmart          ✓
//!   walgreens                walgreens
//!   K-Mart                   k-mart           ✓
//!   Ballmart                 ballmart         ✓  ← first by name_folded
//!   minimart                 minimart         ✓
//!
//!   ORDER BY name_folded, id  LIMIT 1  →  Ballmart
//! ```
//!
//! `name_folded` is written from [`fold_case`] on insert and the needle is
//! folded the same way, so non-ASCII names match case-insensitively too.
//! Matching uses `instr` rather than `LIKE`, so `%` and `_` in the needle
//! are literal characters.

use bazaar_core::filter::fold_case;
use bazaar_core::validation::validate_merchant_name;
use bazaar_core::Merchant;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Entity name used in NotFound titles.
pub(crate) const MERCHANT: &str = "Merchant";

const SELECT_MERCHANT: &str = "SELECT id, name, created_at, updated_at FROM merchants";

/// Row shape of the `merchants` table.
#[derive(Debug, sqlx::FromRow)]
struct MerchantRecord {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MerchantRecord> for Merchant {
    fn from(record: MerchantRecord) -> Self {
        Merchant {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Repository for merchant database operations.
#[derive(Debug, Clone)]
pub struct MerchantRepository {
    pool: SqlitePool,
}

impl MerchantRepository {
    /// Creates a new MerchantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MerchantRepository { pool }
    }

    /// Gets a merchant by id, `None` if absent.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Merchant>> {
        let sql = format!("{SELECT_MERCHANT} WHERE id = ?1");
        let record = sqlx::query_as::<_, MerchantRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Merchant::from))
    }

    /// Gets a merchant by id, failing with `Couldn't find Merchant with 'id'=<id>`.
    pub async fn find(&self, id: i64) -> DbResult<Merchant> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(MERCHANT, id))
    }

    /// All merchants, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Merchant>> {
        let sql = format!("{SELECT_MERCHANT} ORDER BY id");
        let records = sqlx::query_as::<_, MerchantRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "Listed merchants");
        Ok(records.into_iter().map(Merchant::from).collect())
    }

    /// The case-insensitive substring match whose folded name sorts first.
    ///
    /// Ties on the folded name go to the lower id. `Ok(None)` when
    /// nothing matches.
    pub async fn find_first_by_name(&self, needle: &str) -> DbResult<Option<Merchant>> {
        debug!(needle = %needle, "Finding merchant by name");

        let record = sqlx::query_as::<_, MerchantRecord>(&format!(
            "{SELECT_MERCHANT} WHERE instr(name_folded, ?1) > 0 \
             ORDER BY name_folded, id LIMIT 1"
        ))
        .bind(fold_case(needle))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Merchant::from))
    }

    /// Inserts a merchant. The name is trimmed and must not be blank.
    pub async fn insert(&self, name: &str) -> DbResult<Merchant> {
        let name = validate_merchant_name(name)?;
        let now = Utc::now();

        let record = sqlx::query_as::<_, MerchantRecord>(
            "INSERT INTO merchants (name, name_folded, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?3) RETURNING id, name, created_at, updated_at",
        )
        .bind(&name)
        .bind(fold_case(&name))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = record.id, name = %record.name, "Inserted merchant");
        Ok(record.into())
    }

    /// Deletes a merchant.
    ///
    /// Fails with NotFound if absent, and with
    /// [`DbError::ForeignKeyViolation`] while it still owns items.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM merchants WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(MERCHANT, id));
        }

        debug!(id, "Deleted merchant");
        Ok(())
    }

    /// Checks whether a merchant id resolves.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM merchants WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Number of merchants.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM merchants")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
