//! # Item Repository
//!
//! Database operations for items.
//!
//! ## Writes
//! ```text
//! create(NewItem) / update(id, ItemChanges)
//!      │
//!      ├── 1. merchant_id supplied? must exist, else NotFound (Merchant)
//!      ├── 2. field checks (bazaar_core::validation), all blanks reported
//!      └── 3. INSERT / UPDATE ... RETURNING
//! ```
//!
//! ## Search
//! One SQL shape per [`ItemQuery`] variant, all ordered by id:
//! ```text
//! NameContains(s)          instr(name_folded, fold_case(s)) > 0
//! PriceBetween{min,max}    unit_price_cents BETWEEN min AND max
//! PriceAtLeast(min)        unit_price_cents >= min
//! PriceAtMost(max)         unit_price_cents <= max
//! ```
//! A range with `min > max` simply matches nothing.

use bazaar_core::filter::fold_case;
use bazaar_core::validation::{validate_item_changes, validate_new_item};
use bazaar_core::{Item, ItemChanges, ItemQuery, Merchant, Money, NewItem};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::merchant::{MerchantRepository, MERCHANT};

/// Entity name used in NotFound titles.
const ITEM: &str = "Item";

const ITEM_COLUMNS: &str =
    "id, name, description, unit_price_cents, merchant_id, created_at, updated_at";

/// Row shape of the `items` table.
#[derive(Debug, sqlx::FromRow)]
struct ItemRecord {
    id: i64,
    name: String,
    description: String,
    unit_price_cents: i64,
    merchant_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Item {
            id: record.id,
            name: record.name,
            description: record.description,
            unit_price: Money::from_cents(record.unit_price_cents),
            merchant_id: record.merchant_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
/// let cheap = repo.search(&ItemQuery::PriceAtMost(Money::from_cents(1_000))).await?;
/// let owner = repo.merchant_of(cheap[0].id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    fn merchants(&self) -> MerchantRepository {
        MerchantRepository::new(self.pool.clone())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets an item by id, `None` if absent.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let record = sqlx::query_as::<_, ItemRecord>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Item::from))
    }

    /// Gets an item by id, failing with `Couldn't find Item with 'id'=<id>`.
    pub async fn find(&self, id: i64) -> DbResult<Item> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(ITEM, id))
    }

    /// All items, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let records = sqlx::query_as::<_, ItemRecord>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Listed items");
        Ok(records.into_iter().map(Item::from).collect())
    }

    /// Runs a resolved search query.
    pub async fn search(&self, query: &ItemQuery) -> DbResult<Vec<Item>> {
        debug!(mode = query.mode(), "Searching items");

        let records = match query {
            ItemQuery::NameContains(needle) => {
                sqlx::query_as::<_, ItemRecord>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items \
                     WHERE instr(name_folded, ?1) > 0 ORDER BY id"
                ))
                .bind(fold_case(needle))
                .fetch_all(&self.pool)
                .await?
            }
            ItemQuery::PriceBetween { min, max } => {
                sqlx::query_as::<_, ItemRecord>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items \
                     WHERE unit_price_cents >= ?1 AND unit_price_cents <= ?2 ORDER BY id"
                ))
                .bind(min.cents())
                .bind(max.cents())
                .fetch_all(&self.pool)
                .await?
            }
            ItemQuery::PriceAtLeast(min) => {
                sqlx::query_as::<_, ItemRecord>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items WHERE unit_price_cents >= ?1 ORDER BY id"
                ))
                .bind(min.cents())
                .fetch_all(&self.pool)
                .await?
            }
            ItemQuery::PriceAtMost(max) => {
                sqlx::query_as::<_, ItemRecord>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items WHERE unit_price_cents <= ?1 ORDER BY id"
                ))
                .bind(max.cents())
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = records.len(), "Search returned items");
        Ok(records.into_iter().map(Item::from).collect())
    }

    /// Items owned by a merchant. NotFound if the merchant is absent.
    pub async fn list_for_merchant(&self, merchant_id: i64) -> DbResult<Vec<Item>> {
        if !self.merchants().exists(merchant_id).await? {
            return Err(DbError::not_found(MERCHANT, merchant_id));
        }

        let records = sqlx::query_as::<_, ItemRecord>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE merchant_id = ?1 ORDER BY id"
        ))
        .bind(merchant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Item::from).collect())
    }

    /// The merchant owning an item. NotFound if the item is absent.
    pub async fn merchant_of(&self, item_id: i64) -> DbResult<Merchant> {
        let item = self.find(item_id).await?;
        self.merchants().find(item.merchant_id).await
    }

    /// Number of items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates an item.
    ///
    /// ## Errors
    /// - `NotFound` (Merchant) if `merchant_id` names no merchant
    /// - `ValidationFailed` listing every blank or malformed field
    pub async fn create(&self, input: NewItem) -> DbResult<Item> {
        if let Some(merchant_id) = input.merchant_id {
            self.ensure_merchant(merchant_id).await?;
        }
        let fields = validate_new_item(&input)?;
        let now = Utc::now();

        let record = sqlx::query_as::<_, ItemRecord>(&format!(
            "INSERT INTO items (name, name_folded, description, unit_price_cents, \
             merchant_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(fold_case(&fields.name))
        .bind(&fields.description)
        .bind(fields.unit_price.cents())
        .bind(fields.merchant_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = record.id, merchant_id = record.merchant_id, "Created item");
        Ok(record.into())
    }

    /// Applies a partial update.
    ///
    /// ## Errors
    /// - `NotFound` (Item) if `id` names no item
    /// - `NotFound` (Merchant) if a new `merchant_id` names no merchant
    /// - `ValidationFailed` if a supplied field is blank or malformed
    pub async fn update(&self, id: i64, changes: ItemChanges) -> DbResult<Item> {
        let current = self.find(id).await?;
        if changes.is_empty() {
            debug!(id, "Item update changes nothing");
            return Ok(current);
        }
        if let Some(merchant_id) = changes.merchant_id {
            self.ensure_merchant(merchant_id).await?;
        }
        let fields = validate_item_changes(&changes, &current)?;

        let record = sqlx::query_as::<_, ItemRecord>(&format!(
            "UPDATE items SET name = ?1, name_folded = ?2, description = ?3, \
             unit_price_cents = ?4, merchant_id = ?5, updated_at = ?6 \
             WHERE id = ?7 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(fold_case(&fields.name))
        .bind(&fields.description)
        .bind(fields.unit_price.cents())
        .bind(fields.merchant_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(ITEM, id))?;

        debug!(id, "Updated item");
        Ok(record.into())
    }

    /// Deletes an item. NotFound if absent.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ITEM, id));
        }

        debug!(id, "Deleted item");
        Ok(())
    }

    async fn ensure_merchant(&self, merchant_id: i64) -> DbResult<()> {
        if self.merchants().exists(merchant_id).await? {
            Ok(())
        } else {
            Err(DbError::not_found(MERCHANT, merchant_id))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use bazaar_core::validation::Field;
    use bazaar_core::{CoreError, FieldError, ItemChanges, ItemQuery, Money, NewItem, PriceInput};

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let merchant = db.merchants().insert("Ballmart").await.unwrap();
        (db, merchant.id)
    }

    fn new_item(name: &str, price: &str, merchant_id: i64) -> NewItem {
        NewItem {
            name: Some(name.to_string()),
            description: Some(format!("{name} for sale")),
            unit_price: Some(PriceInput::Text(price.to_string())),
            merchant_id: Some(merchant_id),
        }
    }

    fn names(items: &[bazaar_core::Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (db, merchant_id) = setup().await;

        let item = db
            .items()
            .create(new_item("Treadmill", "1000.00", merchant_id))
            .await
            .unwrap();
        assert_eq!(item.unit_price, Money::from_cents(100_000));
        assert_eq!(item.merchant_id, merchant_id);

        let found = db.items().find(item.id).await.unwrap();
        assert_eq!(found, item);
        assert_eq!(db.items().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_missing_description() {
        let (db, merchant_id) = setup().await;
        let input = NewItem {
            description: None,
            ..new_item("Treadmill", "1000", merchant_id)
        };

        let err = db.items().create(input).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Description can't be blank");
        assert_eq!(db.items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_with_unknown_merchant_is_not_found() {
        let (db, _) = setup().await;
        let input = NewItem {
            name: None,
            ..new_item("Treadmill", "1000", 999)
        };

        let err = db.items().create(input).await.unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find Merchant with 'id'=999");
    }

    #[tokio::test]
    async fn test_create_without_merchant_is_validation_failure() {
        let (db, _) = setup().await;
        let input = NewItem {
            merchant_id: None,
            ..new_item("Treadmill", "1000", 0)
        };

        let err = db.items().create(input).await.unwrap_err();
        match err {
            DbError::Core(CoreError::ValidationFailed(validation)) => {
                assert_eq!(validation.fields(), &[FieldError::Blank(Field::MerchantId)]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_partial() {
        let (db, merchant_id) = setup().await;
        let item = db
            .items()
            .create(new_item("Treadmill", "1000", merchant_id))
            .await
            .unwrap();

        let updated = db
            .items()
            .update(
                item.id,
                ItemChanges {
                    name: Some("Peloton".to_string()),
                    unit_price: Some(PriceInput::Text("1500.50".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "Peloton");
        assert_eq!(updated.description, item.description);
        assert_eq!(updated.unit_price, Money::from_cents(150_050));
        assert_eq!(db.items().find(item.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (db, merchant_id) = setup().await;
        let item = db
            .items()
            .create(new_item("Treadmill", "1000", merchant_id))
            .await
            .unwrap();

        let err = db.items().update(404, ItemChanges::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find Item with 'id'=404");

        let err = db
            .items()
            .update(
                item.id,
                ItemChanges {
                    merchant_id: Some(77),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find Merchant with 'id'=77");

        let err = db
            .items()
            .update(
                item.id,
                ItemChanges {
                    name: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Name can't be blank");
        assert_eq!(db.items().find(item.id).await.unwrap().name, "Treadmill");
    }

    #[tokio::test]
    async fn test_move_item_to_other_merchant() {
        let (db, merchant_id) = setup().await;
        let other = db.merchants().insert("Carmart").await.unwrap();
        let item = db
            .items()
            .create(new_item("Ball", "2", merchant_id))
            .await
            .unwrap();

        db.items()
            .update(
                item.id,
                ItemChanges {
                    merchant_id: Some(other.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(db.items().merchant_of(item.id).await.unwrap(), other);
        assert!(db.items().list_for_merchant(merchant_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_not_found() {
        let (db, merchant_id) = setup().await;
        let item = db
            .items()
            .create(new_item("Treadmill", "1000", merchant_id))
            .await
            .unwrap();

        db.items().delete(item.id).await.unwrap();

        assert!(matches!(
            db.items().find(item.id).await.unwrap_err(),
            DbError::Core(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            db.items().delete(item.id).await.unwrap_err(),
            DbError::Core(CoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_by_name_is_case_insensitive_in_id_order() {
        let (db, merchant_id) = setup().await;
        for name in ["Turing Table", "chair", "small Table", "TABLET stand"] {
            db.items().create(new_item(name, "1", merchant_id)).await.unwrap();
        }

        let found = db
            .items()
            .search(&ItemQuery::NameContains("tab".to_string()))
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Turing Table", "small Table", "TABLET stand"]);
    }

    #[tokio::test]
    async fn test_search_by_name_folds_non_ascii() {
        let (db, merchant_id) = setup().await;
        let creme = db
            .items()
            .create(new_item("CRÈME BRÛLÉE Torch", "30", merchant_id))
            .await
            .unwrap();
        db.items().create(new_item("creme pot", "5", merchant_id)).await.unwrap();

        let found = db
            .items()
            .search(&ItemQuery::NameContains("crème".to_string()))
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["CRÈME BRÛLÉE Torch"]);

        db.items()
            .update(
                creme.id,
                ItemChanges {
                    name: Some("ÉCLAIR Pan".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stale = db
            .items()
            .search(&ItemQuery::NameContains("crème".to_string()))
            .await
            .unwrap();
        assert!(stale.is_empty());

        let renamed = db
            .items()
            .search(&ItemQuery::NameContains("éclair".to_string()))
            .await
            .unwrap();
        assert_eq!(names(&renamed), vec!["ÉCLAIR Pan"]);
    }

    #[tokio::test]
    async fn test_search_by_price() {
        let (db, merchant_id) = setup().await;
        for (name, price) in [("a", "10"), ("b", "50"), ("c", "88.88"), ("d", "150")] {
            db.items().create(new_item(name, price, merchant_id)).await.unwrap();
        }
        let units = |n: i64| Money::from_cents(n * 100);

        let floor = db.items().search(&ItemQuery::PriceAtLeast(units(50))).await.unwrap();
        assert_eq!(names(&floor), vec!["b", "c", "d"]);

        let ceiling = db.items().search(&ItemQuery::PriceAtMost(units(50))).await.unwrap();
        assert_eq!(names(&ceiling), vec!["a", "b"]);

        let range = db
            .items()
            .search(&ItemQuery::PriceBetween {
                min: units(50),
                max: units(100),
            })
            .await
            .unwrap();
        assert_eq!(names(&range), vec!["b", "c"]);

        let inverted = db
            .items()
            .search(&ItemQuery::PriceBetween {
                min: units(100),
                max: units(50),
            })
            .await
            .unwrap();
        assert!(inverted.is_empty());
    }

    #[tokio::test]
    async fn test_merchant_relationships() {
        let (db, merchant_id) = setup().await;
        let other = db.merchants().insert("Carmart").await.unwrap();
        db.items().create(new_item("Ball", "2", merchant_id)).await.unwrap();
        let car = db.items().create(new_item("Car", "20000", other.id)).await.unwrap();
        db.items().create(new_item("Bat", "15", merchant_id)).await.unwrap();

        let owned = db.items().list_for_merchant(merchant_id).await.unwrap();
        assert_eq!(names(&owned), vec!["Ball", "Bat"]);

        assert_eq!(db.items().merchant_of(car.id).await.unwrap().name, "Carmart");

        let err = db.items().list_for_merchant(999).await.unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find Merchant with 'id'=999");

        let err = db.items().merchant_of(999).await.unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find Item with 'id'=999");
    }
}
