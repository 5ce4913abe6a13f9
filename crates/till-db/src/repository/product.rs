//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations (full-replace update)
//! - Guarded stock decrement
//! - Bulk reset
//!
//! ## Stock Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE products SET stock = stock - ?amount                           │
//! │  WHERE id = ?id AND stock >= ?amount                                   │
//! │  RETURNING ...                                                         │
//! │                                                                         │
//! │  stock 3, amount 1  → row returned, stock 2                            │
//! │  stock 0, amount 1  → no row, nothing written                          │
//! │  unknown id         → no row, nothing written                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The check and the write are one statement, so two concurrent
//! decrements can never take the same last unit.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::{NewProduct, Product, ProductId};

const PRODUCT_COLUMNS: &str = "id, name, price_cents, stock, image";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product in ascending id order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its assigned id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let inserted = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, price_cents, stock, image)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Replaces every field of an existing product.
    ///
    /// ## Errors
    /// `DbError::NotFound` if no product has this id; nothing is written.
    pub async fn update(&self, id: ProductId, product: &NewProduct) -> DbResult<Product> {
        debug!(id, name = %product.name, "Updating product");

        let updated = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = ?2, price_cents = ?3, stock = ?4, image = ?5
            WHERE id = ?1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.image)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Returns `false` when no product had this id.
    pub async fn delete(&self, id: ProductId) -> DbResult<bool> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Takes `amount` units off a product if at least that many are on hand.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Stock decremented, updated row returned
    /// * `Ok(None)` - Unknown id or not enough stock; nothing written
    pub async fn decrement_stock(&self, id: ProductId, amount: i64) -> DbResult<Option<Product>> {
        debug!(id, amount, "Decrementing stock");

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET stock = stock - ?2
            WHERE id = ?1 AND stock >= ?2
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Deletes every product. Returns the number of rows removed.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        debug!(removed = result.rows_affected(), "Deleted all products");
        Ok(result.rows_affected())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    fn new_product(name: &str, price_cents: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents,
            stock,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_in_order() {
        let repo = repo().await;
        let soda = repo.insert(&new_product("Soda", 150, 3)).await.unwrap();
        let chips = repo.insert(&new_product("Chips", 99, 1)).await.unwrap();

        assert!(chips.id > soda.id);
        assert_eq!(soda.name, "Soda");
        assert_eq!(soda.price_cents, 150);

        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed, vec![soda, chips]);
    }

    #[tokio::test]
    async fn test_image_round_trips_verbatim() {
        let repo = repo().await;
        let mut product = new_product("Soda", 150, 3);
        product.image = Some("content://media/external/images/7".to_string());

        let inserted = repo.insert(&product).await.unwrap();
        let fetched = repo.get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.image, product.image);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repo = repo().await;
        let soda = repo.insert(&new_product("Soda", 150, 3)).await.unwrap();

        let updated = repo
            .update(soda.id, &new_product("Diet Soda", 175, 10))
            .await
            .unwrap();

        assert_eq!(updated.id, soda.id);
        assert_eq!(updated.name, "Diet Soda");
        assert_eq!(updated.price_cents, 175);
        assert_eq!(updated.stock, 10);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        repo.insert(&new_product("Soda", 150, 3)).await.unwrap();

        let err = repo.update(999, &new_product("Ghost", 1, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let soda = repo.insert(&new_product("Soda", 150, 3)).await.unwrap();

        assert!(repo.delete(soda.id).await.unwrap());
        assert!(!repo.delete(soda.id).await.unwrap());
        assert!(repo.get_by_id(soda.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_decrement_stock_never_goes_negative() {
        let repo = repo().await;
        let soda = repo.insert(&new_product("Soda", 150, 2)).await.unwrap();

        let after = repo.decrement_stock(soda.id, 1).await.unwrap().unwrap();
        assert_eq!(after.stock, 1);

        assert!(repo.decrement_stock(soda.id, 2).await.unwrap().is_none());

        let after = repo.decrement_stock(soda.id, 1).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);

        assert!(repo.decrement_stock(soda.id, 1).await.unwrap().is_none());
        assert_eq!(repo.get_by_id(soda.id).await.unwrap().unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_decrement_unknown_id() {
        let repo = repo().await;
        assert!(repo.decrement_stock(42, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_negative_stock_rejected_by_schema() {
        let repo = repo().await;
        let err = repo.insert(&new_product("Soda", 150, -1)).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = repo().await;
        repo.insert(&new_product("Soda", 150, 3)).await.unwrap();
        repo.insert(&new_product("Chips", 99, 1)).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.list_all().await.unwrap().is_empty());
        assert_eq!(repo.delete_all().await.unwrap(), 0);
    }
}
