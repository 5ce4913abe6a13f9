//! # Sale Repository
//!
//! Database operations for sales and their lines.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales                         sale_items                               │
//! │  ┌────┬─────────────┐          ┌─────────┬──────────┬───────┬────────┐ │
//! │  │ id │ total_cents │ ◄─────── │ sale_id │ position │ name  │ price  │ │
//! │  ├────┼─────────────┤          ├─────────┼──────────┼───────┼────────┤ │
//! │  │  1 │         249 │          │       1 │        0 │ Soda  │   150  │ │
//! │  └────┴─────────────┘          │       1 │        1 │ Chips │    99  │ │
//! │                                └─────────┴──────────┴───────┴────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A sale and its lines are written in one transaction: a reader sees the
//! whole sale or nothing.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::{Sale, SaleId, SaleLine};

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: SaleId,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleLineRow {
    sale_id: SaleId,
    name: String,
    price_cents: i64,
}

impl SaleRow {
    fn into_sale(self, lines: Vec<SaleLine>) -> Sale {
        Sale {
            id: self.id,
            lines,
            total_cents: self.total_cents,
            created_at: self.created_at,
        }
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a completed sale with its lines, in order.
    ///
    /// ## Transaction
    /// The `sales` row and every `sale_items` row commit together. If any
    /// insert fails the transaction is dropped and rolled back.
    pub async fn insert(
        &self,
        lines: &[SaleLine],
        total_cents: i64,
        created_at: DateTime<Utc>,
    ) -> DbResult<Sale> {
        debug!(lines = lines.len(), total_cents, "Inserting sale");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            INSERT INTO sales (total_cents, created_at)
            VALUES (?1, ?2)
            RETURNING id, total_cents, created_at
            "#,
        )
        .bind(total_cents)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        for (position, line) in lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, position, name, price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(row.id)
            .bind(position as i64)
            .bind(&line.name)
            .bind(line.price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(id = row.id, "Sale recorded");
        Ok(row.into_sale(lines.to_vec()))
    }

    /// Gets a sale by ID, with its lines.
    pub async fn get_by_id(&self, id: SaleId) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            "SELECT id, total_cents, created_at FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, SaleLineRow>(
            r#"
            SELECT sale_id, name, price_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|l| SaleLine {
            name: l.name,
            price_cents: l.price_cents,
        })
        .collect();

        Ok(Some(row.into_sale(lines)))
    }

    /// Lists every sale, newest first.
    pub async fn list_recent(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            "SELECT id, total_cents, created_at FROM sales ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let line_rows = sqlx::query_as::<_, SaleLineRow>(
            "SELECT sale_id, name, price_cents FROM sale_items ORDER BY sale_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut lines_by_sale: HashMap<SaleId, Vec<SaleLine>> = HashMap::new();
        for line in line_rows {
            lines_by_sale.entry(line.sale_id).or_default().push(SaleLine {
                name: line.name,
                price_cents: line.price_cents,
            });
        }

        let sales: Vec<Sale> = rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_sale.remove(&row.id).unwrap_or_default();
                row.into_sale(lines)
            })
            .collect();

        debug!(count = sales.len(), "Listed sales");
        Ok(sales)
    }

    /// Deletes every sale and its lines. Returns the number of sales removed.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        sqlx::query("DELETE FROM sale_items")
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM sales").execute(&mut *tx).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(removed = result.rows_affected(), "Deleted all sales");
        Ok(result.rows_affected())
    }

    /// Counts recorded sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
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

    fn line(name: &str, price_cents: i64) -> SaleLine {
        SaleLine {
            name: name.to_string(),
            price_cents,
        }
    }

    async fn repo() -> SaleRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().sales()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let lines = vec![line("Soda", 150), line("Chips", 99), line("Soda", 150)];

        let sale = repo.insert(&lines, 399, Utc::now()).await.unwrap();
        assert_eq!(sale.lines, lines);
        assert_eq!(sale.total_cents, 399);

        let fetched = repo.get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.lines, lines);
        assert_eq!(fetched.summary(), "Soda($1.50), Chips($0.99), Soda($1.50)");
        assert_eq!(fetched.created_at, sale.created_at);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repo = repo().await;
        assert!(repo.get_by_id(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let repo = repo().await;
        let first = repo.insert(&[line("Soda", 150)], 150, Utc::now()).await.unwrap();
        let second = repo
            .insert(&[line("Chips", 99), line("Candy", 25)], 124, Utc::now())
            .await
            .unwrap();

        let sales = repo.list_recent().await.unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].id, second.id);
        assert_eq!(sales[0].lines, vec![line("Chips", 99), line("Candy", 25)]);
        assert_eq!(sales[1].id, first.id);
        assert_eq!(sales[1].lines, vec![line("Soda", 150)]);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = repo().await;
        repo.insert(&[line("Soda", 150)], 150, Utc::now()).await.unwrap();
        repo.insert(&[line("Chips", 99)], 99, Utc::now()).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.list_recent().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
