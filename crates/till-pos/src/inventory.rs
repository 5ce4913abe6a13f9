//! # Inventory Manager
//!
//! Product CRUD, search and stock decrements.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Operations                               │
//! │                                                                         │
//! │  ProductForm (text) ──parse()──► NewProduct ──► add_product()          │
//! │                                             └─► edit_product(id)       │
//! │  add_product_input / save_edit: same, driven by a Session's forms      │
//! │                                                                         │
//! │  delete_product(id)      idempotent                                    │
//! │  search(query)           name or price text, listing order kept        │
//! │  decrement_stock(id, n)  guarded, never below zero                     │
//! │  reset_all()             removes every product                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation returns the record (or row count) it produced, so a
//! caller can update its view without reloading the whole list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use till_core::search::filter_products;
use till_core::validation::{
    parse_price, parse_stock, validate_product_name, validate_quantity, validate_search_query,
};
use till_core::{CoreError, NewProduct, Product, ProductId};
use till_db::Database;

use crate::error::{PosError, PosResult};
use crate::session::Session;

// =============================================================================
// Product Form
// =============================================================================

/// Raw product fields as typed by the user.
///
/// Nothing is validated until [`ProductForm::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    /// Opaque URI from the image source.
    pub image: Option<String>,
}

impl ProductForm {
    /// Pre-fills a form for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            price: product.price().to_plain_string(),
            stock: product.stock.to_string(),
            image: product.image.clone(),
        }
    }

    /// Validates the text fields and builds a `NewProduct`.
    ///
    /// Fields are checked in form order: name, price, stock.
    pub fn parse(&self) -> PosResult<NewProduct> {
        validate_product_name(&self.name)?;
        let price = parse_price(&self.price)?;
        let stock = parse_stock(&self.stock)?;

        Ok(NewProduct::new(&self.name, price, stock, self.image.clone())?)
    }

    /// Empties every field.
    pub fn clear(&mut self) {
        *self = ProductForm::default();
    }
}

// =============================================================================
// Inventory Manager
// =============================================================================

/// Product operations over the store.
///
/// Cheap to clone; clones share the database pool.
#[derive(Debug, Clone)]
pub struct InventoryManager {
    db: Database,
}

impl InventoryManager {
    pub fn new(db: Database) -> Self {
        InventoryManager { db }
    }

    /// Validates and stores a new product.
    pub async fn add_product(&self, product: &NewProduct) -> PosResult<Product> {
        product.validate()?;

        let created = self.db.products().insert(product).await?;
        info!(id = created.id, name = %created.name, "Product added");
        Ok(created)
    }

    /// Parses a form and stores the product.
    pub async fn add_product_form(&self, form: &ProductForm) -> PosResult<Product> {
        let product = form.parse()?;
        self.add_product(&product).await
    }

    /// Replaces every field of an existing product.
    ///
    /// ## Errors
    /// - Validation errors, before anything is written
    /// - `NotFound` if no product has this id; the table is unchanged
    pub async fn edit_product(&self, id: ProductId, product: &NewProduct) -> PosResult<Product> {
        product.validate()?;

        let updated = self.db.products().update(id, product).await.map_err(|e| {
            let err = PosError::from(e);
            if matches!(err, PosError::NotFound { .. }) {
                warn!(id, "Edit of missing product rejected");
            }
            err
        })?;

        info!(id, name = %updated.name, "Product edited");
        Ok(updated)
    }

    /// Parses a form and replaces the product with it.
    pub async fn edit_product_form(&self, id: ProductId, form: &ProductForm) -> PosResult<Product> {
        let product = form.parse()?;
        self.edit_product(id, &product).await
    }

    /// Adds the product typed into the session's add form.
    ///
    /// The form is cleared on success and left as typed on failure.
    pub async fn add_product_input(&self, session: &mut Session) -> PosResult<Product> {
        let created = self.add_product_form(&session.new_product).await?;
        session.new_product.clear();
        Ok(created)
    }

    /// Saves the session's open edit dialog.
    ///
    /// Returns `None` when no edit is open. The dialog is closed on
    /// success and stays open with its fields on failure.
    pub async fn save_edit(&self, session: &mut Session) -> PosResult<Option<Product>> {
        let Some(edit) = session.editing.as_ref() else {
            return Ok(None);
        };

        let updated = self.edit_product_form(edit.id, &edit.form).await?;
        session.cancel_edit();
        Ok(Some(updated))
    }

    /// Removes a product. Deleting a missing id is not an error.
    ///
    /// Returns `true` if a record was removed.
    pub async fn delete_product(&self, id: ProductId) -> PosResult<bool> {
        let removed = self.db.products().delete(id).await?;
        if removed {
            info!(id, "Product deleted");
        } else {
            debug!(id, "Delete of missing product ignored");
        }
        Ok(removed)
    }

    /// Every product in listing order.
    pub async fn list(&self) -> PosResult<Vec<Product>> {
        Ok(self.db.products().list_all().await?)
    }

    /// A single product.
    pub async fn get(&self, id: ProductId) -> PosResult<Product> {
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| PosError::not_found("Product", id))
    }

    /// Products whose name or price text contains `query`.
    ///
    /// An empty or whitespace-only query returns every product.
    pub async fn search(&self, query: &str) -> PosResult<Vec<Product>> {
        let query = validate_search_query(query)?;
        let products = self.list().await?;

        let found: Vec<Product> = filter_products(&products, &query)
            .into_iter()
            .cloned()
            .collect();

        debug!(query = %query, count = found.len(), "Search complete");
        Ok(found)
    }

    /// Takes `amount` units off a product's stock.
    ///
    /// ## Errors
    /// - Validation error if `amount < 1`
    /// - `NotFound` if no product has this id
    /// - `InsufficientStock` if fewer than `amount` units are on hand;
    ///   stock is unchanged
    pub async fn decrement_stock(&self, id: ProductId, amount: i64) -> PosResult<Product> {
        validate_quantity(amount)?;

        let repo = self.db.products();
        if let Some(updated) = repo.decrement_stock(id, amount).await? {
            debug!(id, amount, stock = updated.stock, "Stock decremented");
            return Ok(updated);
        }

        // Nothing was written; find out why.
        match repo.get_by_id(id).await? {
            None => Err(PosError::not_found("Product", id)),
            Some(product) => {
                warn!(id, available = product.stock, requested = amount, "Insufficient stock");
                Err(CoreError::InsufficientStock {
                    product_id: id,
                    available: product.stock,
                    requested: amount,
                }
                .into())
            }
        }
    }

    /// Deletes every product. Irreversible.
    ///
    /// Returns the number of products removed.
    pub async fn reset_all(&self) -> PosResult<u64> {
        let removed = self.db.products().delete_all().await?;
        info!(removed, "Inventory reset");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Money, ValidationError};
    use till_db::DbConfig;

    async fn manager() -> InventoryManager {
        InventoryManager::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn form(name: &str, price: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
            image: None,
        }
    }

    fn soda() -> NewProduct {
        NewProduct::new("Soda", Money::from_cents(150), 3, None).unwrap()
    }

    #[test]
    fn test_form_parse() {
        let product = form(" Soda ", "1.50", "3").parse().unwrap();
        assert_eq!(product.name, "Soda");
        assert_eq!(product.price_cents, 150);
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn test_form_rejects_bad_fields() {
        let cases = [
            form("", "1.50", "3"),
            form("   ", "1.50", "3"),
            form("Soda", "", "3"),
            form("Soda", "abc", "3"),
            form("Soda", "-1", "3"),
            form("Soda", "NaN", "3"),
            form("Soda", "1.50", "-1"),
            form("Soda", "1.50", "2.5"),
            form("Soda", "1.50", ""),
        ];

        for case in cases {
            let err = case.parse().unwrap_err();
            assert!(
                matches!(err, PosError::Core(CoreError::Validation(_))),
                "{case:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_form_from_product() {
        let product = Product {
            id: 4,
            name: "Soda".to_string(),
            price_cents: 150,
            stock: 3,
            image: Some("file:///soda.jpg".to_string()),
        };

        let form = ProductForm::from_product(&product);
        assert_eq!(form.price, "1.5");
        assert_eq!(form.stock, "3");

        let parsed = form.parse().unwrap();
        assert_eq!(parsed.price_cents, 150);
        assert_eq!(parsed.image, product.image);
    }

    #[tokio::test]
    async fn test_add_then_list_contains_once() {
        let inventory = manager().await;
        let inputs = [("Soda", "1.5", "3"), ("Chips", "0.99", "0"), ("Free Sample", "0", "12")];

        for (name, price, stock) in inputs {
            let created = inventory.add_product_form(&form(name, price, stock)).await.unwrap();
            let listed = inventory.list().await.unwrap();
            assert_eq!(listed.iter().filter(|p| **p == created).count(), 1);
        }

        assert_eq!(inventory.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_add_writes_nothing() {
        let inventory = manager().await;
        let err = inventory.add_product_form(&form("", "1.5", "3")).await.unwrap_err();
        assert!(matches!(
            err,
            PosError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(inventory.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_replaces_fields() {
        let inventory = manager().await;
        let created = inventory.add_product(&soda()).await.unwrap();

        let edited = inventory
            .edit_product_form(created.id, &form("Cola", "2.25", "10"))
            .await
            .unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(edited.name, "Cola");
        assert_eq!(edited.price_cents, 225);
        assert_eq!(edited.stock, 10);
        assert_eq!(inventory.get(created.id).await.unwrap(), edited);
    }

    #[tokio::test]
    async fn test_edit_missing_is_not_found() {
        let inventory = manager().await;
        inventory.add_product(&soda()).await.unwrap();

        let err = inventory.edit_product(999, &soda()).await.unwrap_err();
        assert!(matches!(err, PosError::NotFound { .. }));
        assert_eq!(inventory.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let inventory = manager().await;
        let created = inventory.add_product(&soda()).await.unwrap();

        assert!(inventory.delete_product(created.id).await.unwrap());
        assert!(!inventory.delete_product(created.id).await.unwrap());
        assert!(matches!(
            inventory.get(created.id).await.unwrap_err(),
            PosError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_search() {
        let inventory = manager().await;
        inventory.add_product(&soda()).await.unwrap();
        inventory
            .add_product_form(&form("Chips", "0.99", "5"))
            .await
            .unwrap();

        let found = inventory.search("sod").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Soda");

        let found = inventory.search("0.99").await.unwrap();
        assert_eq!(found[0].name, "Chips");

        assert_eq!(inventory.search("").await.unwrap().len(), 2);
        assert_eq!(inventory.search("  ").await.unwrap().len(), 2);

        let long = "x".repeat(101);
        assert!(inventory.search(&long).await.is_err());
    }

    #[tokio::test]
    async fn test_decrement_stock() {
        let inventory = manager().await;
        let created = inventory.add_product(&soda()).await.unwrap();

        let updated = inventory.decrement_stock(created.id, 2).await.unwrap();
        assert_eq!(updated.stock, 1);

        let err = inventory.decrement_stock(created.id, 2).await.unwrap_err();
        assert!(matches!(
            err,
            PosError::Core(CoreError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            })
        ));
        assert_eq!(inventory.get(created.id).await.unwrap().stock, 1);

        assert!(matches!(
            inventory.decrement_stock(created.id, 0).await.unwrap_err(),
            PosError::Core(CoreError::Validation(_))
        ));
        assert!(matches!(
            inventory.decrement_stock(999, 1).await.unwrap_err(),
            PosError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_add_input_clears_form_only_on_success() {
        let inventory = manager().await;
        let mut session = Session::new();

        session.new_product = form("Soda", "abc", "3");
        assert!(inventory.add_product_input(&mut session).await.is_err());
        assert_eq!(session.new_product.price, "abc");

        session.new_product.price = "1.50".to_string();
        let created = inventory.add_product_input(&mut session).await.unwrap();
        assert_eq!(created.price_cents, 150);
        assert_eq!(session.new_product, ProductForm::default());
        assert_eq!(inventory.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_edit_closes_dialog() {
        let inventory = manager().await;
        let mut session = Session::new();
        let product = inventory.add_product(&soda()).await.unwrap();

        assert_eq!(inventory.save_edit(&mut session).await.unwrap(), None);

        session.begin_edit(&product);
        if let Some(edit) = session.editing.as_mut() {
            edit.form.stock = "-1".to_string();
        }
        assert!(inventory.save_edit(&mut session).await.is_err());
        assert!(session.is_editing());

        if let Some(edit) = session.editing.as_mut() {
            edit.form.stock = "7".to_string();
        }
        let saved = inventory.save_edit(&mut session).await.unwrap().unwrap();
        assert_eq!(saved.stock, 7);
        assert!(!session.is_editing());
    }

    #[tokio::test]
    async fn test_save_edit_of_deleted_product_keeps_dialog() {
        let inventory = manager().await;
        let mut session = Session::new();
        let product = inventory.add_product(&soda()).await.unwrap();

        session.begin_edit(&product);
        inventory.delete_product(product.id).await.unwrap();

        let err = inventory.save_edit(&mut session).await.unwrap_err();
        assert!(matches!(err, PosError::NotFound { .. }));
        assert!(session.is_editing());
    }

    #[tokio::test]
    async fn test_reset_all() {
        let inventory = manager().await;
        inventory.add_product(&soda()).await.unwrap();
        inventory.add_product(&soda()).await.unwrap();

        assert_eq!(inventory.reset_all().await.unwrap(), 2);
        assert!(inventory.list().await.unwrap().is_empty());
    }
}
