//! # Session State
//!
//! Everything one cashier screen holds between operations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session                                                               │
//! │  ├── new_product: ProductForm        (add-product inputs)              │
//! │  ├── editing: Option<EditSession>    (edit dialog, when open)          │
//! │  ├── search_query: String                                              │
//! │  ├── payment_input: String                                             │
//! │  └── cart: Cart                      (entries + CheckoutState)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is plain data owned by the caller and lent to
//! [`Checkout`](crate::Checkout) and [`InventoryManager`](crate::InventoryManager)
//! operations by reference.

use till_core::search::filter_products;
use till_core::{Cart, Product, ProductId, Sale};

use crate::config::PosConfig;
use crate::inventory::ProductForm;

/// An open edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Product being edited.
    pub id: ProductId,
    pub form: ProductForm,
}

/// Input and cart state for one screen.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub new_product: ProductForm,
    pub editing: Option<EditSession>,
    pub search_query: String,
    pub payment_input: String,
    pub cart: Cart,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Opens the edit dialog pre-filled from `product`.
    ///
    /// Replaces any edit already in progress.
    pub fn begin_edit(&mut self, product: &Product) {
        self.editing = Some(EditSession {
            id: product.id,
            form: ProductForm::from_product(product),
        });
    }

    /// Closes the edit dialog, discarding its fields.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The subset of `products` matching the current search text.
    pub fn visible_products<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter_products(products, &self.search_query)
    }
}

/// Renders a sale's lines with the configured currency.
///
/// ```text
/// Soda($1.50), Chips($0.99)
/// ```
pub fn render_sale_summary(sale: &Sale, config: &PosConfig) -> String {
    sale.summary_with(|amount| config.format_currency(amount.cents()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use till_core::SaleLine;

    fn product(id: ProductId, name: &str, price_cents: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price_cents,
            stock: 5,
            image: None,
        }
    }

    #[test]
    fn test_edit_lifecycle() {
        let mut session = Session::new();
        assert!(!session.is_editing());

        session.begin_edit(&product(3, "Soda", 150));
        let edit = session.editing.as_ref().unwrap();
        assert_eq!(edit.id, 3);
        assert_eq!(edit.form.name, "Soda");
        assert_eq!(edit.form.price, "1.5");

        session.begin_edit(&product(4, "Chips", 99));
        assert_eq!(session.editing.as_ref().unwrap().id, 4);

        session.cancel_edit();
        assert!(!session.is_editing());
    }

    #[test]
    fn test_visible_products_follow_query() {
        let products = vec![product(1, "Soda", 150), product(2, "Chips", 99)];
        let mut session = Session::new();

        assert_eq!(session.visible_products(&products).len(), 2);

        session.search_query = "sod".to_string();
        let visible = session.visible_products(&products);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Soda");
    }

    #[test]
    fn test_render_sale_summary() {
        let sale = Sale {
            id: 1,
            lines: vec![
                SaleLine {
                    name: "Soda".to_string(),
                    price_cents: 150,
                },
                SaleLine {
                    name: "Chips".to_string(),
                    price_cents: 99,
                },
            ],
            total_cents: 249,
            created_at: Utc::now(),
        };

        let config = PosConfig {
            currency_symbol: "£".to_string(),
            ..PosConfig::in_memory()
        };
        assert_eq!(render_sale_summary(&sale, &config), "Soda(£1.50), Chips(£0.99)");
    }
}
