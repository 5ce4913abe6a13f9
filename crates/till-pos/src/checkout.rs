//! # Checkout
//!
//! Cart accumulation, settlement and sales history.
//!
//! ## Checkout State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │           add_to_cart                     add_to_cart                   │
//! │   ┌──────┐ ─────────► ┌──────────────┐ ◄─────────┐                      │
//! │   │ Idle │            │ Accumulating │ ──────────┘                      │
//! │   └──────┘ ◄──┐       └──────────────┘                                  │
//! │               │          │        ▲                                     │
//! │               │   settle │        │ short payment / store failure       │
//! │               │          ▼        │                                     │
//! │               │       ┌──────────────┐                                  │
//! │               └────── │   Settling   │                                  │
//! │          sale recorded└──────────────┘                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Accounting
//! A unit of stock is taken when the product goes into the cart, not when
//! the cart is paid for. The cart entry is pushed only after the decrement
//! succeeds, so a product never has more cart entries than units taken
//! for it. Stock taken for a cart that is never settled stays taken.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use ts_rs::TS;

use till_core::validation::parse_payment;
use till_core::{Cart, CartEntry, CoreError, Money, Product, Sale};
use till_db::Database;

use crate::error::{PosError, PosResult};
use crate::inventory::InventoryManager;
use crate::session::Session;

/// Outcome of a successful settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Settlement {
    pub total: Money,
    pub payment: Money,
    pub change: Money,
    pub sale: Sale,
}

/// Cart and sale operations.
#[derive(Debug, Clone)]
pub struct Checkout {
    inventory: InventoryManager,
    db: Database,
}

impl Checkout {
    pub fn new(db: Database) -> Self {
        Checkout {
            inventory: InventoryManager::new(db.clone()),
            db,
        }
    }

    /// Takes one unit of `product` and appends it to the cart.
    ///
    /// Returns the product with its new stock level so the caller can
    /// refresh its view.
    ///
    /// ## Errors
    /// - `OutOfStock` if no unit is available; the cart is unchanged
    /// - `NotFound` if the product was deleted meanwhile
    pub async fn add_to_cart(&self, cart: &mut Cart, product: &Product) -> PosResult<Product> {
        let out_of_stock = || {
            warn!(id = product.id, name = %product.name, "Add to cart rejected: out of stock");
            PosError::from(CoreError::OutOfStock {
                product_id: product.id,
                name: product.name.clone(),
            })
        };

        if !product.is_in_stock() {
            return Err(out_of_stock());
        }

        let updated = match self.inventory.decrement_stock(product.id, 1).await {
            Ok(updated) => updated,
            // The caller's copy was stale; the store had nothing left.
            Err(PosError::Core(CoreError::InsufficientStock { .. })) => return Err(out_of_stock()),
            Err(e) => return Err(e),
        };

        cart.push(CartEntry::from_product(&updated));
        debug!(
            id = updated.id,
            stock = updated.stock,
            entries = cart.len(),
            "Added to cart"
        );
        Ok(updated)
    }

    /// Sum of the prices captured in the cart.
    pub fn get_total(&self, cart: &Cart) -> PosResult<Money> {
        Ok(cart.total()?)
    }

    /// Settles the session's cart against `payment`.
    ///
    /// On success one sale is recorded, the cart is emptied and the payment
    /// input is cleared.
    ///
    /// ## Errors
    /// - `EmptyCart` if there is nothing to pay for
    /// - `InvalidPayment` for a negative amount
    /// - `InsufficientPayment` if `payment` is below the total
    /// - Storage errors while recording the sale
    ///
    /// On any error the cart keeps its entries and no sale exists.
    pub async fn settle(&self, session: &mut Session, payment: Money) -> PosResult<Settlement> {
        let cart = &mut session.cart;

        let tender = cart.begin_settle(payment).map_err(|e| {
            warn!(error = %e, "Settle rejected");
            PosError::from(e)
        })?;

        let lines = cart.to_sale_lines();
        let sale = match self
            .db
            .sales()
            .insert(&lines, tender.total.cents(), Utc::now())
            .await
        {
            Ok(sale) => sale,
            Err(e) => {
                cart.abort_settle();
                error!(error = %e, "Failed to record sale");
                return Err(e.into());
            }
        };

        cart.complete_settle();
        session.payment_input.clear();

        info!(
            sale_id = sale.id,
            total = %tender.total,
            change = %tender.change,
            lines = sale.lines.len(),
            "Sale recorded"
        );

        Ok(Settlement {
            total: tender.total,
            payment: tender.payment,
            change: tender.change,
            sale,
        })
    }

    /// Parses the session's payment text and settles.
    pub async fn settle_input(&self, session: &mut Session) -> PosResult<Settlement> {
        let payment = parse_payment(&session.payment_input).map_err(|e| {
            warn!(input = %session.payment_input, error = %e, "Payment input rejected");
            PosError::from(e)
        })?;

        self.settle(session, payment).await
    }

    /// Every recorded sale, most recent first.
    pub async fn sales_history(&self) -> PosResult<Vec<Sale>> {
        Ok(self.db.sales().list_recent().await?)
    }

    /// Deletes every sale. Cart and stock are untouched.
    pub async fn reset_sales_history(&self) -> PosResult<u64> {
        let removed = self.db.sales().delete_all().await?;
        info!(removed, "Sales history reset");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
