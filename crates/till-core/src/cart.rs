//! # Cart
//!
//! The in-memory cart and the pure part of settling it.
//!
//! ## Checkout State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            push()                 begin_settle(payment)                 │
//! │   Idle ─────────────► Accumulating ───────────────────► Settling        │
//! │    ▲                   │   ▲    │                          │   │        │
//! │    │                   └───┘    │ payment < total          │   │        │
//! │    │                  push()    ◄──────────────────────────┘   │        │
//! │    │                            │ (abort_settle: store failed) │        │
//! │    │                                                           │        │
//! │    └───────────────────────────────────────────────────────────┘        │
//! │                        complete_settle(): cart cleared                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never touches stock. Callers decrement stock first and only
//! push an entry once the decrement succeeded, so a product's entries can
//! never outnumber the units taken off its stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId, SaleLine};
use crate::validation::validate_payment;

// =============================================================================
// Cart Entry
// =============================================================================

/// One unit of a product in the cart.
///
/// ## Design Notes
/// - `product_id`: which stock was decremented for this entry
/// - `name` / `unit_price_cents`: frozen copy taken when the entry was
///   added, so a later product edit does not change the cart total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    pub product_id: ProductId,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Price in cents at time of adding (frozen)
    pub unit_price_cents: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    /// Creates a snapshot entry from a product.
    pub fn from_product(product: &Product) -> Self {
        CartEntry {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Converts the entry into the line recorded on a sale.
    pub fn to_sale_line(&self) -> SaleLine {
        SaleLine {
            name: self.name.clone(),
            price_cents: self.unit_price_cents,
        }
    }
}

// =============================================================================
// Checkout State
// =============================================================================

/// Where the current checkout session stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutState {
    /// Nothing in the cart.
    #[default]
    Idle,
    /// Items are being added.
    Accumulating,
    /// Payment accepted, sale being recorded.
    Settling,
}

// =============================================================================
// Tender
// =============================================================================

/// Amounts agreed when a settle is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Tender {
    pub total: Money,
    pub payment: Money,
    pub change: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Entries keep insertion order (checkout display order)
/// - Same product added twice is two entries, one per unit
/// - State is `Idle` exactly when the cart is empty and not settling
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    entries: Vec<CartEntry>,

    state: CheckoutState,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
            state: CheckoutState::Idle,
        }
    }

    /// Appends an entry.
    ///
    /// Only call this after the matching stock decrement succeeded.
    pub fn push(&mut self, entry: CartEntry) {
        self.entries.push(entry);
        self.state = CheckoutState::Accumulating;
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Number of entries (units) in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many entries refer to a given product.
    pub fn count_for(&self, product_id: ProductId) -> usize {
        self.entries
            .iter()
            .filter(|e| e.product_id == product_id)
            .count()
    }

    /// Sum of the frozen entry prices.
    ///
    /// ## Errors
    /// `TotalOverflow` if the sum does not fit.
    pub fn total(&self) -> CoreResult<Money> {
        self.entries
            .iter()
            .try_fold(Money::zero(), |acc, entry| acc.checked_add(entry.price()))
            .ok_or(CoreError::TotalOverflow)
    }

    /// Lines to record on the sale, in cart order.
    pub fn to_sale_lines(&self) -> Vec<SaleLine> {
        self.entries.iter().map(CartEntry::to_sale_line).collect()
    }

    /// Checks a tendered payment against the total and enters `Settling`.
    ///
    /// ## Errors
    /// - `EmptyCart` if there is nothing to settle
    /// - `InvalidPayment` if the payment is negative
    /// - `TotalOverflow` if the entries cannot be summed
    /// - `InsufficientPayment` if the payment is below the total; the cart
    ///   stays as it is, back in `Accumulating`
    pub fn begin_settle(&mut self, payment: Money) -> CoreResult<Tender> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        validate_payment(payment)?;

        let total = self.total()?;
        if payment < total {
            self.state = CheckoutState::Accumulating;
            return Err(CoreError::InsufficientPayment {
                total,
                tendered: payment,
            });
        }

        self.state = CheckoutState::Settling;
        Ok(Tender {
            total,
            payment,
            change: payment - total,
        })
    }

    /// Finishes a settle: the cart is emptied and returns to `Idle`.
    ///
    /// Returns the entries that were settled.
    pub fn complete_settle(&mut self) -> Vec<CartEntry> {
        let settled = std::mem::take(&mut self.entries);
        self.state = CheckoutState::Idle;
        settled
    }

    /// Backs out of `Settling` without touching the entries.
    pub fn abort_settle(&mut self) {
        self.state = if self.is_empty() {
            CheckoutState::Idle
        } else {
            CheckoutState::Accumulating
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
