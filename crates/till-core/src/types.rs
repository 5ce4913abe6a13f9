//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    SaleLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  name (frozen)  │       │
//! │  │  name           │   │  lines ─────────┼──►│  price (frozen) │       │
//! │  │  price_cents    │   │  total_cents    │   └─────────────────┘       │
//! │  │  stock          │   │  created_at     │                              │
//! │  │  image (URI)    │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are integers assigned by the store (`AUTOINCREMENT`). A `NewProduct`
//! has no id yet; the store hands back a `Product` once it is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_price_cents, validate_product_name, validate_stock, ValidationResult};

/// Store-assigned product identifier.
pub type ProductId = i64;

/// Store-assigned sale identifier.
pub type SaleId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier assigned by the store.
    pub id: ProductId,

    /// Display name shown to the cashier.
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Opaque image URI handed over by the image source, echoed verbatim.
    pub image: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if at least one unit can be sold.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// New Product
// =============================================================================

/// The full set of product fields, without an id.
///
/// Used both for creating a product and for the full-replace edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
    pub image: Option<String>,
}

impl NewProduct {
    /// Builds a validated product definition.
    ///
    /// The name is trimmed. The image reference is kept exactly as given.
    pub fn new(
        name: impl Into<String>,
        price: Money,
        stock: i64,
        image: Option<String>,
    ) -> ValidationResult<Self> {
        let product = NewProduct {
            name: name.into().trim().to_string(),
            price_cents: price.cents(),
            stock,
            image,
        };
        product.validate()?;
        Ok(product)
    }

    /// Checks every field rule.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_price_cents(self.price_cents)?;
        validate_stock(self.stock)?;
        Ok(())
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// One unit sold, frozen at checkout.
///
/// Uses the snapshot pattern: a later rename or price change of the
/// product never touches a recorded line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleLine {
    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit price in cents at time of sale (frozen).
    pub price_cents: i64,
}

impl SaleLine {
    /// Returns the line price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: SaleId,

    /// Lines in cart order.
    pub lines: Vec<SaleLine>,

    /// Sum of the line prices when the sale was recorded.
    pub total_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Renders the lines as `Soda($1.50), Chips($0.99)`.
    pub fn summary(&self) -> String {
        self.summary_with(|m| m.to_string())
    }

    /// Renders the lines with a caller-supplied money formatter.
    pub fn summary_with<F>(&self, format_money: F) -> String
    where
        F: Fn(Money) -> String,
    {
        self.lines
            .iter()
            .map(|line| format!("{}({})", line.name, format_money(line.price())))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
