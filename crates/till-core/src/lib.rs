//! # till-core: Pure Business Logic for Till
//!
//! This crate holds the rules of the inventory / cart / sales model as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation layer (external)                    │   │
//! │  │    Product form ──► Inventory list ──► Cart ──► Payment        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              till-pos (InventoryManager, Checkout)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  search   │  │   │
//! │  │   │   Sale    │  │  parsing  │  │  Tender   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleLine)
//! - [`money`] - Money type with integer arithmetic and exact decimal parsing
//! - [`cart`] - In-memory cart, checkout state machine, change calculation
//! - [`search`] - Inventory search filter
//! - [`validation`] - Input validation and text parsing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, CartEntry, Money, Product};
//!
//! let soda = Product {
//!     id: 1,
//!     name: "Soda".to_string(),
//!     price_cents: 150,
//!     stock: 3,
//!     image: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.push(CartEntry::from_product(&soda));
//! cart.push(CartEntry::from_product(&soda));
//!
//! let tender = cart.begin_settle(Money::parse("5").unwrap()).unwrap();
//! assert_eq!(tender.change, Money::from_cents(200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry, CheckoutState, Tender};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, MoneyParseError};
pub use types::*;
