//! # Repository Module
//!
//! Database repository implementations for Till.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryManager / Checkout (till-pos)                                │
//! │       │                                                                 │
//! │       │  db.products().decrement_stock(id, 1)                          │
//! │       ▼                                                                 │
//! │  ProductRepository                  SaleRepository                     │
//! │  ├── insert / update / delete       ├── insert (one transaction)       │
//! │  ├── list_all / get_by_id           ├── list_recent / get_by_id        │
//! │  ├── decrement_stock (guarded)      └── delete_all                     │
//! │  └── delete_all / count                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each method is a single statement or a single transaction, so every
//! write is atomic on its own.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and stock updates
//! - [`SaleRepository`](sale::SaleRepository) - Sale history

pub mod product;
pub mod sale;
