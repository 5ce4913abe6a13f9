//! # till-pos: Service Layer for Till
//!
//! Inventory and checkout operations over the local database, ready for a
//! presentation layer to call.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Load Configuration ───────────────────────────────────────────────► │
//! │     • PosConfig::load(Some("till.toml")) → defaults, file, TILL_* env   │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • telemetry::init_tracing(config.log_filter)                        │
//! │                                                                         │
//! │  3. Open Database ────────────────────────────────────────────────────► │
//! │     • Till::open(&config) → pool + migrations                           │
//! │                                                                         │
//! │  4. Serve the screen ─────────────────────────────────────────────────► │
//! │     • till.inventory() / till.checkout() with a Session                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! let config = PosConfig::load(None)?;
//! telemetry::init_tracing(config.log_filter.as_deref());
//!
//! let till = Till::open(&config).await?;
//! let mut session = Session::new();
//!
//! let soda = till.inventory().add_product_input(&mut session).await?;
//! till.checkout().add_to_cart(&mut session.cart, &soda).await?;
//! session.payment_input = "5".into();
//! let settlement = till.checkout().settle_input(&mut session).await?;
//! println!("{}", render_sale_summary(&settlement.sale, till.config()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod inventory;
pub mod session;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{Checkout, Settlement};
pub use config::PosConfig;
pub use error::{ErrorCode, ErrorResponse, PosError, PosResult};
pub use inventory::{InventoryManager, ProductForm};
pub use session::{render_sale_summary, EditSession, Session};

use std::path::PathBuf;
use till_db::Database;
use tracing::info;

/// An open till: one database, shared by the inventory and checkout handles.
#[derive(Debug, Clone)]
pub struct Till {
    config: PosConfig,
    db: Database,
    inventory: InventoryManager,
    checkout: Checkout,
}

impl Till {
    /// Connects the database named by `config`, running migrations.
    ///
    /// The database file and its directory are created on first use.
    pub async fn open(config: &PosConfig) -> PosResult<Self> {
        config.validate().map_err(|message| PosError::Config {
            path: PathBuf::new(),
            message,
        })?;

        let db = Database::new(config.db_config()).await?;

        info!(store = %config.store_name, "Till ready");
        Ok(Till {
            config: config.clone(),
            inventory: InventoryManager::new(db.clone()),
            checkout: Checkout::new(db.clone()),
            db,
        })
    }

    pub fn inventory(&self) -> &InventoryManager {
        &self.inventory
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn config(&self) -> &PosConfig {
        &self.config
    }

    /// Whether the database still answers queries.
    pub async fn health_check(&self) -> bool {
        self.db.health_check().await
    }

    /// Closes the database. Every handle fails afterwards.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
