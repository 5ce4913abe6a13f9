//! # Inventory Search
//!
//! Filters an already-loaded product list.
//!
//! A product matches when its name contains the query (ignoring case) or
//! when its plain price text contains it, so `"1.5"` finds a product at
//! $1.50 and `"sod"` finds "Soda". The result keeps listing order.

use crate::money::Money;
use crate::types::Product;

/// Checks a single product against an already-trimmed query.
pub fn matches(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(&query.to_lowercase())
        || Money::from_cents(product.price_cents)
            .to_plain_string()
            .contains(query)
}

/// Returns the products matching `query`, in their original order.
///
/// Surrounding whitespace is ignored; an empty query returns everything.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim();
    products.iter().filter(|p| matches(p, query)).collect()
}
