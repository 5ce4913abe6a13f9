//! # Validation Module
//!
//! Input validation utilities for Till.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── Raw text fields (name, price, stock, payment)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text → typed values (Money, i64)                                  │
//! │  └── Business rules (non-empty name, non-negative price/stock)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (stock >= 0), CHECK (price_cents >= 0)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{parse_price, parse_stock};
//!
//! assert_eq!(parse_price("1.50").unwrap().cents(), 150);
//! assert_eq!(parse_stock("3").unwrap(), 3);
//! assert!(parse_stock("-1").is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, MoneyParseError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_NAME_LEN: usize = 200;

/// Longest search query accepted.
pub const MAX_QUERY_LEN: usize = 100;

/// Highest unit price accepted: $1,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - At most `MAX_PRICE_CENTS`
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS),
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock decrement amount.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_quantity(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses price text into a non-negative Money value.
///
/// ## Example
/// ```rust
/// use till_core::validation::parse_price;
///
/// assert_eq!(parse_price("1.5").unwrap().cents(), 150);
/// assert!(parse_price("").is_err());
/// assert!(parse_price("free").is_err());
/// assert!(parse_price("-1").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let price = Money::parse(text).map_err(|e| match e {
        MoneyParseError::Empty => ValidationError::required("price"),
        other => ValidationError::invalid_format("price", other.to_string()),
    })?;

    validate_price_cents(price.cents())?;
    Ok(price)
}

/// Parses stock text into a non-negative whole number.
pub fn parse_stock(text: &str) -> ValidationResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::required("stock"));
    }

    let stock: i64 = text
        .parse()
        .map_err(|_| ValidationError::invalid_format("stock", "must be a whole number"))?;

    validate_stock(stock)?;
    Ok(stock)
}

/// Parses the tendered payment text.
///
/// Anything that is not a finite, non-negative amount is an
/// `InvalidPayment`, not a validation error: the cart is being settled.
pub fn parse_payment(text: &str) -> CoreResult<Money> {
    let payment = Money::parse(text).map_err(|e| CoreError::InvalidPayment {
        reason: e.to_string(),
    })?;

    validate_payment(payment)?;
    Ok(payment)
}

/// Checks that a tendered payment is non-negative.
pub fn validate_payment(payment: Money) -> CoreResult<()> {
    if payment.is_negative() {
        return Err(CoreError::InvalidPayment {
            reason: "amount is negative".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
