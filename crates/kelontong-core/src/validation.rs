//! # Validation Module
//!
//! Input parsing and validation for Kelontong POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end                                                    │
//! │  ├── Raw text from quantity boxes, cash field, stock prompt            │
//! │  └── Sent as-is to the command layer                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (kasir)                                              │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: parse text, enforce business rules                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart / Catalog                                               │
//! │  └── Stock bounds (0 < qty <= stock), optimistic stock check           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A parse failure never changes state: the caller keeps the previous value.
//!
//! ## Usage
//! ```rust
//! use kelontong_core::validation::{parse_quantity_input, parse_tender_input};
//! use kelontong_core::Money;
//!
//! assert_eq!(parse_quantity_input(" 4 ").unwrap(), 4);
//! assert_eq!(parse_tender_input("20000").unwrap(), Money::from_rupiah(20_000));
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Percentage, SEN_PER_RUPIAH};
use crate::MAX_LOOKBACK_DAYS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_SEARCH_LEN: usize = 100;
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Text Input Parsers
// =============================================================================

/// Parses a manually typed cart quantity.
///
/// Zero and negative values parse fine; the cart treats them as removal.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: quantity box                                                     │
/// │                                                                         │
/// │  Cashier types "12"                                                    │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity_input("12") ← THIS FUNCTION                            │
/// │       │                                                                 │
/// │       ├── "" or "abc"? → InvalidQuantityInput, quantity unchanged      │
/// │       │                                                                 │
/// │       └── 12 → cart.set_quantity(id, 12) (capped to stock)             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity_input(input: &str) -> ValidationResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidQuantityInput {
            input: input.to_string(),
        })
}

/// Parses the cash-received field into money.
///
/// ## Rules
/// - Empty input is zero (nothing tendered yet)
/// - Whole rupiah, optionally with `.` or `,` and at most 2 decimals
/// - Negative or malformed input is rejected
///
/// ## Example
/// ```rust
/// use kelontong_core::validation::parse_tender_input;
/// use kelontong_core::Money;
///
/// assert_eq!(parse_tender_input("").unwrap(), Money::zero());
/// assert_eq!(parse_tender_input("297,5").unwrap(), Money::from_sen(29_750));
/// assert!(parse_tender_input("-5").is_err());
/// ```
pub fn parse_tender_input(input: &str) -> ValidationResult<Money> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Money::zero());
    }

    let malformed = |reason: &str| ValidationError::InvalidFormat {
        field: "tendered".to_string(),
        reason: reason.to_string(),
    };

    if input.starts_with('-') {
        return Err(malformed("must not be negative"));
    }

    let (whole, fraction) = match input.find(['.', ',']) {
        Some(pos) => (&input[..pos], &input[pos + 1..]),
        None => (input, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return Err(malformed("must be a number"));
    }
    if fraction.len() > 2 {
        return Err(malformed("at most 2 decimal places"));
    }

    let rupiah: i64 = whole.parse().map_err(|_| malformed("amount too large"))?;
    let sen: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| malformed("must be a number"))? * 10,
        _ => fraction.parse().map_err(|_| malformed("must be a number"))?,
    };

    rupiah
        .checked_mul(SEN_PER_RUPIAH)
        .and_then(|s| s.checked_add(sen))
        .map(Money::from_sen)
        .ok_or_else(|| malformed("amount too large"))
}

/// Clamps a discount entered as a percentage to `[0, 100]`.
///
/// NaN becomes zero.
pub fn clamp_discount_percent(percent: f64) -> Percentage {
    if percent.is_nan() {
        return Percentage::zero();
    }
    Percentage::from_percent(percent.clamp(0.0, 100.0))
}

// =============================================================================
// String Validators
// =============================================================================

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

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use kelontong_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Indomie Goreng").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a report lookback window (1 to 366 days).
pub fn validate_lookback_days(days: u32) -> ValidationResult<()> {
    if days == 0 || days > MAX_LOOKBACK_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "lookback_days".to_string(),
            min: 1,
            max: MAX_LOOKBACK_DAYS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
