//! # Validation Module
//!
//! Field rules for products.
//!
//! ## Product Rules (checked in this order, first failure wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  id          P followed by exactly 3 digits      P101 ✓   p101 ✗  P1 ✗  │
//! │  name        non-empty after trimming                                   │
//! │  price       > 0                                                        │
//! │  quantity    >= 0                                                       │
//! │  category    non-empty after trimming                                   │
//! │  description non-empty after trimming                                   │
//! │  image_path  free-form, may be empty                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::validate_product_id;
//!
//! assert!(validate_product_id("P101").is_ok());
//! assert!(validate_product_id("101").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id: `P` followed by exactly three ASCII digits.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    let mut chars = id.chars();
    let well_formed = chars.next() == Some('P')
        && id.len() == 4
        && chars.all(|c| c.is_ascii_digit());

    if !well_formed {
        return Err(ValidationError::invalid_format(
            "id",
            "expected P followed by 3 digits (e.g. P101)",
        ));
    }

    Ok(())
}

/// Validates that a text field is non-empty after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price: strictly positive.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a shelf quantity: zero or more.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validator
// =============================================================================

/// Validates a whole product record, returning the first violated rule.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_required("name", &product.name)?;
    validate_price(product.price)?;
    validate_stock_quantity(product.quantity)?;
    validate_required("category", &product.category)?;
    validate_required("description", &product.description)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "P101".to_string(),
            name: "Desk Lamp".to_string(),
            price: Money::from_cents(2599),
            quantity: 0,
            category: "Lighting".to_string(),
            image_path: String::new(),
            description: "LED, warm white".to_string(),
        }
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("P101").is_ok());
        assert!(validate_product_id("P000").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("p101").is_err());
        assert!(validate_product_id("P10").is_err());
        assert!(validate_product_id("P1010").is_err());
        assert!(validate_product_id("PA01").is_err());
        assert!(validate_product_id("P١٠١").is_err());
    }

    #[test]
    fn test_validate_product_accepts_valid_record() {
        assert!(validate_product(&product()).is_ok());
    }

    #[test]
    fn test_validate_product_reports_first_violation() {
        let mut p = product();
        p.name = "   ".to_string();
        p.price = Money::zero();
        assert_eq!(validate_product(&p), Err(ValidationError::required("name")));

        let mut p = product();
        p.price = Money::from_cents(-1);
        p.quantity = -3;
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::MustBePositive {
                field: "price".to_string()
            })
        );

        let mut p = product();
        p.quantity = -1;
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::MustNotBeNegative { .. })
        ));

        let mut p = product();
        p.description = String::new();
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::required("description"))
        );
    }

    #[test]
    fn test_image_path_may_be_empty() {
        let mut p = product();
        p.image_path = String::new();
        assert!(validate_product(&p).is_ok());
    }
}
