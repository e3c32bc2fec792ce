//! Common validation utilities.

use validator::ValidationError;

use crate::dates::parse_timestamp;

/// Validates that an amount is strictly positive and finite.
pub fn validate_positive_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

/// Validates that a text field has non-whitespace content.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Field is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a bill date is a recognizable calendar date.
pub fn validate_bill_date(value: &str) -> Result<(), ValidationError> {
    match parse_timestamp(value) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("bill_date_invalid");
            err.message = Some("Bill date must be a valid date (YYYY-MM-DD)".into());
            Err(err)
        }
    }
}
