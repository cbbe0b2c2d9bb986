//! Validation utilities for metabolic-core
//!
//! Small range and finiteness checks shared by the parameter resolver and
//! the probe configuration.

use std::fmt;

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value out of valid range
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Value must be strictly positive
    NotPositive { field: String, value: f64 },
    /// NaN or infinite value
    NotFinite { field: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::OutOfRange { field, value, min, max } => {
                write!(f, "Field '{}' value '{}' is out of range [{}, {}]", field, value, min, max)
            }
            ValidationError::NotPositive { field, value } => {
                write!(f, "Field '{}' value '{}' must be positive", field, value)
            }
            ValidationError::NotFinite { field } => {
                write!(f, "Field '{}' must be a finite number", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject NaN and infinities
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field: field.to_string() })
    }
}

/// Require `value > 0`
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<f64> {
    let value = validate_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field: field.to_string(), value })
    }
}

/// Require `min <= value <= max`
pub fn validate_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<f64> {
    let value = validate_finite(field, value)?;
    if value < min || value > max {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    } else {
        Ok(value)
    }
}

/// Require a fraction in `[0, 1]`
pub fn validate_unit_interval(field: &str, value: f64) -> ValidationResult<f64> {
    validate_range(field, value, 0.0, 1.0)
}
