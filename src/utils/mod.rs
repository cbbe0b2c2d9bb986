//! Common utility functions for metabolic-core

pub mod validation;

pub(crate) mod serde_float;

#[cfg(test)]
pub(crate) mod log_capture;

pub use validation::{
    validate_finite, validate_positive, validate_range, validate_unit_interval,
    ValidationError, ValidationResult,
};
