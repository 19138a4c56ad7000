//! Field validators.
//!
//! Validators enforce a single constraint on a field value. Serializer length
//! constraints are checked through these, mirroring Django's
//! `MinLengthValidator` and `MaxLengthValidator`.

use crate::value::Value;
use django_rs_core::ValidationError;
use std::fmt;

/// A trait for validating field values.
///
/// Each validator checks a single constraint and returns a
/// [`ValidationError`] carrying a message, a code, and the parameters that
/// explain the failure.
///
/// # Examples
///
/// ```
/// use django_rs_db::validators::{Validator, MaxLengthValidator};
/// use django_rs_db::value::Value;
///
/// let v = MaxLengthValidator::new(5);
/// assert!(v.validate(&Value::String("hi".into())).is_ok());
/// assert!(v.validate(&Value::String("toolong".into())).is_err());
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;
}

/// Returns the length of a sized value: characters for text, bytes for
/// binary data, elements for lists. Other values have no length.
fn value_len(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Bytes(b) => Some(b.len()),
        Value::List(items) => Some(items.len()),
        _ => None,
    }
}

/// Validates that a value does not exceed a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    /// The maximum allowed length.
    pub max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` with the given maximum length.
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value_len(value) {
            Some(len) if len > self.max_length => Err(ValidationError::new(
                format!(
                    "Ensure this value has at most {} characters (it has {len}).",
                    self.max_length
                ),
                "max_length",
            )
            .with_param("limit_value", self.max_length.to_string())
            .with_param("show_value", len.to_string())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "MaxLengthValidator"
    }
}

/// Validates that a value meets a minimum length requirement.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    /// The minimum required length.
    pub min_length: usize,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator` with the given minimum length.
    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value_len(value) {
            Some(len) if len < self.min_length => Err(ValidationError::new(
                format!(
                    "Ensure this value has at least {} characters (it has {len}).",
                    self.min_length
                ),
                "min_length",
            )
            .with_param("limit_value", self.min_length.to_string())
            .with_param("show_value", len.to_string())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "MinLengthValidator"
    }
}
