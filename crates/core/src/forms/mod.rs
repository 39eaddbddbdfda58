//! Form validation for driver, car and manufacturer input.
//!
//! Every form implements [`Form`]: `clean` consumes the raw submission and
//! returns either the normalized form (the "cleaned data") or a
//! [`FormErrors`] map collecting every field-level message.

pub mod car;
pub mod driver;
pub mod manufacturer;
pub mod search;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub use car::CarForm;
pub use driver::{DriverCreationForm, DriverLicenseUpdateForm};
pub use manufacturer::ManufacturerForm;
pub use search::{CarSearchForm, DriverSearchForm, ManufacturerSearchForm};

/// Message used for missing or blank required fields.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Maximum length of free-text fields stored as `VARCHAR(255)`.
pub const MAX_TEXT_LENGTH: u64 = 255;

/// A submission that can be validated into its cleaned form.
pub trait Form: Sized {
    /// Validate and normalize the submission.
    fn clean(self) -> Result<Self, FormErrors>;

    /// Whether the submission would clean without errors.
    fn is_valid(&self) -> bool
    where
        Self: Clone,
    {
        self.clone().clean().is_ok()
    }
}

/// Field name -> validation messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field, empty if none.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Fold in errors reported by a `validator` derive.
    pub fn extend_from_validation(&mut self, errors: &validator::ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                self.add(&field, message);
            }
        }
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Record a required-field error when `value` is blank. Returns `true` if
/// the value is present.
pub(crate) fn require(errors: &mut FormErrors, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
        false
    } else {
        true
    }
}
