use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{require, Form, FormErrors, REQUIRED_MESSAGE};
use crate::types::DbId;

/// Create/update submission for a car.
///
/// Existence of the referenced manufacturer and drivers is checked by the
/// caller against the database; this form only checks shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct CarForm {
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub model: String,
    #[serde(default)]
    pub manufacturer_id: Option<DbId>,
    #[serde(default)]
    pub drivers: Vec<DbId>,
}

impl CarForm {
    /// Manufacturer id of a cleaned form.
    pub fn manufacturer(&self) -> DbId {
        self.manufacturer_id.unwrap_or_default()
    }
}

impl Form for CarForm {
    fn clean(self) -> Result<Self, FormErrors> {
        let mut drivers = self.drivers;
        drivers.sort_unstable();
        drivers.dedup();

        let form = CarForm {
            model: self.model.trim().to_string(),
            manufacturer_id: self.manufacturer_id,
            drivers,
        };

        let mut errors = FormErrors::new();
        if let Err(e) = form.validate() {
            errors.extend_from_validation(&e);
        }
        require(&mut errors, "model", &form.model);
        if form.manufacturer_id.is_none() {
            errors.add("manufacturer_id", REQUIRED_MESSAGE);
        }

        errors.into_result(form)
    }
}
