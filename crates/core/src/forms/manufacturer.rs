use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{require, Form, FormErrors};

/// Create/update submission for a manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct ManufacturerForm {
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub country: String,
}

impl Form for ManufacturerForm {
    fn clean(self) -> Result<Self, FormErrors> {
        let form = ManufacturerForm {
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
        };

        let mut errors = FormErrors::new();
        if let Err(e) = form.validate() {
            errors.extend_from_validation(&e);
        }
        require(&mut errors, "name", &form.name);
        require(&mut errors, "country", &form.country);

        errors.into_result(form)
    }
}
