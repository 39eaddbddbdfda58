//! Driver creation and license update forms.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{require, Form, FormErrors};
use crate::license::validate_license_number;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum username / name length.
pub const MAX_NAME_LENGTH: u64 = 150;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";

const INVALID_USERNAME_MESSAGE: &str = "Enter a valid username. This value may contain only \
     letters, numbers, and @/./+/-/_ characters.";

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// Submission for creating a new driver account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct DriverCreationForm {
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
}

impl Form for DriverCreationForm {
    fn clean(self) -> Result<Self, FormErrors> {
        let form = DriverCreationForm {
            username: self.username.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            license_number: self.license_number.trim().to_string(),
            email: self
                .email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            // Passwords are taken verbatim.
            password1: self.password1,
            password2: self.password2,
        };

        let mut errors = FormErrors::new();
        if let Err(e) = form.validate() {
            errors.extend_from_validation(&e);
        }

        if require(&mut errors, "username", &form.username) && !USERNAME_RE.is_match(&form.username)
        {
            errors.add("username", INVALID_USERNAME_MESSAGE);
        }

        if require(&mut errors, "license_number", &form.license_number) {
            if let Err(e) = validate_license_number(&form.license_number) {
                errors.add("license_number", e.to_string());
            }
        }

        let has_password1 = require(&mut errors, "password1", &form.password1);
        let has_password2 = require(&mut errors, "password2", &form.password2);
        if has_password1 && has_password2 {
            if form.password1 != form.password2 {
                errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
            } else {
                for message in password_strength_errors(&form.password2) {
                    errors.add("password2", message);
                }
            }
        }

        errors.into_result(form)
    }
}

/// Submission for changing a driver's license number. No other field of the
/// driver can be changed through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DriverLicenseUpdateForm {
    #[serde(default)]
    pub license_number: String,
}

impl Form for DriverLicenseUpdateForm {
    fn clean(self) -> Result<Self, FormErrors> {
        let form = DriverLicenseUpdateForm {
            license_number: self.license_number.trim().to_string(),
        };

        let mut errors = FormErrors::new();
        if require(&mut errors, "license_number", &form.license_number) {
            if let Err(e) = validate_license_number(&form.license_number) {
                errors.add("license_number", e.to_string());
            }
        }
        errors.into_result(form)
    }
}

/// Minimum-length and all-digits checks applied to new passwords.
pub fn password_strength_errors(password: &str) -> Vec<String> {
    let mut messages = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        messages.push(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        messages.push("This password is entirely numeric.".to_string());
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::REQUIRED_MESSAGE;

    fn valid_form() -> DriverCreationForm {
        DriverCreationForm {
            username: "new_user".to_string(),
            password1: "user12test".to_string(),
            password2: "user12test".to_string(),
            first_name: "Test first".to_string(),
            last_name: "Test last".to_string(),
            license_number: "JIM31313".to_string(),
            email: None,
        }
    }

    #[test]
    fn creation_form_with_license_and_names_is_valid() {
        let form = valid_form();
        assert!(form.is_valid());
        let cleaned = form.clone().clean().expect("form should be valid");
        assert_eq!(cleaned, form);
    }

    #[test]
    fn creation_form_deserializes_from_json() {
        let form: DriverCreationForm = serde_json::from_value(serde_json::json!({
            "username": "new_user",
            "password1": "user12test",
            "password2": "user12test",
            "first_name": "Test first",
            "last_name": "Test last",
            "license_number": "JIM31313"
        }))
        .unwrap();
        assert_eq!(form, valid_form());
    }

    #[test]
    fn malformed_license_is_rejected() {
        let form = DriverCreationForm {
            license_number: "jim31313".to_string(),
            ..valid_form()
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(
            errors.get("license_number"),
            ["First 3 characters should be uppercase letters"]
        );
    }

    #[test]
    fn password_mismatch_is_reported_on_confirmation() {
        let form = DriverCreationForm {
            password2: "other12test".to_string(),
            ..valid_form()
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(errors.get("password2"), [PASSWORD_MISMATCH_MESSAGE]);
        assert!(!errors.has("password1"));
    }

    #[test]
    fn weak_password_is_rejected() {
        let form = DriverCreationForm {
            password1: "1234".to_string(),
            password2: "1234".to_string(),
            ..valid_form()
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(errors.get("password2").len(), 2);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = DriverCreationForm::default().clean().unwrap_err();
        for field in ["username", "password1", "password2", "license_number"] {
            assert_eq!(errors.get(field), [REQUIRED_MESSAGE], "field {field}");
        }
        assert!(!errors.has("first_name"));
    }

    #[test]
    fn username_with_spaces_is_rejected() {
        let form = DriverCreationForm {
            username: "new user".to_string(),
            ..valid_form()
        };
        assert!(form.clean().unwrap_err().has("username"));
    }

    #[test]
    fn blank_email_is_dropped_and_bad_email_rejected() {
        let form = DriverCreationForm {
            email: Some("  ".to_string()),
            ..valid_form()
        };
        assert_eq!(form.clean().unwrap().email, None);

        let form = DriverCreationForm {
            email: Some("not-an-email".to_string()),
            ..valid_form()
        };
        assert!(form.clean().unwrap_err().has("email"));
    }

    #[test]
    fn license_update_form_trims_and_validates() {
        let form = DriverLicenseUpdateForm {
            license_number: " JIM31314 ".to_string(),
        };
        assert_eq!(form.clean().unwrap().license_number, "JIM31314");

        let form = DriverLicenseUpdateForm {
            license_number: "JIM3131".to_string(),
        };
        assert_eq!(
            form.clean().unwrap_err().get("license_number"),
            ["License number should consist of 8 characters"]
        );
    }
}
