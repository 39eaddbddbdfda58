//! Search forms backing the list views.
//!
//! Each form carries a single optional text field. Any string (including an
//! empty one) is valid; cleaning only trims it. A blank value means the list
//! is not filtered. When the field is submitted more than once the last value
//! wins, and unrelated parameters are ignored.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::{Form, FormErrors};

/// Escape `%`, `_` and `\` so user input matches literally inside an
/// `ILIKE` pattern, then wrap it for substring matching.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Reads one named string out of a map of parameters, keeping the last
/// occurrence.
struct LastValue(&'static str);

impl<'de> Visitor<'de> for LastValue {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of search parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        let mut value = String::new();
        while let Some(key) = map.next_key::<String>()? {
            if key == self.0 {
                value = map.next_value()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(value)
    }
}

fn last_value<'de, D: Deserializer<'de>>(
    deserializer: D,
    field: &'static str,
) -> Result<String, D::Error> {
    deserializer.deserialize_map(LastValue(field))
}

fn non_blank(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `?username=` filter for the driver list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriverSearchForm {
    pub username: String,
}

impl<'de> Deserialize<'de> for DriverSearchForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            username: last_value(deserializer, "username")?,
        })
    }
}

impl DriverSearchForm {
    /// The cleaned search term, if any.
    pub fn term(&self) -> Option<&str> {
        non_blank(&self.username)
    }
}

impl Form for DriverSearchForm {
    fn clean(self) -> Result<Self, FormErrors> {
        Ok(Self {
            username: self.username.trim().to_string(),
        })
    }
}

/// `?model=` filter for the car list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarSearchForm {
    pub model: String,
}

impl<'de> Deserialize<'de> for CarSearchForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            model: last_value(deserializer, "model")?,
        })
    }
}

impl CarSearchForm {
    pub fn term(&self) -> Option<&str> {
        non_blank(&self.model)
    }
}

impl Form for CarSearchForm {
    fn clean(self) -> Result<Self, FormErrors> {
        Ok(Self {
            model: self.model.trim().to_string(),
        })
    }
}

/// `?name=` filter for the manufacturer list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManufacturerSearchForm {
    pub name: String,
}

impl<'de> Deserialize<'de> for ManufacturerSearchForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            name: last_value(deserializer, "name")?,
        })
    }
}

impl ManufacturerSearchForm {
    pub fn term(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

impl Form for ManufacturerSearchForm {
    fn clean(self) -> Result<Self, FormErrors> {
        Ok(Self {
            name: self.name.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_search_form_is_valid_with_username() {
        let form = DriverSearchForm {
            username: "user".to_string(),
        };
        assert!(form.is_valid());
        assert_eq!(form.clean().unwrap().term(), Some("user"));
    }

    #[test]
    fn car_search_form_keeps_model() {
        let form: CarSearchForm =
            serde_json::from_value(serde_json::json!({ "model": "Super" })).unwrap();
        let cleaned = form.clean().unwrap();
        assert_eq!(cleaned.model, "Super");
    }

    #[test]
    fn manufacturer_search_form_keeps_name() {
        let form = ManufacturerSearchForm {
            name: "Manufacturer".to_string(),
        };
        assert!(form.is_valid());
        assert_eq!(form.clean().unwrap().name, "Manufacturer");
    }

    #[test]
    fn empty_or_missing_field_is_valid_and_unfiltered() {
        let form: ManufacturerSearchForm = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(form.is_valid());
        assert_eq!(form.term(), None);

        let form = CarSearchForm {
            model: "   ".to_string(),
        };
        assert_eq!(form.clean().unwrap().term(), None);
    }

    #[test]
    fn repeated_field_keeps_last_value() {
        let form: DriverSearchForm =
            serde_json::from_str(r#"{"username": "a", "username": "b"}"#).unwrap();
        assert_eq!(form.username, "b");
    }

    #[test]
    fn unrelated_parameters_are_ignored() {
        let form: CarSearchForm =
            serde_json::from_str(r#"{"page": 2, "model": "Navigator", "sort": ["a", "b"]}"#)
                .unwrap();
        assert_eq!(form.model, "Navigator");
    }

    #[test]
    fn pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("abc"), "%abc%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
