//! Page envelopes returned by the list and index views.
//!
//! A page names the template a front end renders it with and carries the
//! template context, e.g.
//!
//! ```text
//! { "template": "taxi/car_list.html", "car_list": [...], "search_form": { "model": "" } }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

pub const DRIVER_LIST_TEMPLATE: &str = "taxi/driver_list.html";
pub const CAR_LIST_TEMPLATE: &str = "taxi/car_list.html";
pub const MANUFACTURER_LIST_TEMPLATE: &str = "taxi/manufacturer_list.html";
pub const INDEX_TEMPLATE: &str = "taxi/index.html";

/// A filtered list plus the search form that produced it.
///
/// `context_key` is the fixed key the list is stored under
/// (`driver_list`, `car_list`, `manufacturer_list`).
#[derive(Debug)]
pub struct ListPage<T, F> {
    pub template: &'static str,
    pub context_key: &'static str,
    pub items: Vec<T>,
    pub search_form: F,
}

impl<T: Serialize, F: Serialize> Serialize for ListPage<T, F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("template", self.template)?;
        map.serialize_entry(self.context_key, &self.items)?;
        map.serialize_entry("search_form", &self.search_form)?;
        map.end()
    }
}

/// Fleet totals shown on the home page.
#[derive(Debug, serde::Serialize)]
pub struct IndexPage {
    pub template: &'static str,
    pub num_drivers: i64,
    pub num_cars: i64,
    pub num_manufacturers: i64,
}
