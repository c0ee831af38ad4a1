//! Record types produced by the extraction pipelines.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One store location as returned by the store-search endpoint.
///
/// The endpoint decides which attributes exist, so the record is an open
/// mapping of field name to JSON value. Field order is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreRecord(Map<String, Value>);

impl StoreRecord {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field names in the order the source sent them.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders one field as a flat cell value: strings verbatim, other
    /// scalars in their JSON form, `null` and missing fields as empty.
    #[must_use]
    pub fn cell(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// One catalog entry scraped from a category listing page.
///
/// Every field is always present. Absent source elements become `None`,
/// except `review_count`, where an absent counter means zero reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: Option<String>,
    pub url: Option<String>,
    pub english_title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub selling_price: Option<i64>,
    pub original_price: Option<i64>,
    pub discount_rate: Option<i64>,
    pub sales_index: Option<i64>,
    pub review_count: i64,
    pub rating: Option<f64>,
    /// Tag texts joined with `", "`.
    pub tags: Option<String>,
    pub description: Option<String>,
}
