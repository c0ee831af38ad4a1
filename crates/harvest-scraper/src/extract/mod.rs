//! Record extraction from raw response bodies.
//!
//! [`json`] passes the store-search `"list"` array through as open records.
//! [`html`] walks catalog item containers and reads each field through an
//! accessor that yields `Option` instead of failing on missing elements.

pub mod coerce;
pub mod html;
pub mod json;

pub use html::{extract_books, BookSelectors};
pub use json::{extract_store_list, store_records_from_value};
