//! The two harvest sources and the trait the pipeline drives them through.

mod books;
mod stores;

use std::fmt;

pub use books::{
    BookSource, CATALOG_ENDPOINT, DEFAULT_CATEGORY_ID, DEFAULT_PAGE_SIZE, ITEM_CONTAINER,
    SITE_ORIGIN,
};
pub use stores::{StoreSource, STORE_ENDPOINT};

use crate::error::ScraperError;
use crate::pagination::PaginationPolicy;
use crate::transport::RequestSpec;

/// One external source: its key space, how to ask for one key, how to read
/// the answer, and when to stop asking.
pub trait Source {
    type Key: Copy + fmt::Display;
    type Keys: Iterator<Item = Self::Key>;
    type Record;

    /// Short label used in logs and output file names.
    fn name(&self) -> &'static str;

    fn keys(&self) -> Self::Keys;

    fn pagination(&self) -> PaginationPolicy;

    /// Describes the request for `key`. Only the key-dependent field varies
    /// between calls.
    fn request(&self, key: Self::Key) -> RequestSpec;

    /// Converts one response body into records.
    ///
    /// # Errors
    ///
    /// Returns a [`ScraperError`] when the body cannot be understood at all.
    /// Missing fields inside an otherwise readable body are not errors.
    fn extract(&self, key: Self::Key, body: &str) -> Result<Vec<Self::Record>, ScraperError>;
}
