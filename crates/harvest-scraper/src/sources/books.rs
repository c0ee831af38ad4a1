//! Category catalog: one GET per page number, HTML listing back.

use std::time::Duration;

use crate::error::ScraperError;
use crate::extract::{extract_books, BookSelectors};
use crate::keys::PageNumbers;
use crate::pagination::PaginationPolicy;
use crate::transport::{RequestMethod, RequestSpec};
use crate::types::BookRecord;

use super::Source;

pub const CATALOG_ENDPOINT: &str =
    "https://www.yes24.com/product/category/CategoryProductContents";
pub const SITE_ORIGIN: &str = "https://www.yes24.com";
pub const DEFAULT_CATEGORY_ID: &str = "001001003032";
pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const ITEM_CONTAINER: &str = ".itemUnit";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36";

/// Listing pages of one catalog category, sorted by sales index.
#[derive(Debug, Clone)]
pub struct BookSource {
    endpoint: String,
    site_origin: String,
    category_id: String,
    page_size: u32,
    max_pages: Option<u32>,
    delay: Duration,
    selectors: BookSelectors,
}

impl BookSource {
    /// Creates a source for `category_id` with the default page size, no page
    /// cap, and no delay between pages.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if the item selectors fail
    /// to compile.
    pub fn new(category_id: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            endpoint: CATALOG_ENDPOINT.to_owned(),
            site_origin: SITE_ORIGIN.to_owned(),
            category_id: category_id.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            delay: Duration::ZERO,
            selectors: BookSelectors::new(ITEM_CONTAINER)?,
        })
    }

    /// Points the source at a different listing endpoint (for testing with
    /// wiremock). Record URLs still use the catalog's own origin.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ScraperError> {
        reqwest::Url::parse(endpoint).map_err(|e| ScraperError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        self.endpoint = endpoint.to_owned();
        Ok(self)
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Caps the crawl at `max_pages` pages. `None` or `Some(0)` crawls until
    /// an empty page.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages.filter(|&cap| cap > 0);
        self
    }

    /// Politeness delay inserted between successive page requests.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn category_id(&self) -> &str {
        &self.category_id
    }
}

impl Source for BookSource {
    type Key = u32;
    type Keys = PageNumbers;
    type Record = BookRecord;

    fn name(&self) -> &'static str {
        "books"
    }

    fn keys(&self) -> PageNumbers {
        PageNumbers::new()
    }

    fn pagination(&self) -> PaginationPolicy {
        PaginationPolicy::UntilEmpty {
            max_pages: self.max_pages,
            delay: self.delay,
        }
    }

    fn request(&self, page: u32) -> RequestSpec {
        let params = vec![
            ("dispNo", self.category_id.clone()),
            ("order", "SINDEX_ONLY".to_owned()),
            ("addOptionTp", "0".to_owned()),
            ("page", page.to_string()),
            ("size", self.page_size.to_string()),
            ("statGbYn", "N".to_owned()),
            ("viewMode", String::new()),
            ("_options", String::new()),
            ("directDelvYn", String::new()),
            ("usedTp", "0".to_owned()),
            ("elemNo", "0".to_owned()),
            ("elemSeq", "0".to_owned()),
            ("seriesNumber", "0".to_owned()),
        ];

        let headers = vec![
            (
                "referer",
                format!(
                    "{SITE_ORIGIN}/product/category/display/{}",
                    self.category_id
                ),
            ),
            ("user-agent", USER_AGENT.to_owned()),
            ("sec-fetch-dest", "empty".to_owned()),
            ("sec-fetch-mode", "cors".to_owned()),
            ("sec-fetch-site", "same-origin".to_owned()),
            ("x-requested-with", "XMLHttpRequest".to_owned()),
        ];

        RequestSpec {
            method: RequestMethod::Get,
            url: self.endpoint.clone(),
            headers,
            params,
        }
    }

    fn extract(&self, page: u32, body: &str) -> Result<Vec<BookRecord>, ScraperError> {
        let books = extract_books(body, &self.selectors, &self.site_origin);
        if books.is_empty() {
            tracing::info!(page, "no item containers found on page");
        }
        Ok(books)
    }
}
