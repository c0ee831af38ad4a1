use std::path::PathBuf;

/// Runtime settings shared by every harvest command.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fallback tracing filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// When set, each run also logs to a file inside this directory.
    pub log_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub books_category_id: String,
    pub books_page_size: u32,
    /// Page cap for the catalog crawl. `0` disables the cap.
    pub books_max_pages: u32,
    /// Politeness delay between successive catalog page requests.
    pub books_delay_ms: u64,
}

impl AppConfig {
    /// The page cap as an `Option`, with `0` meaning unlimited.
    #[must_use]
    pub fn books_page_limit(&self) -> Option<u32> {
        (self.books_max_pages > 0).then_some(self.books_max_pages)
    }
}
