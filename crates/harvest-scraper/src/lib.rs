pub mod error;
pub mod extract;
pub mod keys;
pub mod pagination;
pub mod pipeline;
pub mod sources;
pub mod transport;
pub mod types;

pub use error::ScraperError;
pub use keys::{PageNumbers, RegionCode, RegionCodes};
pub use pagination::{PaginationController, PaginationPolicy, RoundOutcome, Step, StopReason};
pub use pipeline::{run, Aggregator, Harvest, RoundReport};
pub use sources::{BookSource, Source, StoreSource};
pub use transport::{HttpTransport, RequestMethod, RequestSpec};
pub use types::{BookRecord, StoreRecord};
