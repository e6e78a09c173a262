//! Fetches hair/beauty businesses from the Overpass API, normalizes them,
//! memoizes the result for a TTL window, and filters it per query.

pub mod cache;
pub mod client;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod types;

pub use cache::{CachedFetch, FetchOrigin, Fetched};
pub use client::{ElementSource, OverpassClient};
pub use error::FetchError;
pub use export::{to_csv_string, write_csv};
pub use normalize::{normalize, normalize_all};
pub use pipeline::{apply_filters, QueryOutcome, QueryPipeline};
pub use query::build_overpass_query;
pub use types::{Center, OverpassResponse, RawElement};
