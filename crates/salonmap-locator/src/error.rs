use thiserror::Error;

/// Errors from a single fetch against the Overpass API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS, timeout, or non-2xx status from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Overpass answered 200 but reported a runtime error in `remark`.
    #[error("Overpass runtime error: {0}")]
    Upstream(String),

    #[error("invalid Overpass URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
