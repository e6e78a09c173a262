//! HTTP client for the Overpass API interpreter endpoint.
//!
//! Sends one form-encoded POST (`data=<query>`) per fetch and decodes the
//! `elements` array. There is no retry: a failed call surfaces as
//! [`FetchError`] and the caller decides what to show.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::query::build_overpass_query;
use crate::types::{OverpassResponse, RawElement};

/// Anything that can produce the raw element set for one fetch cycle.
///
/// [`OverpassClient`] is the production implementation; the cache and
/// pipeline are generic over this so they can be driven by fixtures.
pub trait ElementSource: Send + Sync {
    fn fetch_elements(&self) -> impl Future<Output = Result<Vec<RawElement>, FetchError>> + Send;
}

/// Client for a single Overpass interpreter URL and a fixed query.
pub struct OverpassClient {
    client: Client,
    url: Url,
    query: String,
}

impl OverpassClient {
    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if the
    /// configured URL does not parse.
    pub fn from_config(config: &salonmap_core::AppConfig) -> Result<Self, FetchError> {
        let query = build_overpass_query(&config.overpass_area, config.request_timeout_secs);
        Self::new(
            &config.overpass_url,
            config.request_timeout_secs,
            &config.user_agent,
            query,
        )
    }

    /// Creates a client for an explicit URL and query (tests point this at wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if `url`
    /// does not parse.
    pub fn new(
        url: &str,
        timeout_secs: u64,
        user_agent: &str,
        query: String,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let url = Url::parse(url).map_err(|e| FetchError::InvalidBaseUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, url, query })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Posts the query and returns the decoded elements in source order.
    ///
    /// Elements that are not JSON objects are skipped and counted in a
    /// warning; odd fields inside an object decode to `None`. A body that is
    /// not JSON at all is an error.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`FetchError::Deserialize`] if the body is not an Overpass JSON document.
    /// - [`FetchError::Upstream`] if Overpass reports a runtime error.
    async fn post_query(&self) -> Result<Vec<RawElement>, FetchError> {
        let response = self
            .client
            .post(self.url.clone())
            .form(&[("data", self.query.as_str())])
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: self.url.to_string(),
                source: e,
            })?;

        Self::check_remark(&envelope)?;

        let total = envelope.elements.len();
        let elements: Vec<RawElement> = envelope
            .elements
            .into_iter()
            .filter(serde_json::Value::is_object)
            .filter_map(|v| serde_json::from_value::<RawElement>(v).ok())
            .collect();

        if elements.len() < total {
            tracing::warn!(
                skipped = total - elements.len(),
                total,
                "skipping Overpass elements that are not JSON objects"
            );
        }

        Ok(elements)
    }

    /// A `remark` starting with "runtime error" means the result set was cut
    /// short by the server; treat it as a failed fetch rather than a short list.
    fn check_remark(envelope: &OverpassResponse) -> Result<(), FetchError> {
        match envelope.remark.as_deref() {
            Some(remark) if remark.trim_start().starts_with("runtime error") => {
                Err(FetchError::Upstream(remark.trim().to_string()))
            }
            Some(remark) => {
                tracing::debug!(remark, "Overpass remark");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl ElementSource for OverpassClient {
    async fn fetch_elements(&self) -> Result<Vec<RawElement>, FetchError> {
        self.post_query().await
    }
}
