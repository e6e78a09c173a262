//! Time-to-live memoization of the fetch-and-normalize cycle.
//!
//! The cache owns the last successful [`QueryResult`] behind an `Arc`.
//! Readers clone the `Arc`; a refresh swaps it in one write, so nobody sees
//! a half-built result. Refreshes are single-flight: while one is running,
//! other callers get the previous value when there is one, and wait for the
//! running refresh when there is not.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use salonmap_core::QueryResult;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

use crate::client::ElementSource;
use crate::error::FetchError;
use crate::normalize::normalize_all;

/// Default freshness window: one day.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Where a result handed back by [`CachedFetch`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchOrigin {
    Cache,
    Overpass,
}

#[derive(Debug, Clone)]
pub struct Fetched {
    pub result: Arc<QueryResult>,
    pub origin: FetchOrigin,
}

pub struct CachedFetch<S> {
    source: S,
    ttl: TimeDelta,
    current: RwLock<Option<Arc<QueryResult>>>,
    refresh_lock: Mutex<()>,
}

impl<S: ElementSource> CachedFetch<S> {
    #[must_use]
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The stored result, fresh or not, without touching the source.
    #[must_use]
    pub fn peek(&self) -> Option<Arc<QueryResult>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_fresh(&self, result: &QueryResult, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(result.fetched_at) < self.ttl
    }

    fn fresh(&self, now: DateTime<Utc>) -> Option<Arc<QueryResult>> {
        self.peek().filter(|r| self.is_fresh(r, now))
    }

    fn cached(result: Arc<QueryResult>) -> Fetched {
        Fetched {
            result,
            origin: FetchOrigin::Cache,
        }
    }

    /// Returns the stored result if it is younger than the TTL, otherwise
    /// performs one fetch-and-normalize cycle and stores it.
    ///
    /// # Errors
    ///
    /// Returns the source's [`FetchError`] unchanged. The stored result is
    /// left as it was and is not returned in place of the error.
    pub async fn fetch(&self, now: DateTime<Utc>) -> Result<Fetched, FetchError> {
        if let Some(result) = self.fresh(now) {
            tracing::debug!(records = result.len(), "serving cached result");
            return Ok(Self::cached(result));
        }

        let guard = if let Ok(guard) = self.refresh_lock.try_lock() {
            guard
        } else {
            if let Some(previous) = self.peek() {
                tracing::debug!("refresh in flight; serving previous result");
                return Ok(Self::cached(previous));
            }
            self.refresh_lock.lock().await
        };

        // Whoever held the lock before us may have just refreshed.
        if let Some(result) = self.fresh(now) {
            return Ok(Self::cached(result));
        }

        self.refresh_locked(now, guard).await
    }

    /// Fetches unconditionally, replacing the stored result on success.
    ///
    /// # Errors
    ///
    /// Returns the source's [`FetchError`]; the stored result is untouched.
    pub async fn refresh(&self, now: DateTime<Utc>) -> Result<Fetched, FetchError> {
        let guard = self.refresh_lock.lock().await;
        self.refresh_locked(now, guard).await
    }

    async fn refresh_locked(
        &self,
        now: DateTime<Utc>,
        _guard: MutexGuard<'_, ()>,
    ) -> Result<Fetched, FetchError> {
        let started = Instant::now();

        let elements = match self.source.fetch_elements().await {
            Ok(elements) => elements,
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed; keeping previous cache state");
                return Err(e);
            }
        };

        let records = normalize_all(&elements);
        let result = Arc::new(QueryResult::new(records, now));

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&result));

        tracing::info!(
            elements = elements.len(),
            records = result.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "refreshed business cache"
        );

        Ok(Fetched {
            result,
            origin: FetchOrigin::Overpass,
        })
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
