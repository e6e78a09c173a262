//! Query pipeline: cached fetch, then the match engine, then the optional
//! region-only refinement.

use std::time::Duration;

use chrono::{DateTime, Utc};
use salonmap_core::{in_region_only, matches, BusinessRecord, FilterCriteria, Region};

use crate::cache::{CachedFetch, FetchOrigin, Fetched};
use crate::client::ElementSource;
use crate::error::FetchError;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The source answered successfully with zero elements.
    NoData {
        fetched_at: DateTime<Utc>,
        origin: FetchOrigin,
    },
    /// Records that passed every active filter, in source order.
    Matches {
        records: Vec<BusinessRecord>,
        fetched_count: usize,
        fetched_at: DateTime<Utc>,
        origin: FetchOrigin,
    },
}

impl QueryOutcome {
    #[must_use]
    pub fn records(&self) -> &[BusinessRecord] {
        match self {
            QueryOutcome::NoData { .. } => &[],
            QueryOutcome::Matches { records, .. } => records,
        }
    }

    #[must_use]
    pub fn into_records(self) -> Vec<BusinessRecord> {
        match self {
            QueryOutcome::NoData { .. } => Vec::new(),
            QueryOutcome::Matches { records, .. } => records,
        }
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        match self {
            QueryOutcome::NoData { fetched_at, .. } | QueryOutcome::Matches { fetched_at, .. } => {
                *fetched_at
            }
        }
    }

    #[must_use]
    pub fn origin(&self) -> FetchOrigin {
        match self {
            QueryOutcome::NoData { origin, .. } | QueryOutcome::Matches { origin, .. } => *origin,
        }
    }

    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, QueryOutcome::NoData { .. })
    }
}

/// Filters `records` by the match engine and, when `region_only` is set,
/// by region membership of the city. Relative order is preserved.
#[must_use]
pub fn apply_filters(
    records: &[BusinessRecord],
    criteria: &FilterCriteria,
    region_only: bool,
    region: &Region,
) -> Vec<BusinessRecord> {
    records
        .iter()
        .filter(|r| matches(r, criteria, region))
        .filter(|r| !region_only || in_region_only(r, region))
        .cloned()
        .collect()
}

pub struct QueryPipeline<S> {
    cache: CachedFetch<S>,
    region: Region,
}

impl<S: ElementSource> QueryPipeline<S> {
    #[must_use]
    pub fn new(source: S, ttl: Duration, region: Region) -> Self {
        Self {
            cache: CachedFetch::new(source, ttl),
            region,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &CachedFetch<S> {
        &self.cache
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Runs the query against the cache as of the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the cache had to fetch and the fetch failed.
    pub async fn run(
        &self,
        criteria: &FilterCriteria,
        region_only: bool,
    ) -> Result<QueryOutcome, FetchError> {
        self.run_at(criteria, region_only, Utc::now()).await
    }

    /// Like [`run`](Self::run) with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the cache had to fetch and the fetch failed.
    pub async fn run_at(
        &self,
        criteria: &FilterCriteria,
        region_only: bool,
        now: DateTime<Utc>,
    ) -> Result<QueryOutcome, FetchError> {
        let fetched = self.cache.fetch(now).await?;
        Ok(self.evaluate(&fetched, criteria, region_only))
    }

    /// Forces a refetch, then runs the query on the new result.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the fetch failed.
    pub async fn refresh_and_run(
        &self,
        criteria: &FilterCriteria,
        region_only: bool,
    ) -> Result<QueryOutcome, FetchError> {
        let fetched = self.cache.refresh(Utc::now()).await?;
        Ok(self.evaluate(&fetched, criteria, region_only))
    }

    fn evaluate(
        &self,
        fetched: &Fetched,
        criteria: &FilterCriteria,
        region_only: bool,
    ) -> QueryOutcome {
        let result = &fetched.result;
        if result.is_empty() {
            tracing::info!("source returned no elements");
            return QueryOutcome::NoData {
                fetched_at: result.fetched_at,
                origin: fetched.origin,
            };
        }

        let records = apply_filters(&result.records, criteria, region_only, &self.region);
        tracing::debug!(
            type_choice = %criteria.type_choice,
            search = %criteria.search_text,
            region_only,
            fetched = result.len(),
            matched = records.len(),
            "evaluated query"
        );

        QueryOutcome::Matches {
            records,
            fetched_count: result.len(),
            fetched_at: result.fetched_at,
            origin: fetched.origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;
    use salonmap_core::TypeChoice;

    use super::*;
    use crate::types::RawElement;

    struct Fixture {
        elements: Vec<RawElement>,
        calls: AtomicUsize,
    }

    impl ElementSource for Fixture {
        async fn fetch_elements(&self) -> Result<Vec<RawElement>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.elements.clone())
        }
    }

    fn element(id: i64, tags: &[(&str, &str)]) -> RawElement {
        RawElement {
            element_type: Some("node".to_owned()),
            id: Some(id),
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect::<HashMap<_, _>>(),
            ..RawElement::default()
        }
    }

    fn pipeline(elements: Vec<RawElement>) -> QueryPipeline<Fixture> {
        QueryPipeline::new(
            Fixture {
                elements,
                calls: AtomicUsize::new(0),
            },
            crate::cache::DEFAULT_TTL,
            Region::niagara(),
        )
    }

    fn sample() -> Vec<RawElement> {
        vec![
            element(1, &[("name", "Jane's Salon"), ("shop", "hairdresser"), ("addr:city", "Welland")]),
            element(2, &[("name", "Toronto Salon"), ("shop", "hairdresser"), ("addr:city", "Toronto")]),
            element(3, &[("name", "Falls Barber"), ("shop", "hairdresser"), ("addr:city", "Niagara Falls")]),
            element(4, &[("name", "Glow"), ("amenity", "spa"), ("addr:full", "9 Lake Rd, Grimsby")]),
            element(5, &[("name", "Welland Beauty"), ("shop", "beauty"), ("addr:city", "Welland")]),
        ]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 5, 10, 0, 0).unwrap()
    }

    fn ids(outcome: &QueryOutcome) -> Vec<i64> {
        outcome
            .records()
            .iter()
            .filter_map(|r| r.element_id)
            .collect()
    }

    #[tokio::test]
    async fn unfiltered_run_returns_everything_in_order() {
        let p = pipeline(sample());
        let outcome = p
            .run_at(&FilterCriteria::default(), false, now())
            .await
            .expect("run");
        assert_eq!(ids(&outcome), vec![1, 2, 3, 4, 5]);
        assert!(!outcome.is_no_data());
        assert_eq!(outcome.origin(), FetchOrigin::Overpass);
    }

    #[tokio::test]
    async fn empty_source_is_no_data() {
        let p = pipeline(vec![]);
        let outcome = p
            .run_at(&FilterCriteria::default(), false, now())
            .await
            .expect("run");
        assert!(outcome.is_no_data());
        assert!(outcome.records().is_empty());
        assert_eq!(outcome.fetched_at(), now());
    }

    #[tokio::test]
    async fn region_keyword_keeps_order() {
        let p = pipeline(sample());
        let criteria = FilterCriteria::new(TypeChoice::All, "niagara");
        let outcome = p.run_at(&criteria, false, now()).await.expect("run");
        // Glow matches through its addr:full mentioning Grimsby.
        assert_eq!(ids(&outcome), vec![1, 3, 4, 5]);
    }

    #[tokio::test]
    async fn region_only_uses_city_not_address() {
        let p = pipeline(sample());
        let outcome = p
            .run_at(&FilterCriteria::default(), true, now())
            .await
            .expect("run");
        assert_eq!(ids(&outcome), vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn type_text_and_region_only_combine() {
        let p = pipeline(sample());
        let criteria = FilterCriteria::new(TypeChoice::Salon, "salon");
        let outcome = p.run_at(&criteria, true, now()).await.expect("run");
        assert_eq!(ids(&outcome), vec![1]);
        if let QueryOutcome::Matches { fetched_count, .. } = outcome {
            assert_eq!(fetched_count, 5);
        } else {
            panic!("expected matches");
        }
    }

    #[tokio::test]
    async fn no_matches_is_not_no_data() {
        let p = pipeline(sample());
        let criteria = FilterCriteria::new(TypeChoice::All, "vancouver");
        let outcome = p.run_at(&criteria, false, now()).await.expect("run");
        assert!(!outcome.is_no_data());
        assert!(outcome.records().is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_reuse_cache() {
        let p = pipeline(sample());
        p.run_at(&FilterCriteria::default(), false, now())
            .await
            .expect("first");
        let second = p
            .run_at(&FilterCriteria::new(TypeChoice::Beauty, ""), false, now())
            .await
            .expect("second");
        assert_eq!(second.origin(), FetchOrigin::Cache);
        assert_eq!(ids(&second), vec![5]);
        assert_eq!(p.cache().source().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn apply_filters_does_not_deduplicate() {
        let record = crate::normalize::normalize(&element(7, &[("name", "Twin Salon")]));
        let records = vec![record.clone(), record];
        let kept = apply_filters(
            &records,
            &FilterCriteria::new(TypeChoice::Salon, ""),
            false,
            &Region::niagara(),
        );
        assert_eq!(kept.len(), 2);
    }
}
