use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use salonmap_core::{BusinessRecord, FilterCriteria, TypeChoice};
use salonmap_locator::{to_csv_string, FetchError, FetchOrigin, QueryOutcome};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_fetch_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Query string shared by the JSON and CSV routes. Everything is optional
/// and parsed leniently: an unknown `type` means all types.
#[derive(Debug, Default, Deserialize)]
pub(super) struct SalonsParams {
    #[serde(rename = "type")]
    pub type_choice: Option<String>,
    pub q: Option<String>,
    pub region_only: Option<String>,
    pub force: Option<String>,
}

impl SalonsParams {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            self.type_choice
                .as_deref()
                .map(TypeChoice::parse_lenient)
                .unwrap_or_default(),
            self.q.as_deref().unwrap_or_default(),
        )
    }
}

fn flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

#[derive(Debug, Serialize)]
pub(super) struct SalonItem {
    #[serde(flatten)]
    pub record: BusinessRecord,
    pub osm_url: Option<String>,
}

impl From<BusinessRecord> for SalonItem {
    fn from(record: BusinessRecord) -> Self {
        let osm_url = record.osm_url();
        Self { record, osm_url }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SalonsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub source: FetchOrigin,
    pub fetched_at: DateTime<Utc>,
    pub fetched_count: usize,
    pub count: usize,
    pub records: Vec<SalonItem>,
}

impl From<QueryOutcome> for SalonsData {
    fn from(outcome: QueryOutcome) -> Self {
        match outcome {
            QueryOutcome::NoData { fetched_at, origin } => Self {
                status: Some("no_data"),
                source: origin,
                fetched_at,
                fetched_count: 0,
                count: 0,
                records: Vec::new(),
            },
            QueryOutcome::Matches {
                records,
                fetched_count,
                fetched_at,
                origin,
            } => Self {
                status: None,
                source: origin,
                fetched_at,
                fetched_count,
                count: records.len(),
                records: records.into_iter().map(SalonItem::from).collect(),
            },
        }
    }
}

async fn run_query(state: &AppState, params: &SalonsParams) -> Result<QueryOutcome, FetchError> {
    let criteria = params.criteria();
    let region_only = flag(params.region_only.as_deref());

    if flag(params.force.as_deref()) {
        tracing::info!("forced refresh requested");
        state.pipeline.refresh_and_run(&criteria, region_only).await
    } else {
        state.pipeline.run(&criteria, region_only).await
    }
}

pub(super) async fn list_salons(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SalonsParams>,
) -> Result<Json<ApiResponse<SalonsData>>, ApiError> {
    let outcome = run_query(&state, &params)
        .await
        .map_err(|e| map_fetch_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: SalonsData::from(outcome),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn export_salons_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SalonsParams>,
) -> Result<Response, ApiError> {
    let outcome = run_query(&state, &params)
        .await
        .map_err(|e| map_fetch_error(req_id.0.clone(), &e))?;

    let body = to_csv_string(outcome.records()).map_err(|e| {
        tracing::error!(error = %e, "csv export failed");
        ApiError::new(req_id.0.clone(), "internal_error", "csv export failed")
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"salons.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}
