use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hair/beauty business normalized from one OpenStreetMap element.
///
/// Every field is optional: OSM tagging is inconsistent and a record with
/// only a name still takes part in text and type filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// `node`, `way`, or `relation`.
    pub element_type: Option<String>,
    pub element_id: Option<i64>,
    pub name: Option<String>,
    /// Value of the `shop` tag, or `amenity` when `shop` is absent.
    pub category: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
    /// Comma-joined street address, e.g. `"10, Main St, Welland, L3B 1A1"`.
    pub address: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl BusinessRecord {
    /// Returns `(latitude, longitude)` when the record can be placed on a map.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Link back to the source element on openstreetmap.org.
    #[must_use]
    pub fn osm_url(&self) -> Option<String> {
        let element_type = self.element_type.as_deref()?;
        let element_id = self.element_id?;
        Some(format!(
            "https://www.openstreetmap.org/{element_type}/{element_id}"
        ))
    }
}

/// One fetched-and-normalized snapshot of the external data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Records in the order the source returned them.
    pub records: Vec<BusinessRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl QueryResult {
    #[must_use]
    pub fn new(records: Vec<BusinessRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records,
            fetched_at,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
