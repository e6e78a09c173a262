//! Overpass API response types.
//!
//! Only the fields the normalizer reads are modelled. Elements are kept as
//! raw JSON in [`OverpassResponse`] and decoded one at a time.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Top-level body returned by the interpreter for `[out:json]` queries.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
    /// Set when the server hit a runtime error (timeout, memory) mid-query.
    #[serde(default)]
    pub remark: Option<String>,
}

/// One OSM node, way, or relation.
///
/// Nodes carry `lat`/`lon`; ways and relations carry `center` when the query
/// ends with `out center`. Every field decodes leniently: a value of the
/// wrong JSON type becomes `None`, and non-string tag values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub element_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub center: Option<Center>,
    #[serde(default, deserialize_with = "string_tags")]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Center {
    #[serde(default, deserialize_with = "lenient")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub lon: Option<f64>,
}

/// Decodes `T` if the value has the right shape, otherwise `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Keeps string-valued tags only; `null` or a non-object `tags` is empty.
fn string_tags<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(map)) = value else {
        return Ok(HashMap::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect())
}
