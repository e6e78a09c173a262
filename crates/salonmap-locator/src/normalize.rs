//! Normalization from raw Overpass elements to [`salonmap_core::BusinessRecord`].
//!
//! Total: every element yields a record, and anything missing or blank
//! becomes `None`. Present values are kept verbatim.

use salonmap_core::BusinessRecord;

use crate::types::RawElement;

const ADDRESS_PARTS: [&str; 4] = [
    "addr:housenumber",
    "addr:street",
    "addr:city",
    "addr:postcode",
];

/// Returns the tag value as stored; whitespace-only counts as absent.
fn tag<'a>(raw: &'a RawElement, key: &str) -> Option<&'a str> {
    raw.tags
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// First present tag among `keys`.
fn first_tag(raw: &RawElement, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| tag(raw, key))
        .map(str::to_string)
}

fn assemble_address(raw: &RawElement) -> Option<String> {
    let parts: Vec<&str> = ADDRESS_PARTS
        .iter()
        .filter_map(|key| tag(raw, key))
        .collect();

    if parts.is_empty() {
        return tag(raw, "addr:full").map(str::to_string);
    }
    Some(parts.join(", "))
}

/// Direct `lat`/`lon` win over `center`; a half pair counts as missing.
fn coordinates(raw: &RawElement) -> (Option<f64>, Option<f64>) {
    let direct = raw.lat.zip(raw.lon);
    let centroid = raw.center.and_then(|c| c.lat.zip(c.lon));
    direct.or(centroid).unzip()
}

/// Normalizes one Overpass element into a [`BusinessRecord`].
#[must_use]
pub fn normalize(raw: &RawElement) -> BusinessRecord {
    let (latitude, longitude) = coordinates(raw);

    BusinessRecord {
        element_type: raw.element_type.clone().filter(|t| !t.is_empty()),
        element_id: raw.id,
        name: first_tag(raw, &["name"]),
        category: first_tag(raw, &["shop", "amenity"]),
        phone: first_tag(raw, &["phone", "contact:phone"]),
        website: first_tag(raw, &["website", "contact:website"]),
        opening_hours: first_tag(raw, &["opening_hours"]),
        address: assemble_address(raw),
        city: first_tag(raw, &["addr:city"]),
        latitude,
        longitude,
    }
}

/// Normalizes a batch, preserving source order.
#[must_use]
pub fn normalize_all(raw: &[RawElement]) -> Vec<BusinessRecord> {
    raw.iter().map(normalize).collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
