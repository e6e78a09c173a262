//! Per-record filter predicate: a type gate and a free-text gate, ANDed.

use serde::{Deserialize, Serialize};

use crate::records::BusinessRecord;
use crate::region::Region;

/// Business type filter offered to users, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeChoice {
    #[default]
    All,
    Hairdresser,
    Beauty,
    Spa,
    Barber,
    Salon,
    Saloon,
}

impl TypeChoice {
    pub const ORDERED: [TypeChoice; 7] = [
        TypeChoice::All,
        TypeChoice::Hairdresser,
        TypeChoice::Beauty,
        TypeChoice::Spa,
        TypeChoice::Barber,
        TypeChoice::Salon,
        TypeChoice::Saloon,
    ];

    /// Human-facing label; the parenthesised part says which field is tested.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TypeChoice::All => "All",
            TypeChoice::Hairdresser => "hairdresser (tag)",
            TypeChoice::Beauty => "beauty (tag)",
            TypeChoice::Spa => "spa (tag)",
            TypeChoice::Barber => "barber (name)",
            TypeChoice::Salon => "salon (name)",
            TypeChoice::Saloon => "saloon (name)",
        }
    }

    /// Parses a user selection such as `"spa"`, `"Barber"` or
    /// `"hairdresser (tag)"`. Anything unrecognized is `All`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        let word = lowered
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("");
        match word {
            "hairdresser" => TypeChoice::Hairdresser,
            "beauty" => TypeChoice::Beauty,
            "spa" => TypeChoice::Spa,
            "barber" => TypeChoice::Barber,
            "salon" => TypeChoice::Salon,
            "saloon" => TypeChoice::Saloon,
            _ => TypeChoice::All,
        }
    }
}

impl From<&str> for TypeChoice {
    fn from(raw: &str) -> Self {
        Self::parse_lenient(raw)
    }
}

impl std::fmt::Display for TypeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub type_choice: TypeChoice,
    pub search_text: String,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(type_choice: TypeChoice, search_text: impl Into<String>) -> Self {
        Self {
            type_choice,
            search_text: search_text.into(),
        }
    }
}

fn lower(field: Option<&String>) -> String {
    field.map(|s| s.to_lowercase()).unwrap_or_default()
}

fn equals_ci(field: Option<&String>, expected: &str) -> bool {
    field.is_some_and(|v| v.to_lowercase() == expected)
}

fn passes_type_gate(record: &BusinessRecord, type_choice: TypeChoice) -> bool {
    match type_choice {
        TypeChoice::All => true,
        TypeChoice::Hairdresser => equals_ci(record.category.as_ref(), "hairdresser"),
        TypeChoice::Beauty => equals_ci(record.category.as_ref(), "beauty"),
        // Address substring also catches "42 Spa Lane" (and "Spadina Ave").
        TypeChoice::Spa => {
            equals_ci(record.category.as_ref(), "spa")
                || lower(record.address.as_ref()).contains("spa")
        }
        TypeChoice::Barber => lower(record.name.as_ref()).contains("barber"),
        TypeChoice::Salon => lower(record.name.as_ref()).contains("salon"),
        TypeChoice::Saloon => lower(record.name.as_ref()).contains("saloon"),
    }
}

fn passes_text_gate(record: &BusinessRecord, search_text: &str, region: &Region) -> bool {
    let query = search_text.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let address = lower(record.address.as_ref());
    let haystack = format!(
        "{} {} {}",
        lower(record.name.as_ref()),
        lower(record.city.as_ref()),
        address
    );

    if query == region.keyword() {
        return region.contains(&haystack) || region.mentions_name(&address);
    }

    query.split_whitespace().all(|term| haystack.contains(term))
}

/// Returns `true` if `record` passes both the type gate and the text gate.
#[must_use]
pub fn matches(record: &BusinessRecord, criteria: &FilterCriteria, region: &Region) -> bool {
    passes_type_gate(record, criteria.type_choice)
        && passes_text_gate(record, &criteria.search_text, region)
}

/// Region-only refinement, evaluated on `city` alone.
#[must_use]
pub fn in_region_only(record: &BusinessRecord, region: &Region) -> bool {
    record
        .city
        .as_deref()
        .is_some_and(|city| region.contains(city))
}

#[cfg(test)]
#[path = "matching_test.rs"]
mod tests;
