//! Fixed region tables used by the region keyword and the region-only filter.
//!
//! A region is a name (matched as a substring) plus the municipalities that
//! belong to it. Everything is compared lower-cased.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const NIAGARA_MUNICIPALITIES: [&str; 13] = [
    "niagara falls",
    "niagara-on-the-lake",
    "st. catharines",
    "st catharines",
    "welland",
    "thorold",
    "pelham",
    "grimsby",
    "lincoln",
    "fort erie",
    "port colborne",
    "wainfleet",
    "west lincoln",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    name: String,
    keyword: String,
    municipalities: Vec<String>,
}

impl Region {
    /// Builds a region, lower-casing and trimming every entry.
    #[must_use]
    pub fn new<I, S>(name: &str, keyword: &str, municipalities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.trim().to_lowercase(),
            keyword: keyword.trim().to_lowercase(),
            municipalities: municipalities
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Niagara Region, Ontario, with its twelve lower-tier municipalities
    /// (St. Catharines appears with and without the period).
    #[must_use]
    pub fn niagara() -> Self {
        Self::new("niagara", "niagara", NIAGARA_MUNICIPALITIES)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The reserved search term that switches the text gate to region membership.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn municipalities(&self) -> &[String] {
        &self.municipalities
    }

    /// Returns `true` if `text` mentions the region name or any of its
    /// municipalities as a substring. Case-insensitive.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.mentions_name(&text)
            || self
                .municipalities
                .iter()
                .any(|m| text.contains(m.as_str()))
    }

    /// Returns `true` if `text` contains the region's own name.
    #[must_use]
    pub fn mentions_name(&self, text: &str) -> bool {
        text.to_lowercase().contains(self.name.as_str())
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::niagara()
    }
}

#[derive(Debug, Deserialize)]
struct RegionFile {
    name: String,
    keyword: Option<String>,
    #[serde(default)]
    municipalities: Vec<String>,
}

/// Load a region table from a YAML file.
///
/// ```yaml
/// name: niagara
/// keyword: niagara      # optional, defaults to name
/// municipalities:
///   - welland
///   - thorold
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_region(path: &Path) -> Result<Region, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_region(&content)
}

fn parse_region(content: &str) -> Result<Region, ConfigError> {
    let file: RegionFile = serde_yaml::from_str(content)?;

    if file.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "region name must be non-empty".to_string(),
        ));
    }

    let keyword = file.keyword.unwrap_or_else(|| file.name.clone());
    if keyword.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "region '{}' has an empty keyword",
            file.name
        )));
    }

    if let Some(pos) = file.municipalities.iter().position(|m| m.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "region '{}' has a blank municipality at index {pos}",
            file.name
        )));
    }

    Ok(Region::new(&file.name, &keyword, &file.municipalities))
}
