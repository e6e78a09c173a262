pub mod app_config;
pub mod config;
pub mod matching;
pub mod records;
pub mod region;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use matching::{in_region_only, matches, FilterCriteria, TypeChoice};
pub use records::{BusinessRecord, QueryResult};
pub use region::{load_region, Region};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read region file {path}: {source}")]
    RegionFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse region file: {0}")]
    RegionFileParse(#[from] serde_yaml::Error),

    #[error("region validation failed: {0}")]
    Validation(String),
}
