use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the CLI and the HTTP server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Overpass interpreter endpoint that receives the `data=` POST.
    pub overpass_url: String,
    /// ISO 3166-2 code of the administrative area to search, e.g. `CA-ON`.
    pub overpass_area: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// How long a fetched result stays fresh before the next query refetches.
    pub cache_ttl_secs: u64,
    /// Optional YAML override for the built-in region table.
    pub region_path: Option<PathBuf>,
}
