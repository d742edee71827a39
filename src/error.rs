use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("unknown rule set '{0}' (expected 'standard' or 'code-prefix')")]
    UnknownRuleSet(String),
}

/// Shown to the user whenever the catalog cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Kunne ikke laste fag. Prøv igjen senere.";
