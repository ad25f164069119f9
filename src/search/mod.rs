pub mod cascade;
pub mod providers;

pub use cascade::{cascade, CascadeOutcome};

use reqwest::StatusCode;

/// Information provider abstraction - encyclopedia editions and the like
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Name used in logs and error messages (e.g. "wikipedia:it")
    fn name(&self) -> &str;

    /// Look up `query` and return candidate addresses in provider order
    async fn search(&self, query: &str, options: &SearchOptions)
        -> Result<ProviderResult, SearchError>;
}

/// Options forwarded to every provider request
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Maximum number of candidates to ask for (sent as the `limit` parameter)
    pub limit: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { limit: 1 }
    }
}

/// Candidate addresses returned by one provider
///
/// An empty result is a normal outcome and lets the cascade move on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderResult {
    pub urls: Vec<String>,
}

impl ProviderResult {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Provider failures. All of them abort the cascade.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{provider}: query {query:?} (limit {limit}) failed with status {status}")]
    Status {
        provider: String,
        query: String,
        limit: u32,
        status: StatusCode,
    },

    #[error("{provider}: query {query:?} failed: {source}")]
    Transport {
        provider: String,
        query: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: query {query:?} returned an unexpected response: {reason}")]
    MalformedResponse {
        provider: String,
        query: String,
        reason: String,
    },
}

impl SearchError {
    /// Name of the provider that failed
    pub fn provider(&self) -> &str {
        match self {
            SearchError::Status { provider, .. }
            | SearchError::Transport { provider, .. }
            | SearchError::MalformedResponse { provider, .. } => provider.as_str(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SearchError::Transport { source, .. } if source.is_timeout())
    }
}
