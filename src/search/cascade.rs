use super::{SearchError, SearchOptions, SearchProvider};
use std::sync::Arc;

/// How a cascade run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// A provider returned at least one candidate
    Found { provider: String, urls: Vec<String> },
    /// Every provider answered successfully with nothing
    Exhausted,
}

/// Query `providers` in priority order until one returns candidates.
///
/// Providers are awaited one at a time. Any provider error stops the run and
/// is returned as-is; later providers are never contacted.
pub async fn cascade(
    providers: &[Arc<dyn SearchProvider>],
    query: &str,
    options: &SearchOptions,
) -> Result<CascadeOutcome, SearchError> {
    for provider in providers {
        tracing::debug!(provider = provider.name(), query = %query, limit = options.limit, "querying provider");

        let result = provider.search(query, options).await.map_err(|e| {
            tracing::warn!(provider = provider.name(), error = %e, "provider failed, aborting cascade");
            e
        })?;

        if !result.is_empty() {
            tracing::debug!(provider = provider.name(), found = result.urls.len(), "cascade satisfied");
            return Ok(CascadeOutcome::Found {
                provider: provider.name().to_string(),
                urls: result.urls,
            });
        }

        tracing::debug!(provider = provider.name(), "no candidates, trying next provider");
    }

    tracing::debug!(query = %query, "cascade exhausted");
    Ok(CascadeOutcome::Exhausted)
}
