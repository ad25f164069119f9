use crate::search::{ProviderResult, SearchError, SearchOptions, SearchProvider};

/// Placeholder replaced by the edition's language code in endpoint templates
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Index of the candidate URL list in an opensearch response
const OPENSEARCH_URLS_INDEX: usize = 3;

/// One language edition of Wikipedia, queried through the opensearch API
///
/// The response is a JSON array `[query, titles, descriptions, urls]`; only
/// the fourth element is used.
/// Documentation: https://www.mediawiki.org/wiki/API:Opensearch
pub struct WikipediaProvider {
    client: reqwest::Client,
    name: String,
    endpoint: String,
}

impl WikipediaProvider {
    /// Create a provider for `lang` from an endpoint template such as
    /// `https://{lang}.wikipedia.org/w/api.php`.
    pub fn new(client: reqwest::Client, lang: &str, endpoint_template: &str) -> Self {
        Self {
            client,
            name: format!("wikipedia:{lang}"),
            endpoint: endpoint_template.replace(LANG_PLACEHOLDER, lang),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn extract_urls(&self, query: &str, body: &serde_json::Value) -> Result<Vec<String>, SearchError> {
        let malformed = |reason: &str| SearchError::MalformedResponse {
            provider: self.name.clone(),
            query: query.to_string(),
            reason: reason.to_string(),
        };

        let urls = body
            .get(OPENSEARCH_URLS_INDEX)
            .and_then(|v| v.as_array())
            .ok_or_else(|| malformed("missing url list at index 3"))?;

        urls.iter()
            .map(|url| {
                url.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| malformed("url list contains a non-string entry"))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SearchProvider for WikipediaProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<ProviderResult, SearchError> {
        tracing::debug!(
            provider = %self.name,
            query = %query,
            limit = options.limit,
            "performing opensearch request"
        );

        let transport = |source: reqwest::Error| SearchError::Transport {
            provider: self.name.clone(),
            query: query.to_string(),
            source,
        };

        let limit = options.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(provider = %self.name, status = %status, "opensearch api error");

            return Err(SearchError::Status {
                provider: self.name.clone(),
                query: query.to_string(),
                limit: options.limit,
                status,
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            SearchError::MalformedResponse {
                provider: self.name.clone(),
                query: query.to_string(),
                reason: e.to_string(),
            }
        })?;

        let urls = self.extract_urls(query, &body)?;

        tracing::debug!(
            provider = %self.name,
            result_count = urls.len(),
            "opensearch request completed"
        );

        Ok(ProviderResult::new(urls))
    }
}
