//! Resolution of user intents into browser destinations
//!
//! Every intent runs the same straight pipeline: fetch text (argument first,
//! clipboard otherwise), optionally classify it as an address, encode it, and
//! either build a single URL or run the encyclopedia cascade. Nothing is
//! retried.

use crate::address::{AddressClassifier, DnsError, HostResolver};
use crate::config::Config;
use crate::desktop::{browser_name, BrowserDispatcher, TextSource};
use crate::query::{EncodedQuery, Query};
use crate::search::providers::{WikipediaProvider, LANG_PLACEHOLDER};
use crate::search::{cascade, CascadeOutcome, SearchError, SearchOptions, SearchProvider};
use std::sync::Arc;

/// Attribution value sent when no browser name is known
const UNKNOWN_CLIENT: &str = "default";

/// Pages opened without any resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    WhatsApp,
    Google,
    Mail,
    Calendar,
}

impl Shortcut {
    pub fn url(self) -> &'static str {
        match self {
            Shortcut::WhatsApp => "http://web.whatsapp.com",
            Shortcut::Google => "https://www.google.com",
            Shortcut::Mail => "https://mail.google.com/",
            Shortcut::Calendar => "https://calendar.google.com/",
        }
    }
}

/// What the user asked for. `None` text means "read the clipboard".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open an address, or search the web for the text
    Search {
        text: Option<String>,
        site: Option<String>,
    },
    Translate {
        text: Option<String>,
        source: String,
        target: String,
    },
    /// Search one encyclopedia edition
    Wiki { text: Option<String>, lang: String },
    /// Try the configured editions in order, falling back to a web search
    WikiCascade { text: Option<String>, count: u32 },
    Shortcut(Shortcut),
}

/// Final addresses for one intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDestination {
    /// Input was already a live address
    Direct(String),
    /// URL built for a single provider
    Constructed(String),
    /// Candidates from the first provider in the cascade that had any
    Candidates { provider: String, urls: Vec<String> },
    /// Web search used after every cascade provider came back empty
    Fallback(String),
}

impl ResolvedDestination {
    pub fn urls(&self) -> Vec<String> {
        match self {
            ResolvedDestination::Direct(url)
            | ResolvedDestination::Constructed(url)
            | ResolvedDestination::Fallback(url) => vec![url.clone()],
            ResolvedDestination::Candidates { urls, .. } => urls.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no query supplied and the clipboard is empty")]
    NoInput,

    #[error(transparent)]
    Dns(#[from] DnsError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Turns intents into destinations using the configured providers
pub struct Resolver {
    config: Config,
    classifier: AddressClassifier,
    text_source: Arc<dyn TextSource>,
    providers: Vec<Arc<dyn SearchProvider>>,
    client_name: String,
}

impl Resolver {
    /// Build a resolver. Cascade providers are created here, once, from
    /// `config.wiki.cascade`.
    pub fn new(
        config: Config,
        resolver: Arc<dyn HostResolver>,
        text_source: Arc<dyn TextSource>,
    ) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(config.network.timeout())
            .user_agent(concat!("browser-ctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ResolveError::Client)?;

        let providers = config
            .wiki
            .cascade
            .iter()
            .map(|lang| {
                Arc::new(WikipediaProvider::new(client.clone(), lang, &config.wiki.api_url))
                    as Arc<dyn SearchProvider>
            })
            .collect();

        Ok(Self::with_providers(config, resolver, text_source, providers))
    }

    /// Build a resolver around an explicit provider list
    pub fn with_providers(
        config: Config,
        resolver: Arc<dyn HostResolver>,
        text_source: Arc<dyn TextSource>,
        providers: Vec<Arc<dyn SearchProvider>>,
    ) -> Self {
        let classifier = AddressClassifier::new(resolver, config.network.timeout())
            .with_strict_dns(config.network.strict_dns);
        let client_name =
            browser_name(config.browser.as_deref()).unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

        Self {
            config,
            classifier,
            text_source,
            providers,
            client_name,
        }
    }

    pub fn providers(&self) -> &[Arc<dyn SearchProvider>] {
        &self.providers
    }

    pub async fn resolve(&self, intent: Intent) -> Result<ResolvedDestination, ResolveError> {
        tracing::debug!(intent = ?intent, "resolving intent");

        match intent {
            Intent::Search { text, site } => self.resolve_search(text, site).await,
            Intent::Translate {
                text,
                source,
                target,
            } => self.resolve_translate(text, &source, &target),
            Intent::Wiki { text, lang } => self.resolve_wiki(text, &lang),
            Intent::WikiCascade { text, count } => self.resolve_wiki_cascade(text, count).await,
            Intent::Shortcut(shortcut) => Ok(ResolvedDestination::Direct(shortcut.url().to_string())),
        }
    }

    /// Resolve `intent` and hand the result to `browser`
    pub async fn dispatch(
        &self,
        intent: Intent,
        browser: &dyn BrowserDispatcher,
    ) -> Result<ResolvedDestination, ResolveError> {
        let destination = self.resolve(intent).await?;
        browser.open_tabs(&destination.urls());
        Ok(destination)
    }

    /// Explicit text wins; otherwise the text source is read exactly once.
    fn input_text(&self, explicit: Option<String>) -> Result<String, ResolveError> {
        let text = match explicit.filter(|t| !t.trim().is_empty()) {
            Some(text) => text,
            None => {
                tracing::debug!("no explicit text, reading text source");
                self.text_source.read_text()
            }
        };

        if text.trim().is_empty() {
            return Err(ResolveError::NoInput);
        }
        Ok(text.trim().to_string())
    }

    async fn resolve_search(
        &self,
        text: Option<String>,
        site: Option<String>,
    ) -> Result<ResolvedDestination, ResolveError> {
        let text = self.input_text(text)?;

        if self.classifier.classify(&text).await? {
            return Ok(ResolvedDestination::Direct(text));
        }

        let encoded = Query::new(text).with_keyword(site.as_deref()).encode();
        Ok(ResolvedDestination::Constructed(format!(
            "{}?client={}&q={}",
            self.config.search.engine_url,
            urlencoding::encode(&self.client_name),
            encoded
        )))
    }

    fn resolve_translate(
        &self,
        text: Option<String>,
        source: &str,
        target: &str,
    ) -> Result<ResolvedDestination, ResolveError> {
        let encoded = Query::new(self.input_text(text)?).encode();
        Ok(ResolvedDestination::Constructed(format!(
            "{}?sl={}&tl={}&text={}",
            self.config.translate.url,
            urlencoding::encode(source),
            urlencoding::encode(target),
            encoded
        )))
    }

    fn resolve_wiki(&self, text: Option<String>, lang: &str) -> Result<ResolvedDestination, ResolveError> {
        let encoded = Query::new(self.input_text(text)?).encode();
        Ok(ResolvedDestination::Constructed(format!(
            "{}?search={}",
            self.config.wiki.page_url.replace(LANG_PLACEHOLDER, lang),
            encoded
        )))
    }

    async fn resolve_wiki_cascade(
        &self,
        text: Option<String>,
        count: u32,
    ) -> Result<ResolvedDestination, ResolveError> {
        let query = Query::new(self.input_text(text)?);
        let options = SearchOptions { limit: count };

        match cascade(&self.providers, query.text(), &options).await? {
            CascadeOutcome::Found { provider, urls } => {
                Ok(ResolvedDestination::Candidates { provider, urls })
            }
            CascadeOutcome::Exhausted => Ok(ResolvedDestination::Fallback(
                self.fallback_url(&query.encode()),
            )),
        }
    }

    fn fallback_url(&self, encoded: &EncodedQuery) -> String {
        format!("{}?q={}", self.config.search.engine_url, encoded)
    }
}
