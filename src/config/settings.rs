use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Browser command used to open tabs and named in search attribution.
    /// Falls back to `$BROWSER`, then to the system default handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub translate: TranslateConfig,

    #[serde(default)]
    pub wiki: WikiConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generic web search engine, also the cascade fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_engine_url")]
    pub engine_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine_url: default_engine_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateConfig {
    #[serde(default = "default_translate_url")]
    pub url: String,

    /// Source language code
    #[serde(default = "default_source_lang")]
    pub source: String,

    /// Target language code
    #[serde(default = "default_target_lang")]
    pub target: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            url: default_translate_url(),
            source: default_source_lang(),
            target: default_target_lang(),
        }
    }
}

/// Encyclopedia settings. `{lang}` in the URLs is replaced by the edition code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Edition used by single-language lookups
    #[serde(default = "default_wiki_lang")]
    pub lang: String,

    #[serde(default = "default_page_url")]
    pub page_url: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Editions tried, in order, by the cascading lookup
    #[serde(default = "default_cascade")]
    pub cascade: Vec<String>,

    /// Maximum pages opened by the cascading lookup
    #[serde(default = "default_count")]
    pub count: u32,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            lang: default_wiki_lang(),
            page_url: default_page_url(),
            api_url: default_api_url(),
            cascade: default_cascade(),
            count: default_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Upper bound for each DNS lookup and provider request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Report DNS failures during address detection instead of treating
    /// the input as search text
    #[serde(default)]
    pub strict_dns: bool,
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            strict_dns: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Log file or directory; defaults next to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub rotation: LogRotation,

    /// Rotated files to keep (daily rotation only)
    #[serde(default = "default_log_keep")]
    pub keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            path: None,
            rotation: LogRotation::default(),
            keep: default_log_keep(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Daily,
}

fn default_engine_url() -> String {
    "https://www.google.com/search".to_string()
}

fn default_translate_url() -> String {
    "https://translate.google.it/".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "it".to_string()
}

fn default_wiki_lang() -> String {
    "en".to_string()
}

fn default_page_url() -> String {
    "https://{lang}.wikipedia.org/w/index.php".to_string()
}

fn default_api_url() -> String {
    "https://{lang}.wikipedia.org/w/api.php".to_string()
}

fn default_cascade() -> Vec<String> {
    vec!["it".to_string(), "en".to_string()]
}

fn default_count() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_keep() -> usize {
    7
}
