//! Common test doubles for resolution tests
#![allow(dead_code)]

use browser_ctl::address::HostResolver;
use browser_ctl::config::Config;
use browser_ctl::desktop::{BrowserDispatcher, TextSource};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// DNS stub: only hosts registered with `with_host` resolve
#[derive(Default)]
pub struct StubResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
    calls: AtomicUsize,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.hosts
            .insert(host.to_string(), vec![IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))]);
        self
    }

    /// Number of lookups performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HostResolver for StubResolver {
    async fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hosts.get(host).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("unknown host {host}"))
        })
    }
}

/// Clipboard stand-in that counts reads
pub struct StubText {
    text: String,
    reads: AtomicUsize,
}

impl StubText {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TextSource for StubText {
    fn read_text(&self) -> String {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.text.clone()
    }
}

/// Browser stand-in that records every batch of opened tabs
#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<Vec<String>>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<Vec<String>> {
        self.opened.lock().unwrap().clone()
    }
}

impl BrowserDispatcher for RecordingBrowser {
    fn open_tabs(&self, urls: &[String]) {
        self.opened.lock().unwrap().push(urls.to_vec());
    }
}

/// Default configuration with a fixed browser name and, when given, the
/// opensearch endpoint pointed at a local mock server
pub fn test_config(mock_uri: Option<&str>) -> Config {
    let mut config = Config::default();
    config.browser = Some("firefox".to_string());
    config.network.timeout_secs = 2;
    if let Some(uri) = mock_uri {
        config.wiki.api_url = format!("{uri}/{{lang}}/w/api.php");
    }
    config
}

/// Split the raw `param` value of `url` on `+` and percent-decode each token
pub fn decoded_tokens(url: &str, param: &str) -> Vec<String> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
    let raw = query
        .split('&')
        .find_map(|pair| pair.strip_prefix(&format!("{param}=")))
        .unwrap_or_else(|| panic!("no {param} parameter in {url}"));

    raw.split('+')
        .filter(|t| !t.is_empty())
        .map(|t| urlencoding::decode(t).unwrap().into_owned())
        .collect()
}
