//! Address classification
//!
//! Text counts as an address when it starts with an `http://` or `https://`
//! scheme and the host right after it resolves through DNS. The resolver is
//! only consulted for text that matches the pattern.

use regex::Regex;
use std::net::IpAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Host name lookup used by the classifier
#[async_trait::async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `host` to its addresses
    async fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system (getaddrinfo through tokio)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait::async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0u16)).await?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// Lookup failure surfaced when strict DNS handling is enabled
#[derive(Debug, thiserror::Error)]
#[error("could not resolve host {host}: {reason}")]
pub struct DnsError {
    pub host: String,
    pub reason: String,
}

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^http(s)?://(?P<host>[\w.-]+)").expect("address pattern is valid")
    })
}

/// Extract the host from text that begins with an http(s) scheme.
pub fn extract_host(text: &str) -> Option<&str> {
    address_pattern()
        .captures(text)
        .and_then(|caps| caps.name("host"))
        .map(|host| host.as_str())
}

pub struct AddressClassifier {
    resolver: Arc<dyn HostResolver>,
    timeout: Duration,
    strict_dns: bool,
}

impl AddressClassifier {
    pub fn new(resolver: Arc<dyn HostResolver>, timeout: Duration) -> Self {
        Self {
            resolver,
            timeout,
            strict_dns: false,
        }
    }

    /// Report lookup failures as errors instead of "not an address"
    pub fn with_strict_dns(mut self, strict: bool) -> Self {
        self.strict_dns = strict;
        self
    }

    /// Decide whether `text` is a live http(s) address.
    ///
    /// With the default (non-strict) handling an unresolvable host yields
    /// `Ok(false)`, so a typo'd host and a transient outage both fall back to
    /// a search. Only strict mode returns `Err`.
    pub async fn classify(&self, text: &str) -> Result<bool, DnsError> {
        let Some(host) = extract_host(text) else {
            tracing::debug!("input does not start with an http(s) address");
            return Ok(false);
        };

        let failure = match tokio::time::timeout(self.timeout, self.resolver.lookup(host)).await {
            Ok(Ok(addrs)) if !addrs.is_empty() => {
                tracing::debug!(host = %host, addrs = addrs.len(), "host resolved");
                return Ok(true);
            }
            Ok(Ok(_)) => "no addresses returned".to_string(),
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!("lookup timed out after {}ms", self.timeout.as_millis()),
        };

        if self.strict_dns {
            return Err(DnsError {
                host: host.to_string(),
                reason: failure,
            });
        }

        tracing::debug!(host = %host, reason = %failure, "host did not resolve, treating input as text");
        Ok(false)
    }
}
