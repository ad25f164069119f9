//! Integration tests for intent resolution and dispatch

mod common;

use browser_ctl::dispatch::{Intent, ResolveError, ResolvedDestination, Resolver, Shortcut};
use browser_ctl::search::SearchError;
use common::{decoded_tokens, test_config, RecordingBrowser, StubResolver, StubText};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search(text: Option<&str>, site: Option<&str>) -> Intent {
    Intent::Search {
        text: text.map(str::to_string),
        site: site.map(str::to_string),
    }
}

fn resolver(dns: &Arc<StubResolver>, text: &Arc<StubText>, mock_uri: Option<&str>) -> Resolver {
    Resolver::new(test_config(mock_uri), dns.clone(), text.clone()).unwrap()
}

#[tokio::test]
async fn test_address_passes_through_verbatim() {
    let dns = Arc::new(StubResolver::new().with_host("example.com"));
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);

    let destination = resolver
        .resolve(search(Some("https://example.com/page"), None))
        .await
        .unwrap();

    assert_eq!(
        destination,
        ResolvedDestination::Direct("https://example.com/page".to_string())
    );
    assert_eq!(dns.calls(), 1);
    assert_eq!(text.reads(), 0);
}

#[tokio::test]
async fn test_text_becomes_web_search() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);

    let destination = resolver
        .resolve(search(Some("weather today"), None))
        .await
        .unwrap();

    let ResolvedDestination::Constructed(url) = destination else {
        panic!("expected a constructed url");
    };
    assert!(url.starts_with("https://www.google.com/search?"));
    assert_eq!(decoded_tokens(&url, "q"), vec!["weather", "today"]);
    assert_eq!(decoded_tokens(&url, "client"), vec!["firefox"]);
    assert_eq!(dns.calls(), 0);
}

#[tokio::test]
async fn test_site_keyword_comes_first() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);

    let destination = resolver
        .resolve(search(Some("tokio select"), Some("docs.rs")))
        .await
        .unwrap();

    assert_eq!(
        destination,
        ResolvedDestination::Constructed(
            "https://www.google.com/search?client=firefox&q=docs.rs+tokio+select".to_string()
        )
    );
}

#[tokio::test]
async fn test_unresolvable_address_is_searched() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);

    let destination = resolver
        .resolve(search(Some("https://no-such-host.invalid/x"), None))
        .await
        .unwrap();

    let ResolvedDestination::Constructed(url) = destination else {
        panic!("expected a constructed url");
    };
    assert_eq!(
        decoded_tokens(&url, "q"),
        vec!["https://no-such-host.invalid/x"]
    );
    assert_eq!(dns.calls(), 1);
}

#[tokio::test]
async fn test_strict_dns_error_reaches_caller() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let mut config = test_config(None);
    config.network.strict_dns = true;
    let resolver = Resolver::new(config, dns.clone(), text.clone()).unwrap();

    let err = resolver
        .resolve(search(Some("https://no-such-host.invalid/x"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::Dns(_)));
}

#[tokio::test]
async fn test_clipboard_read_once_when_text_missing() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::new("rust lifetimes\n"));
    let resolver = resolver(&dns, &text, None);

    let destination = resolver.resolve(search(None, None)).await.unwrap();

    assert_eq!(text.reads(), 1);
    assert_eq!(
        decoded_tokens(&destination.urls()[0], "q"),
        vec!["rust", "lifetimes"]
    );
}

#[tokio::test]
async fn test_blank_argument_uses_clipboard() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::new("borrow checker"));
    let resolver = resolver(&dns, &text, None);

    resolver.resolve(search(Some("   "), None)).await.unwrap();
    assert_eq!(text.reads(), 1);
}

#[tokio::test]
async fn test_clipboard_address_is_trimmed_and_opened() {
    let dns = Arc::new(StubResolver::new().with_host("docs.rs"));
    let text = Arc::new(StubText::new("  https://docs.rs/tokio\n"));
    let resolver = resolver(&dns, &text, None);

    let destination = resolver.resolve(search(None, None)).await.unwrap();
    assert_eq!(
        destination,
        ResolvedDestination::Direct("https://docs.rs/tokio".to_string())
    );
}

#[tokio::test]
async fn test_missing_input_fails_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["", [], [], []])))
        .expect(0)
        .mount(&server)
        .await;

    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::new(" \n"));
    let resolver = resolver(&dns, &text, Some(&server.uri()));

    for intent in [
        search(None, None),
        Intent::Translate {
            text: None,
            source: "en".to_string(),
            target: "it".to_string(),
        },
        Intent::Wiki {
            text: None,
            lang: "en".to_string(),
        },
        Intent::WikiCascade { text: None, count: 1 },
    ] {
        let err = resolver.resolve(intent).await.unwrap_err();
        assert!(matches!(err, ResolveError::NoInput), "got {err:?}");
    }

    assert_eq!(dns.calls(), 0);
    assert_eq!(text.reads(), 4);
}

#[tokio::test]
async fn test_translate_never_classifies() {
    let dns = Arc::new(StubResolver::new().with_host("example.com"));
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);

    let destination = resolver
        .resolve(Intent::Translate {
            text: Some("https://example.com".to_string()),
            source: "en".to_string(),
            target: "it".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        destination,
        ResolvedDestination::Constructed(
            "https://translate.google.it/?sl=en&tl=it&text=https%3A%2F%2Fexample.com".to_string()
        )
    );
    assert_eq!(dns.calls(), 0);
}

#[tokio::test]
async fn test_translate_multi_word() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);

    let destination = resolver
        .resolve(Intent::Translate {
            text: Some("buona sera".to_string()),
            source: "it".to_string(),
            target: "en".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        destination.urls(),
        vec!["https://translate.google.it/?sl=it&tl=en&text=buona+sera"]
    );
}

#[tokio::test]
async fn test_single_language_wiki() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);

    let destination = resolver
        .resolve(Intent::Wiki {
            text: Some("Alan Turing".to_string()),
            lang: "de".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        destination,
        ResolvedDestination::Constructed(
            "https://de.wikipedia.org/w/index.php?search=Alan+Turing".to_string()
        )
    );
}

#[tokio::test]
async fn test_cascade_exhaustion_falls_back_to_search() {
    let server = MockServer::start().await;
    for lang in ["it", "en"] {
        Mock::given(method("GET"))
            .and(path(format!("/{lang}/w/api.php")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!(["Xyzzy plugh", [], [], []])),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, Some(&server.uri()));
    let browser = RecordingBrowser::new();

    let destination = resolver
        .dispatch(
            Intent::WikiCascade {
                text: Some("Xyzzy plugh".to_string()),
                count: 1,
            },
            &browser,
        )
        .await
        .unwrap();

    assert_eq!(
        destination,
        ResolvedDestination::Fallback("https://www.google.com/search?q=Xyzzy+plugh".to_string())
    );
    assert_eq!(
        browser.opened(),
        vec![vec!["https://www.google.com/search?q=Xyzzy+plugh".to_string()]]
    );
}

#[tokio::test]
async fn test_cascade_opens_every_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/it/w/api.php"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "Roma",
            ["Roma", "Roma (disambigua)"],
            ["", ""],
            [
                "https://it.wikipedia.org/wiki/Roma",
                "https://it.wikipedia.org/wiki/Roma_(disambigua)"
            ]
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Roma", [], [], []])))
        .expect(0)
        .mount(&server)
        .await;

    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::new("Roma"));
    let resolver = resolver(&dns, &text, Some(&server.uri()));
    let browser = RecordingBrowser::new();

    let destination = resolver
        .dispatch(Intent::WikiCascade { text: None, count: 2 }, &browser)
        .await
        .unwrap();

    let expected = vec![
        "https://it.wikipedia.org/wiki/Roma".to_string(),
        "https://it.wikipedia.org/wiki/Roma_(disambigua)".to_string(),
    ];
    assert_eq!(
        destination,
        ResolvedDestination::Candidates {
            provider: "wikipedia:it".to_string(),
            urls: expected.clone(),
        }
    );
    assert_eq!(browser.opened(), vec![expected]);
    assert_eq!(text.reads(), 1);
}

#[tokio::test]
async fn test_cascade_provider_error_opens_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/it/w/api.php"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["q", [], [], ["x"]])))
        .expect(0)
        .mount(&server)
        .await;

    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, Some(&server.uri()));
    let browser = RecordingBrowser::new();

    let err = resolver
        .dispatch(
            Intent::WikiCascade {
                text: Some("q".to_string()),
                count: 1,
            },
            &browser,
        )
        .await
        .unwrap_err();

    match err {
        ResolveError::Search(SearchError::Status { provider, status, .. }) => {
            assert_eq!(provider, "wikipedia:it");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("expected provider status error, got {other:?}"),
    }
    assert!(browser.opened().is_empty());
}

#[tokio::test]
async fn test_providers_follow_configured_order() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let mut config = test_config(None);
    config.wiki.cascade = vec!["fr".to_string(), "de".to_string(), "en".to_string()];
    let resolver = Resolver::new(config, dns, text).unwrap();

    let names: Vec<&str> = resolver.providers().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["wikipedia:fr", "wikipedia:de", "wikipedia:en"]);
}

#[tokio::test]
async fn test_shortcut_dispatch() {
    let dns = Arc::new(StubResolver::new());
    let text = Arc::new(StubText::empty());
    let resolver = resolver(&dns, &text, None);
    let browser = RecordingBrowser::new();

    resolver
        .dispatch(Intent::Shortcut(Shortcut::Mail), &browser)
        .await
        .unwrap();

    assert_eq!(
        browser.opened(),
        vec![vec!["https://mail.google.com/".to_string()]]
    );
    assert_eq!(text.reads(), 0);
    assert_eq!(dns.calls(), 0);
}
