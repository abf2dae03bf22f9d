//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use linkmap::config::Config;
use linkmap::crawler::Crawler;
use linkmap::output::CollectingSink;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An HTML response with the given body markup
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, page: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(response)
        .mount(server)
        .await;
}

/// A page that must never be requested
async fn mount_untouchable(server: &MockServer, page: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html(""))
        .expect(0)
        .mount(server)
        .await;
}

fn page_url(server: &MockServer, page: &str) -> Url {
    Url::parse(&server.uri()).unwrap().join(page).unwrap()
}

async fn build_crawler(server: &MockServer, config: &Config) -> (Crawler, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let crawler = Crawler::new(page_url(server, "/"), config, sink.clone())
        .await
        .expect("Failed to create crawler");
    (crawler, sink)
}

/// Crawls from `/` and returns the emitted lines, sorted
async fn crawl_lines(server: &MockServer) -> Vec<String> {
    let (crawler, sink) = build_crawler(server, &Config::default()).await;
    crawler.crawl().await.expect("Crawl failed");
    let mut lines = sink.lines();
    lines.sort();
    lines
}

#[tokio::test]
async fn test_end_to_end_single_origin() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(&format!(
            r#"<a href="{base}/">Home</a>
               <a href="{base}/next">Next</a>
               <a href="mailto:a@b">Mail</a>"#
        )),
    )
    .await;
    mount_page(&server, "/next", html("Nothing here")).await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(r#""{base}/" -> {{"{base}/"; "{base}/next"}}"#),
            format!(r#""{base}/next" -> {{}}"#),
        ]
    );
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let server = MockServer::start().await;

    // Every page links to every other page, including itself
    let links = r#"<a href="/">0</a><a href="/a">a</a><a href="/b">b</a><a href="/c">c</a>"#;
    for page in ["/", "/a", "/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html(links))
            .expect(1)
            .mount(&server)
            .await;
    }

    let lines = crawl_lines(&server).await;

    assert_eq!(lines.len(), 4);
    let mut sources: Vec<&str> = lines.iter().map(|l| l.split(" -> ").next().unwrap()).collect();
    sources.dedup();
    assert_eq!(sources.len(), 4);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200)
            .set_body_string("User-agent: *\nDisallow: /private\nAllow: /private/ok\n"),
    )
    .await;
    mount_page(
        &server,
        "/",
        html(r#"<a href="/private/a">P</a><a href="/private/ok">OK</a><a href="/public">Pub</a>"#),
    )
    .await;
    mount_page(&server, "/public", html("")).await;
    mount_untouchable(&server, "/private/a").await;
    mount_untouchable(&server, "/private/ok").await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(
                r#""{base}/" -> {{"{base}/private/a"; "{base}/private/ok"; "{base}/public"}}"#
            ),
            format!(r#""{base}/public" -> {{}}"#),
        ]
    );
}

#[tokio::test]
async fn test_forbidden_seed_emits_nothing() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("Disallow: /a\n"),
    )
    .await;
    mount_untouchable(&server, "/a/b").await;

    let sink = Arc::new(CollectingSink::new());
    let crawler = Crawler::new(page_url(&server, "/a/b"), &Config::default(), sink.clone())
        .await
        .unwrap();
    let stats = crawler.crawl().await.unwrap();

    assert_eq!(stats.pages_dispatched, 1);
    assert!(sink.edges().is_empty());
}

#[tokio::test]
async fn test_bare_disallow_blocks_whole_origin() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("Disallow:\n"),
    )
    .await;
    mount_untouchable(&server, "/").await;

    let (crawler, sink) = build_crawler(&server, &Config::default()).await;
    let stats = crawler.crawl().await.unwrap();

    assert_eq!(crawler.policy().disallowed(), &[String::new()]);
    assert_eq!(stats.pages_dispatched, 1);
    assert!(sink.edges().is_empty());
}

#[tokio::test]
async fn test_robots_loaded_at_construction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /x\nDisallow: /y\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (crawler, _) = build_crawler(&server, &Config::default()).await;

    assert_eq!(
        crawler.policy().disallowed(),
        &["/x".to_string(), "/y".to_string()]
    );
}

#[tokio::test]
async fn test_missing_robots_fails_open() {
    let server = MockServer::start().await;
    mount_page(&server, "/robots.txt", ResponseTemplate::new(404)).await;

    let (crawler, _) = build_crawler(&server, &Config::default()).await;

    assert!(crawler.policy().is_empty());
}

#[tokio::test]
async fn test_x_robots_tag_noindex() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(r#"<a href="/hidden">Hidden</a><a href="/other">Other</a>"#),
    )
    .await;
    mount_page(&server, "/other", html(r#"<a href="/hidden">Hidden again</a>"#)).await;
    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(
            html(r#"<a href="/secret">Secret</a><a href="/hidden">Self</a>"#)
                .insert_header("X-Robots-Tag", "NoIndex"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_untouchable(&server, "/secret").await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(r#""{base}/" -> {{"{base}/hidden"; "{base}/other"}}"#),
            format!(r#""{base}/hidden" -> {{}}"#),
            format!(r#""{base}/other" -> {{"{base}/hidden"}}"#),
        ]
    );
}

#[tokio::test]
async fn test_meta_robots_noindex() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(r#"<a href="/robots-meta">R</a><a href="/bot-meta">B</a>"#),
    )
    .await;
    mount_page(
        &server,
        "/robots-meta",
        ResponseTemplate::new(200).set_body_raw(
            r#"<html><head><meta name="robots" content="noindex"></head>
               <body><a href="/secret">Secret</a></body></html>"#,
            "text/html",
        ),
    )
    .await;
    mount_page(
        &server,
        "/bot-meta",
        ResponseTemplate::new(200).set_body_raw(
            r#"<html><head><meta name="EXAMPLEBOT" content="NOINDEX"></head>
               <body><a href="/secret">Secret</a></body></html>"#,
            "text/html",
        ),
    )
    .await;
    mount_untouchable(&server, "/secret").await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(r#""{base}/" -> {{"{base}/robots-meta"; "{base}/bot-meta"}}"#),
            format!(r#""{base}/bot-meta" -> {{}}"#),
            format!(r#""{base}/robots-meta" -> {{}}"#),
        ]
    );
}

#[tokio::test]
async fn test_base_override() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/dir/page",
        ResponseTemplate::new(200).set_body_raw(
            r#"<html><head><base href="/other/"></head><body><a href="x">X</a></body></html>"#,
            "text/html",
        ),
    )
    .await;

    let (crawler, sink) = build_crawler(&server, &Config::default()).await;
    let links = crawler.fetch_page(&page_url(&server, "/dir/page")).await;

    assert_eq!(links, vec![page_url(&server, "/other/x")]);
    assert_eq!(sink.edges().len(), 1);
}

#[tokio::test]
async fn test_fragment_collapse() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(r##"<a href="/p#section">S</a><a href="/p">P</a><a href="#top">Top</a>"##),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/p"))
        .respond_with(html(""))
        .expect(1)
        .mount(&server)
        .await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(r#""{base}/" -> {{"{base}/p"; "{base}/"}}"#),
            format!(r#""{base}/p" -> {{}}"#),
        ]
    );
}

#[tokio::test]
async fn test_external_and_non_web_links_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(
            r#"<a href="https://example.org/">Ext</a>
               <a href="tel:123">Tel</a>
               <a href="chrome://settings">Chrome</a>
               <a href="ftp://files.example.org/">FTP</a>
               <a href="/rel">Rel</a>"#,
        ),
    )
    .await;
    mount_page(&server, "/rel", html("")).await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(r#""{base}/" -> {{"{base}/rel"}}"#),
            format!(r#""{base}/rel" -> {{}}"#),
        ]
    );
}

#[tokio::test]
async fn test_redirect_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html(r#"<a href="/moved">Moved</a>"#)).await;
    mount_page(
        &server,
        "/moved",
        ResponseTemplate::new(301).insert_header("Location", "/target"),
    )
    .await;
    mount_untouchable(&server, "/target").await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(r#""{base}/" -> {{"{base}/moved"}}"#),
            format!(r#""{base}/moved" -> {{}}"#),
        ]
    );
}

#[tokio::test]
async fn test_error_pages_do_not_stop_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(r#"<a href="/broken">B</a><a href="/missing">M</a><a href="/pdf">P</a><a href="/fine">F</a>"#),
    )
    .await;
    mount_page(
        &server,
        "/broken",
        ResponseTemplate::new(500).set_body_raw(r#"<a href="/never">N</a>"#, "text/html"),
    )
    .await;
    mount_page(
        &server,
        "/pdf",
        ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
    )
    .await;
    mount_page(&server, "/fine", html("")).await;
    mount_untouchable(&server, "/never").await;

    let lines = crawl_lines(&server).await;

    assert_eq!(
        lines,
        vec![
            format!(
                r#""{base}/" -> {{"{base}/broken"; "{base}/missing"; "{base}/pdf"; "{base}/fine"}}"#
            ),
            format!(r#""{base}/broken" -> {{}}"#),
            format!(r#""{base}/fine" -> {{}}"#),
            format!(r#""{base}/missing" -> {{}}"#),
            format!(r#""{base}/pdf" -> {{}}"#),
        ]
    );
}

#[tokio::test]
async fn test_request_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "MapperBot/2.0"))
        .and(header("accept", "text/html"))
        .respond_with(html(""))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.user_agent.bot_name = "MapperBot".to_string();
    config.user_agent.bot_version = "2.0".to_string();

    let (crawler, sink) = build_crawler(&server, &config).await;
    crawler.crawl().await.unwrap();

    assert_eq!(sink.lines(), vec![format!(r#""{}/" -> {{}}"#, server.uri())]);
}

#[tokio::test]
async fn test_single_worker_still_completes() {
    let server = MockServer::start().await;

    // A chain / -> /1 -> /2 -> ... -> /9, each linking back home
    mount_page(&server, "/", html(r#"<a href="/1">1</a>"#)).await;
    for n in 1..10 {
        let body = if n < 9 {
            format!(r#"<a href="/">Home</a><a href="/{}">Next</a>"#, n + 1)
        } else {
            r#"<a href="/">Home</a>"#.to_string()
        };
        mount_page(&server, &format!("/{}", n), html(&body)).await;
    }

    let mut config = Config::default();
    config.crawler.max_concurrent_fetches = 1;

    let (crawler, sink) = build_crawler(&server, &config).await;
    let stats = crawler.crawl().await.unwrap();

    assert_eq!(stats.pages_dispatched, 10);
    assert_eq!(sink.edges().len(), 10);
}
