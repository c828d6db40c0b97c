//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, writing into temporary directories.

use markdown_mirror::config::Config;
use markdown_mirror::crawler::run_crawl;
use markdown_mirror::{CrawlOutcome, CrawlPhase, LinkOutcome};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timings
fn create_test_config(start_url: &str, selector: &str, output_dir: &Path) -> Config {
    let mut config = Config::new(start_url, selector);
    config.crawl.timeout = 2.0;
    config.crawl.min_delay = 0.01; // Backoff floor still applies
    config.crawl.max_delay = 0.02;
    config.crawl.max_retry_duration = 0.5;
    config.output.output_dir = output_dir.to_path_buf();
    config
}

/// A documentation page with boilerplate around a `<main>` block
fn doc_page(title: &str, paragraph: &str) -> String {
    format!(
        r#"<html><head><title>{title}</title><style>p {{ color: red; }}</style></head>
        <body>
            <header>Site Header</header>
            <nav>Site Menu</nav>
            <main><h1>{title}</h1><p>{paragraph}</p></main>
            <footer>Site Footer</footer>
        </body></html>"#
    )
}

/// A start page whose link source is `<div id="nav">`
fn index_page(anchors: &str) -> String {
    format!(
        r#"<html><body><div id="nav">{anchors}</div><main><p>Welcome</p></main></body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).expect("file should exist")
}

#[tokio::test]
async fn test_scenario_a_scope_filtering_and_output() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(
            r#"<a href="/docs/a.html">A</a>
               <a href="/docs/b.html#sec">B</a>
               <a href="../other/c.html">C</a>
               <a href="https://other.com/x">X</a>"#,
        ),
    )
    .await;
    mount_html(&mock_server, "/docs/a.html", doc_page("Page A", "Alpha text")).await;
    mount_html(&mock_server, "/docs/b.html", doc_page("Page B", "Beta text")).await;

    // Out-of-scope pages must never be requested
    Mock::given(method("GET"))
        .and(path("/other/c.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    config.crawl.main_content_selector = Some("main".to_string());

    let outcome = run_crawl(config).await.expect("crawl should run");
    assert!(outcome.is_completed());

    let summary = outcome.summary();
    assert_eq!(summary.scope.as_deref(), Some(format!("{}/docs/", base).as_str()));
    assert_eq!(summary.links_found, 2);
    assert_eq!(summary.records[0].url, format!("{}/docs/a.html", base));
    assert_eq!(summary.records[1].url, format!("{}/docs/b.html", base));
    assert_eq!(summary.saved_count(), 2);
    assert_eq!(summary.phase, CrawlPhase::Done);

    let a = read(out.join("docs").join("a.md"));
    assert!(a.contains("Page A"));
    assert!(a.contains("Alpha text"));
    assert!(!a.contains("Site Menu"));
    assert!(!a.contains("Site Footer"));
    assert!(!a.contains("Site Header"));

    let b = read(out.join("docs").join("b.md"));
    assert!(b.contains("Beta text"));
}

#[tokio::test]
async fn test_scenario_b_failed_link_is_skipped() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="broken.html">Broken</a><a href="ok.html">Ok</a>"#),
    )
    .await;

    // Always failing; retried until the budget runs out
    Mock::given(method("GET"))
        .and(path("/docs/broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2..)
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/docs/ok.html", doc_page("Ok", "Still written")).await;

    let config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    let outcome = run_crawl(config).await.expect("crawl should run");

    assert!(outcome.is_completed());
    let summary = outcome.summary();
    assert_eq!(summary.records.len(), 2);
    assert_eq!(summary.records[0].outcome, LinkOutcome::FetchFailed);
    assert!(summary.records[1].outcome.is_success());

    assert!(!out.join("docs").join("broken.md").exists());
    assert!(read(out.join("docs").join("ok.md")).contains("Still written"));
}

#[tokio::test]
async fn test_scenario_c_missing_link_source() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="a.html">A</a>"#),
    )
    .await;

    let config = create_test_config(&format!("{}/docs/index.html", base), "sidebar", &out);
    let outcome = run_crawl(config).await.expect("crawl should run");

    assert!(matches!(outcome, CrawlOutcome::NoLinkSource(_)));
    assert_eq!(outcome.summary().phase, CrawlPhase::Empty);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_link_source_found_by_class() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        r#"<html><body><ul class="toc sidebar-links"><li><a href="a.html">A</a></li></ul></body></html>"#
            .to_string(),
    )
    .await;
    mount_html(&mock_server, "/docs/a.html", doc_page("A", "Found via class")).await;

    let config = create_test_config(&format!("{}/docs/index.html", base), "toc", &out);
    let outcome = run_crawl(config).await.expect("crawl should run");

    assert!(outcome.is_completed());
    assert!(read(out.join("docs").join("a.md")).contains("Found via class"));
}

#[tokio::test]
async fn test_no_in_scope_links() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="/blog/post.html">Blog</a><a href="https://other.com/">Other</a>"#),
    )
    .await;

    let config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    let outcome = run_crawl(config).await.expect("crawl should run");

    assert!(matches!(outcome, CrawlOutcome::NoInScopeLinks(_)));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_scenario_d_selector_falls_back_to_heuristic() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    let long_text = "Heuristic content sentence. ".repeat(10);
    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="long.html">Long</a><a href="short.html">Short</a>"#),
    )
    .await;
    mount_html(
        &mock_server,
        "/docs/long.html",
        format!(
            r#"<html><body><div class="sidebar">{}</div><div id="tiny">Tiny block</div><article>{}</article></body></html>"#,
            "Sidebar ".repeat(50),
            long_text
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/docs/short.html",
        r#"<html><body><div>Only a short body</div><p>and a paragraph</p></body></html>"#
            .to_string(),
    )
    .await;

    let mut config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    config.crawl.main_content_selector = Some("#content".to_string());

    let outcome = run_crawl(config).await.expect("crawl should run");
    assert_eq!(outcome.summary().saved_count(), 2);

    let long = read(out.join("docs").join("long.md"));
    assert!(long.contains("Heuristic content sentence."));
    assert!(!long.contains("Tiny block"));
    assert!(!long.contains("Sidebar"));

    let short = read(out.join("docs").join("short.md"));
    assert!(short.contains("Only a short body"));
    assert!(short.contains("and a paragraph"));
}

#[tokio::test]
async fn test_scenario_e_colliding_stems() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="one.html">Intro</a><a href="two.html">Intro!</a>"#),
    )
    .await;
    mount_html(&mock_server, "/docs/one.html", doc_page("One", "First intro")).await;
    mount_html(&mock_server, "/docs/two.html", doc_page("Two", "Second intro")).await;

    let config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    let outcome = run_crawl(config).await.expect("crawl should run");
    assert_eq!(outcome.summary().saved_count(), 2);

    assert!(read(out.join("docs").join("intro.md")).contains("First intro"));
    assert!(read(out.join("docs").join("intro_1.md")).contains("Second intro"));
}

#[tokio::test]
async fn test_rerun_keeps_previous_output() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="a.html">A</a>"#),
    )
    .await;
    mount_html(&mock_server, "/docs/a.html", doc_page("A", "Same page")).await;

    let start = format!("{}/docs/index.html", base);
    run_crawl(create_test_config(&start, "nav", &out)).await.unwrap();
    run_crawl(create_test_config(&start, "nav", &out)).await.unwrap();

    assert!(out.join("docs").join("a.md").exists());
    assert!(out.join("docs").join("a_1.md").exists());
    assert!(!out.join("docs").join("a_2.md").exists());
}

#[tokio::test]
async fn test_subdirectories_are_mirrored() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(
            r#"<a href="guide/setup.html">Setup</a>
               <a href="api/v2/client.html">Client</a>
               <a href="intro.html"></a>"#,
        ),
    )
    .await;
    mount_html(&mock_server, "/docs/guide/setup.html", doc_page("Setup", "Install it")).await;
    mount_html(&mock_server, "/docs/api/v2/client.html", doc_page("Client", "Call it")).await;
    mount_html(&mock_server, "/docs/intro.html", doc_page("Intro", "Read it")).await;

    let config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    let outcome = run_crawl(config).await.expect("crawl should run");
    assert_eq!(outcome.summary().saved_count(), 3);

    assert!(read(out.join("docs/guide/setup.md")).contains("Install it"));
    assert!(read(out.join("docs/api/v2/client.md")).contains("Call it"));
    // Empty anchor text falls back to the URL's last segment
    assert!(read(out.join("docs/intro_html.md")).contains("Read it"));
}

#[tokio::test]
async fn test_start_page_failure() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    Mock::given(method("GET"))
        .and(path("/docs/index.html"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2..)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    let outcome = run_crawl(config).await.expect("crawl should run");

    assert!(matches!(outcome, CrawlOutcome::StartPageFailed(_)));
    assert_eq!(outcome.summary().phase, CrawlPhase::Failed);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_summary_report_written() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let report = tmp.path().join("reports").join("run.md");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="a.html">A</a><a href="gone.html">Gone</a>"#),
    )
    .await;
    mount_html(&mock_server, "/docs/a.html", doc_page("A", "Report me")).await;
    Mock::given(method("GET"))
        .and(path("/docs/gone.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    config.output.summary_path = Some(report.clone());

    let outcome = run_crawl(config).await.expect("crawl should run");
    assert_eq!(outcome.summary().saved_count(), 1);
    assert_eq!(outcome.summary().skipped_count(), 1);

    let written = read(&report);
    assert!(written.contains("# Markdown Mirror Crawl Summary"));
    assert!(written.contains("## Saved Files"));
    assert!(written.contains(&format!("| {}/docs/gone.html | fetch_failed |", base)));
}

#[tokio::test]
async fn test_unwritable_report_does_not_fail_run() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    mount_html(
        &mock_server,
        "/docs/index.html",
        index_page(r#"<a href="a.html">A</a>"#),
    )
    .await;
    mount_html(&mock_server, "/docs/a.html", doc_page("A", "Saved anyway")).await;

    // A directory cannot be written as a report file
    let mut config = create_test_config(&format!("{}/docs/index.html", base), "nav", &out);
    config.output.summary_path = Some(tmp.path().to_path_buf());

    let outcome = run_crawl(config).await.expect("report failure is only logged");

    assert!(outcome.is_completed());
    assert_eq!(outcome.summary().saved_count(), 1);
    assert!(read(out.join("docs").join("a.md")).contains("Saved anyway"));
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let mut config = create_test_config("https://ex.com/docs/index.html", "nav", tmp.path());
    config.crawl.min_delay = 3.0;
    config.crawl.max_delay = 1.0;

    assert!(run_crawl(config).await.is_err());
}
