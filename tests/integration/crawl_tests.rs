//! End-to-end traversal tests against a mock site

use depth_spider::config::{
    Config, CrawlerConfig, FetchConfig, FilterConfig, MatchMode,
};
use depth_spider::crawler::CrawlScheduler;
use depth_spider::storage::{output_file_name, FileType};
use depth_spider::SpiderError;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
pub fn create_test_config(root: &str, pen_depth: u32, save_dir: &Path, deny: &[&str]) -> Config {
    Config {
        crawler: CrawlerConfig {
            root_site: root.to_string(),
            pen_depth,
            raw_files_save_path: save_dir.to_path_buf(),
        },
        fetch: FetchConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
            timeout_secs: 5,
            allow_redirects: false,
            user_agent: "TestSpider/1.0".to_string(),
        },
        filter: FilterConfig {
            deny_words: deny.iter().map(|w| w.to_string()).collect(),
            match_mode: MatchMode::AllWords,
        },
        indexing: None,
    }
}

/// Builds an HTML page whose anchors point at `hrefs`
pub fn page_with_links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

/// Mounts a 200 HTML page at `route`, expected to be requested `times` times
pub async fn mount_page(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

fn set(links: &[String]) -> BTreeSet<String> {
    links.iter().cloned().collect()
}

#[tokio::test]
async fn test_literal_filter_scenario() {
    let server = MockServer::start().await;
    let root = server.uri();
    let login = format!("{}/login", root);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<a href=\"/about\">About</a><a href=\"{}\">Login</a><a>No target</a>",
            login
        )))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 1, dir.path(), &["login"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    // The only deny-word is present in the login link, so every deny-word is
    // present and it is dropped; "/about" lacks it and survives verbatim.
    assert_eq!(report.frontier(0), Some(&set(&[root.clone()])));
    assert_eq!(report.pending, set(&["/about".to_string()]));
    assert!(!report.pending.contains(&login));
}

#[tokio::test]
async fn test_relative_child_aborts_next_depth() {
    let server = MockServer::start().await;
    let root = server.uri();

    mount_page(&server, "/", page_with_links(&["/about"]), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 2, dir.path(), &["login"]);

    let result = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await;

    match result {
        Err(SpiderError::Transport { url, .. }) => assert_eq!(url, "/about"),
        other => panic!("expected transport failure, got {:?}", other.map(|r| r.visited)),
    }
}

#[tokio::test]
async fn test_non_success_root_ends_run_cleanly() {
    let server = MockServer::start().await;
    let root = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(page_with_links(&["/never"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 3, dir.path(), &["nomatch"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.frontiers.len(), 1);
    assert!(report.pending.is_empty());
    assert_eq!(report.visited, vec![root]);
    assert_eq!(report.skipped_status, 1);
    assert_eq!(report.persisted(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_pen_depth_one_fetches_only_root() {
    let server = MockServer::start().await;
    let root = server.uri();
    let child = format!("{}/child", root);

    mount_page(&server, "/", page_with_links(&[&child]), 1).await;
    mount_page(&server, "/child", page_with_links(&[]), 0).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 1, dir.path(), &["nomatch"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.fetches(), 1);
    assert_eq!(report.pending, set(&[child]));
}

#[tokio::test]
async fn test_shared_child_fetched_once() {
    let server = MockServer::start().await;
    let root = server.uri();
    let a = format!("{}/a", root);
    let b = format!("{}/b", root);
    let shared = format!("{}/shared", root);

    mount_page(&server, "/", page_with_links(&[&a, &b]), 1).await;
    mount_page(&server, "/a", page_with_links(&[&shared]), 1).await;
    mount_page(&server, "/b", page_with_links(&[&shared, &shared]), 1).await;
    mount_page(&server, "/shared", page_with_links(&[]), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 3, dir.path(), &["nomatch"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.frontier(1), Some(&set(&[a.clone(), b.clone()])));
    assert_eq!(report.frontier(2), Some(&set(&[shared.clone()])));
    assert_eq!(report.visited, vec![root, a, b, shared]);
    assert_eq!(report.fetches(), 4);
}

#[tokio::test]
async fn test_link_seen_earlier_is_never_refetched() {
    let server = MockServer::start().await;
    let root = server.uri();
    let a = format!("{}/a", root);
    let b = format!("{}/b", root);

    mount_page(&server, "/", page_with_links(&[&a]), 1).await;
    // Back-link to the root reappears at depth 2 and is skipped there
    mount_page(&server, "/a", page_with_links(&[&root, &b]), 1).await;
    mount_page(&server, "/b", page_with_links(&[&a]), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 4, dir.path(), &["nomatch"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.frontier(2), Some(&set(&[root.clone(), b.clone()])));
    assert_eq!(report.frontier(3), Some(&set(&[a.clone()])));
    assert_eq!(report.unique_links, 3);
    assert_eq!(report.fetches(), 3);
}

#[tokio::test]
async fn test_each_frontier_comes_from_previous_children() {
    let server = MockServer::start().await;
    let root = server.uri();
    let kept = format!("{}/kept", root);
    let dropped = format!("{}/login/pay", root);

    mount_page(&server, "/", page_with_links(&[&kept, &dropped, "/"]), 1).await;
    mount_page(&server, "/kept", page_with_links(&[]), 1).await;
    mount_page(&server, "/login/pay", page_with_links(&[]), 0).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 2, dir.path(), &["login", "pay"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.frontier(1), Some(&set(&[kept])));
}

#[tokio::test]
async fn test_content_is_persisted_by_kind() {
    let server = MockServer::start().await;
    let root = server.uri();
    let pdf = format!("{}/report.pdf", root);
    let sheet = format!("{}/data.xlsx", root);

    mount_page(&server, "/", page_with_links(&[&pdf, &sheet]), 1).await;
    let pdf_bytes: Vec<u8> = vec![0x25, 0x50, 0x44, 0x46, 0x2d, 0xff];
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(pdf_bytes.clone())
                .insert_header("content-type", "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/data.xlsx", String::new(), 0).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 2, dir.path(), &["nomatch"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.persisted_text, 1);
    assert_eq!(report.persisted_pdf, 1);
    assert_eq!(report.skipped_spreadsheet, 1);
    assert!(report.visited.contains(&sheet));

    let root_file = dir
        .path()
        .join(output_file_name(&root, &root, FileType::Text));
    let text = std::fs::read_to_string(root_file).unwrap();
    assert!(text.starts_with(&format!("root_site:{}\nweb_url:{}\n<html>", root, root)));

    let pdf_file = dir.path().join(output_file_name(&root, &pdf, FileType::Pdf));
    assert_eq!(std::fs::read(pdf_file).unwrap(), pdf_bytes);

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn test_pdf_content_type_overrides_missing_extension() {
    let server = MockServer::start().await;
    let root = server.uri();
    let download = format!("{}/download", root);

    mount_page(&server, "/", page_with_links(&[&download]), 1).await;
    let pdf_bytes: Vec<u8> = b"%PDF-1.4\n\xe2\xe3".to_vec();
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(pdf_bytes.clone())
                .insert_header("content-type", "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 2, dir.path(), &["nomatch"]);

    let report = CrawlScheduler::with_index(&config, None)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.persisted_text, 1);
    assert_eq!(report.persisted_pdf, 1);

    let pdf_file = dir
        .path()
        .join(output_file_name(&root, &download, FileType::Pdf));
    assert_eq!(std::fs::read(pdf_file).unwrap(), pdf_bytes);

    let text_file = dir
        .path()
        .join(output_file_name(&root, &download, FileType::Text));
    assert!(!text_file.exists());
}

#[tokio::test]
async fn test_rerun_overwrites_files() {
    let server = MockServer::start().await;
    let root = server.uri();

    mount_page(&server, "/", page_with_links(&[]), 2).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&root, 1, dir.path(), &["nomatch"]);

    for _ in 0..2 {
        CrawlScheduler::with_index(&config, None)
            .unwrap()
            .run()
            .await
            .unwrap();
    }

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
