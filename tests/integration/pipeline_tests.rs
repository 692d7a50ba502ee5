//! Integration tests for the audit pipeline
//!
//! These tests use wiremock to stand in for the linked sites and a
//! tempfile SQLite database for the content store, and drive full runs
//! through the run controller.

use link_audit::classify::{classify, is_good};
use link_audit::config::{Config, OutputConfig, ProbeConfig};
use link_audit::extract::ExtractBounds;
use link_audit::probe::BatchProber;
use link_audit::rewrite::{apply_rewrites, convert, plan_rewrites};
use link_audit::store::{ContentStore, SqliteStore};
use link_audit::{
    LinkRecord, LinkSource, ProbeOutcome, RowMetadata, RunController, RunMode, RunOptions, Scheme,
};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at `dir`
fn create_test_config(dir: &Path, batch_size: usize) -> Config {
    Config {
        probe: ProbeConfig {
            batch_size,
            timeout_secs: 10,
            ..Default::default()
        },
        output: OutputConfig {
            database_path: dir.join("content.db").to_string_lossy().into_owned(),
            results_dir: dir.join("results").to_string_lossy().into_owned(),
        },
    }
}

/// Ids of the rows created by `seed_course`
struct Seeded {
    chapter: i64,
    section: i64,
    url: i64,
}

/// Seeds one course whose chapter, section summary and external URL all link to `base`
fn seed_course(store: &mut SqliteStore, base: &str) -> Seeded {
    let course = store.add_course("Physics 101", "PHY101").unwrap();
    let section = store
        .add_section(
            course,
            Some("Week 1"),
            &format!(r#"<p>Slides: <a href="{}/ok">here</a></p>"#, base),
        )
        .unwrap();
    let book = store.add_book(course, Some(section), "Notes").unwrap();
    let chapter = store
        .add_chapter(
            book,
            "Intro",
            &format!("see {}/ok for details, not {}/missing.", base, base),
        )
        .unwrap();
    let url = store
        .add_external_url(course, Some(section), "Simulator", &format!("{}/sim", base))
        .unwrap();

    Seeded {
        chapter,
        section,
        url,
    }
}

async fn mount_site(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/sim"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/ok"))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

fn read_report(config: &Config, name: &str) -> String {
    std::fs::read_to_string(Path::new(&config.output.results_dir).join(name))
        .expect("report should exist")
}

#[tokio::test]
async fn test_check_run_writes_reports() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 380);

    let mut store = SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
    seed_course(&mut store, &base_url);

    let mut controller = RunController::new(config.clone(), store);
    let report = controller.execute(&RunOptions::default()).await.unwrap();

    // Chapter: /ok and /missing; summary: /ok; external: /sim
    assert_eq!(report.link_count, 4);
    assert_eq!(report.good_http, 3);
    assert_eq!(report.broken_http, 1);
    assert_eq!(report.good_https, 0);
    assert_eq!(report.updated, None);

    let good = read_report(&config, "good_http_links.txt");
    let broken = read_report(&config, "broken_http_links.txt");
    assert_eq!(good.lines().count(), 3);
    assert_eq!(broken.lines().count(), 1);
    assert!(broken.contains(&format!("{}/missing,404,", base_url)));
    assert!(broken.starts_with("Physics 101,PHY101,"));
    assert!(good.contains(&format!("Simulator,{}/sim,200,", base_url)));

    // No HTTPS artifacts without conversion
    assert!(!Path::new(&config.output.results_dir)
        .join("good_https_links.txt")
        .exists());
}

#[tokio::test]
async fn test_unreachable_host_is_broken_not_fatal() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 380);

    let mut store = SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
    // Port 1 on loopback refuses connections
    seed_course(&mut store, "http://127.0.0.1:1");

    let mut controller = RunController::new(config.clone(), store);
    let report = controller.execute(&RunOptions::default()).await.unwrap();

    assert_eq!(report.good_http, 0);
    assert_eq!(report.broken_http, 4);

    let broken = read_report(&config, "broken_http_links.txt");
    for line in broken.lines() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields[6], "0", "transport failures carry status 0: {}", line);
        assert!(!fields[7].is_empty(), "transport failures carry error text: {}", line);
    }
}

#[tokio::test]
async fn test_course_filter_and_bounds() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 380);

    let mut store = SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
    seed_course(&mut store, &base_url);
    let other = store.add_course("Chemistry", "CHEM").unwrap();
    store
        .add_section(other, None, "http://elsewhere.invalid/page")
        .unwrap();

    let mut controller = RunController::new(config, store);

    let report = controller
        .execute(&RunOptions {
            mode: RunMode::Count,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(report.link_count, 5);

    let report = controller
        .execute(&RunOptions {
            mode: RunMode::Count,
            course: Some("Chemistry".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(report.link_count, 1);

    // Skip the chapter's two links, keep the summary link only
    let report = controller
        .execute(&RunOptions {
            course: Some("Physics 101".to_string()),
            bounds: ExtractBounds::new(2, 3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(report.link_count, 1);
    assert_eq!(report.good_http, 1);
}

#[tokio::test]
async fn test_count_mode_does_no_network_io() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 380);

    let mut store = SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
    seed_course(&mut store, &base_url);

    let mut controller = RunController::new(config.clone(), store);
    let report = controller
        .execute(&RunOptions {
            mode: RunMode::Count,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(report.link_count, 4);
    assert!(!Path::new(&config.output.results_dir).exists());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_failed_https_check_leaves_store_untouched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 380);

    let mut store = SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
    let seeded = seed_course(&mut store, &base_url);
    let chapter_before = store
        .read_field(&LinkSource::ChapterContent {
            chapter_id: seeded.chapter,
        })
        .unwrap();

    let mut controller = RunController::new(config.clone(), store);
    // The mock server speaks plain HTTP, so every HTTPS probe fails
    let report = controller
        .execute(&RunOptions {
            check_conversion: true,
            update: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(report.good_http, 3);
    assert_eq!(report.good_https, 0);
    assert_eq!(report.broken_https, 3);
    assert_eq!(report.updated, Some(0));

    let store = controller.into_store();
    let chapter_after = store
        .read_field(&LinkSource::ChapterContent {
            chapter_id: seeded.chapter,
        })
        .unwrap();
    assert_eq!(chapter_before, chapter_after);
    assert_eq!(
        store
            .read_field(&LinkSource::ExternalUrl { url_id: seeded.url })
            .unwrap(),
        format!("{}/sim", base_url)
    );

    let broken_https = read_report(&config, "broken_https_links.txt");
    assert!(broken_https
        .lines()
        .all(|line| line.contains("https://127.0.0.1")));
}

#[tokio::test]
async fn test_verified_links_are_rewritten_in_store() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 2);

    let mut store = SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
    let seeded = seed_course(&mut store, &base_url);

    let rows = store.fetch_source_rows(Scheme::Http, None).unwrap();
    let records = link_audit::extract::extract_links(&rows, Scheme::Http, ExtractBounds::default());

    let prober = BatchProber::new(&config.probe).unwrap();
    let http = classify(prober.probe_all(records).await, false, true);
    assert_eq!(http.convertible.len(), 3);

    // Stand in for an HTTPS endpoint: every upgraded link verifies
    let mut upgraded = convert(&http.convertible);
    for record in &mut upgraded {
        record.set_outcome(ProbeOutcome::response(200));
    }
    let https = classify(upgraded, true, false);
    assert!(https.good.iter().all(is_good));

    let plan = plan_rewrites(&http.good, &https.good);
    assert_eq!(plan.len(), 3);

    let summary = apply_rewrites(&mut store, &plan);
    assert_eq!(summary.updated, 3);
    assert_eq!(summary.failed, 0);

    let https_base = base_url.replacen("http://", "https://", 1);
    assert_eq!(
        store
            .read_field(&LinkSource::ChapterContent {
                chapter_id: seeded.chapter
            })
            .unwrap(),
        format!(
            "see {}/ok for details, not {}/missing.",
            https_base, base_url
        )
    );
    assert_eq!(
        store
            .read_field(&LinkSource::SectionSummary {
                section_id: seeded.section
            })
            .unwrap(),
        format!(r#"<p>Slides: <a href="{}/ok">here</a></p>"#, https_base)
    );
    assert_eq!(
        store
            .read_field(&LinkSource::ExternalUrl { url_id: seeded.url })
            .unwrap(),
        format!("{}/sim", https_base)
    );

    // Running the same plan again changes nothing
    let again = apply_rewrites(&mut store, &plan);
    assert_eq!(again.updated, 0);
    assert_eq!(again.unchanged, 3);
}

#[tokio::test]
async fn test_batches_run_concurrently_and_in_sequence() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 3);

    let mut store = SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
    let course = store.add_course("Physics 101", "PHY101").unwrap();
    let text: Vec<String> = (0..6).map(|i| format!("{}/page{}", base_url, i)).collect();
    store.add_section(course, None, &text.join(" ")).unwrap();

    let mut controller = RunController::new(config, store);
    let started = Instant::now();
    let report = controller.execute(&RunOptions::default()).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(report.good_http, 6);
    // Two batches of three: each batch waits for its slowest probe,
    // and the second starts only after the first drains.
    assert!(elapsed >= Duration::from_millis(600), "took {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1500), "took {:?}", elapsed);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 6);
}

#[tokio::test]
async fn test_outcomes_follow_their_records_not_arrival_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Earlier links answer last
    let routes: [(&str, u16, u64); 4] = [
        ("/first", 404, 600),
        ("/second", 500, 300),
        ("/third", 200, 0),
        ("/fourth", 410, 150),
    ];
    for (route, status, delay_ms) in routes {
        Mock::given(method("HEAD"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status).set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), 4);

    let records: Vec<LinkRecord> = routes
        .iter()
        .enumerate()
        .map(|(i, (route, _, _))| {
            LinkRecord::new(
                i,
                format!("{}{}", base_url, route),
                LinkSource::SectionSummary { section_id: 1 },
                RowMetadata::default(),
            )
        })
        .collect();

    let prober = BatchProber::new(&config.probe).unwrap();
    let probed = prober.probe_all(records).await;

    assert_eq!(probed.len(), routes.len());
    for (i, (record, (route, status, _))) in probed.iter().zip(routes.iter()).enumerate() {
        assert_eq!(record.index, i);
        assert!(record.url.ends_with(route), "{} out of place", record.url);
        assert_eq!(record.status_code(), Some(*status), "wrong status for {}", route);
    }
}
