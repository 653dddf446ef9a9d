use crate::RunError;
use crate::conf::{AnalysisConfig, ConfigError};
use crate::correlate::AnchorPolicy;
use crate::pipeline::{run_export, run_folders, run_next_url, run_search, sample};
use crate::source::SourceError;
use crate::test_utils::{BROWSER_UA, access_line, enable_tracing_output};
use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{TempDir, tempdir};

const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

fn write_gz(path: &Path, lines: &[String]) {
    let mut encoder = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    for line in lines {
        writeln!(encoder, "{line}").unwrap();
    }
    encoder.finish().unwrap();
}

fn browse(ip: &str, minute: u32, path: &str) -> String {
    access_line(ip, minute, 200, "GET", path, BROWSER_UA)
}

/// Config reading `logs/` under `dir` and writing every report into `dir`.
fn config_for(dir: &TempDir) -> AnalysisConfig {
    let mut cfg = AnalysisConfig::default();
    cfg.input.path = dir.path().join("logs");
    cfg.folders.output = dir.path().join("folders.csv");
    cfg.search.output = dir.path().join("search.csv");
    cfg.next_url.output = dir.path().join("next_url.csv");
    cfg.export.output = dir.path().join("export.csv");
    cfg
}

fn logs(dir: &TempDir, archives: &[(&str, Vec<String>)]) {
    let logs = dir.path().join("logs");
    fs::create_dir_all(&logs).unwrap();
    for (name, lines) in archives {
        write_gz(&logs.join(name), lines);
    }
}

#[test]
fn folders_counts_hits_and_distinct_subpages() {
    // Arrange
    let _guard = enable_tracing_output();
    let dir = tempdir().unwrap();
    logs(
        &dir,
        &[
            (
                "access.log.2.gz",
                vec![
                    browse("10.0.0.1", 0, "/blog/a"),
                    browse("10.0.0.2", 1, "/blog/a?x=1"),
                    browse("10.0.0.1", 2, "/blog/b"),
                    access_line("10.0.0.3", 3, 200, "GET", "/blog/c", GOOGLEBOT),
                    access_line("10.0.0.1", 4, 200, "POST", "/blog/d", BROWSER_UA),
                    access_line("10.0.0.1", 5, 404, "GET", "/blog/e", BROWSER_UA),
                    "not an access log line".to_string(),
                ],
            ),
            (
                "access.log.1.gz",
                vec![browse("10.0.0.2", 10, "/about/team"), browse("10.0.0.2", 11, "/")],
            ),
        ],
    );
    let mut cfg = config_for(&dir);
    cfg.folders.tier = 1;

    // Act
    let stats = run_folders(&cfg).unwrap();

    // Assert
    assert_eq!(
        fs::read_to_string(&cfg.folders.output).unwrap(),
        "folder,total_subpages,total_hits\n/blog,2,3\n/about,1,1\n/,1,1\n"
    );
    assert_eq!(stats.sources, 2);
    assert_eq!(stats.lines, 9);
    assert_eq!(stats.parsed, 8);
    assert_eq!(stats.unparseable, 1);
    assert_eq!(stats.accepted, 5);
    assert_eq!(stats.rejected.bot, 1);
    assert_eq!(stats.rejected.method, 1);
    assert_eq!(stats.rejected.status, 1);
    assert_eq!(stats.rows, 3);
}

#[test]
fn folders_skip_paths_shallower_than_the_tier() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(
        &dir,
        &[(
            "access.log.1.gz",
            vec![
                browse("10.0.0.1", 0, "/blog/2024/post"),
                browse("10.0.0.1", 1, "/blog/2024/other?page=2"),
                browse("10.0.0.1", 2, "/blog"),
            ],
        )],
    );
    let cfg = config_for(&dir);

    // Act
    run_folders(&cfg).unwrap();

    // Assert
    assert_eq!(
        fs::read_to_string(&cfg.folders.output).unwrap(),
        "folder,total_subpages,total_hits\n/blog/2024,2,2\n"
    );
}

#[test]
fn search_terms_are_ranked_by_frequency() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(
        &dir,
        &[(
            "access.log.1.gz",
            vec![
                browse("10.0.0.1", 0, "/search?q=rust"),
                browse("10.0.0.2", 1, "/search?q=async"),
                browse("10.0.0.3", 2, "/search?page=2&q=rust"),
                browse("10.0.0.4", 3, "/search?q="),
                browse("10.0.0.5", 4, "/other?q=rust"),
                browse("10.0.0.6", 5, "/search?q=hello+world"),
            ],
        )],
    );
    let cfg = config_for(&dir);

    // Act
    let stats = run_search(&cfg).unwrap();

    // Assert
    assert_eq!(
        fs::read_to_string(&cfg.search.output).unwrap(),
        "search_term,count\nrust,2\nasync,1\nhello world,1\n"
    );
    assert_eq!(stats.rows, 3);
}

fn homepage_sessions() -> Vec<String> {
    vec![
        browse("10.0.0.1", 0, "/"),
        browse("10.0.0.1", 1, "/pricing"),
        browse("10.0.0.1", 2, "/"),
        browse("10.0.0.1", 3, "/"),
        browse("10.0.0.1", 4, "/blog"),
        browse("10.0.0.2", 5, "/"),
    ]
}

#[test]
fn next_url_pairs_each_anchor_with_the_following_request() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(&dir, &[("access.log.1.gz", homepage_sessions())]);
    let cfg = config_for(&dir);

    // Act
    let stats = run_next_url(&cfg).unwrap();

    // Assert
    assert_eq!(
        fs::read_to_string(&cfg.next_url.output).unwrap(),
        "Total Hits,3\n\
         Date Range,2024-01-16 10:00:00+00:00 to 2024-01-16 10:03:00+00:00\n\
         \n\
         next_url,count,percent_of_total\n\
         /pricing,1,33.33\n\
         /,1,33.33\n\
         /blog,1,33.33\n"
    );
    let correlation = stats.correlation.unwrap();
    assert_eq!(correlation.armed, 4);
    assert_eq!(correlation.resolved, 3);
    assert_eq!(correlation.unresolved, 1);
}

#[test]
fn next_url_reset_policy_drops_superseded_anchors() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(&dir, &[("access.log.1.gz", homepage_sessions())]);
    let mut cfg = config_for(&dir);
    cfg.next_url.policy = AnchorPolicy::ResetOnAnchor;

    // Act
    let stats = run_next_url(&cfg).unwrap();

    // Assert
    assert_eq!(
        fs::read_to_string(&cfg.next_url.output).unwrap(),
        "Total Hits,2\n\
         Date Range,2024-01-16 10:00:00+00:00 to 2024-01-16 10:03:00+00:00\n\
         \n\
         next_url,count,percent_of_total\n\
         /pricing,1,50.00\n\
         /blog,1,50.00\n"
    );
    let correlation = stats.correlation.unwrap();
    assert_eq!(correlation.resolved, 2);
    assert_eq!(correlation.superseded, 1);
}

#[test]
fn next_url_ignores_rejected_records_between_anchor_and_follow_up() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(
        &dir,
        &[(
            "access.log.1.gz",
            vec![
                browse("10.0.0.1", 0, "/"),
                access_line("10.0.0.1", 1, 304, "GET", "/style.css", BROWSER_UA),
                access_line("10.0.0.1", 2, 200, "HEAD", "/", BROWSER_UA),
                browse("10.0.0.1", 3, "/docs"),
            ],
        )],
    );
    let mut cfg = config_for(&dir);
    cfg.next_url.summary_header = false;

    // Act
    run_next_url(&cfg).unwrap();

    // Assert
    assert_eq!(
        fs::read_to_string(&cfg.next_url.output).unwrap(),
        "next_url,count,percent_of_total\n/docs,1,100.00\n"
    );
}

#[test]
fn export_writes_every_accepted_record() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(
        &dir,
        &[(
            "access.log.1.gz",
            vec![
                browse("10.0.0.1", 0, "/a"),
                access_line("10.0.0.1", 1, 500, "GET", "/b", BROWSER_UA),
                browse("10.0.0.2", 2, "/c"),
            ],
        )],
    );
    let cfg = config_for(&dir);

    // Act
    let stats = run_export(&cfg).unwrap();

    // Assert
    let out = fs::read_to_string(&cfg.export.output).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("response_size,user_agent"));
    assert!(lines[1].starts_with("10.0.0.1,2024-01-16 10:00:00+00:00,200,GET,/a,512,"));
    assert!(lines[2].starts_with("10.0.0.2,2024-01-16 10:02:00+00:00,200,GET,/c,512,"));
    assert_eq!(stats.rows, 2);
    assert!(stats.correlation.is_none());
}

#[test]
fn export_with_anchor_writes_resolved_pairs() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(&dir, &[("access.log.1.gz", homepage_sessions())]);
    let mut cfg = config_for(&dir);
    cfg.export.anchor_path = Some("/".to_string());

    // Act
    let stats = run_export(&cfg).unwrap();

    // Assert
    let out = fs::read_to_string(&cfg.export.output).unwrap();
    let next_urls: Vec<&str> = out
        .lines()
        .skip(1)
        .map(|l| l.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(next_urls, vec!["/pricing", "/", "/blog"]);
    assert!(out.lines().next().unwrap().ends_with(",next_url"));
    assert_eq!(stats.rows, 3);
}

#[test]
fn sample_prints_the_first_parsed_records() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(
        &dir,
        &[(
            "access.log.1.gz",
            vec![
                "garbage".to_string(),
                access_line("10.0.0.1", 0, 404, "POST", "/x", GOOGLEBOT),
                browse("10.0.0.2", 1, "/y"),
                browse("10.0.0.3", 2, "/z"),
            ],
        )],
    );
    let cfg = config_for(&dir);
    let mut out = Vec::new();

    // Act
    let stats = sample(&cfg, 2, &mut out).unwrap();

    // Assert
    let out = String::from_utf8(out).unwrap();
    let records: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["client_address"], "10.0.0.1");
    assert_eq!(records[0]["status_code"], 404);
    assert_eq!(records[1]["request_path"], "/y");
    assert_eq!(stats.unparseable, 1);
}

#[test]
fn invalid_config_fails_before_reading_input() {
    // Arrange
    let dir = tempdir().unwrap();
    let mut cfg = config_for(&dir);
    cfg.folders.tier = 0;

    // Act
    let result = run_folders(&cfg);

    // Assert
    assert!(matches!(
        result,
        Err(RunError::Config(ConfigError::Validation { .. }))
    ));
    assert!(!cfg.folders.output.exists());
}

#[test]
fn missing_input_is_fatal() {
    // Arrange
    let dir = tempdir().unwrap();
    let cfg = config_for(&dir);

    // Act
    let result = run_search(&cfg);

    // Assert
    assert!(matches!(
        result,
        Err(RunError::Source(SourceError::NotFound { .. }))
    ));
}

#[test]
fn empty_input_produces_header_only_reports() {
    // Arrange
    let dir = tempdir().unwrap();
    logs(&dir, &[]);
    let cfg = config_for(&dir);

    // Act
    let stats = run_search(&cfg).unwrap();

    // Assert
    assert_eq!(stats.sources, 0);
    assert_eq!(
        fs::read_to_string(&cfg.search.output).unwrap(),
        "search_term,count\n"
    );
}
