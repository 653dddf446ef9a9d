use clickpath_core::pipeline::run_folders;
use integration_tests::harness::{
    FIREFOX, GOOGLEBOT, LogFixture, events_mentioning, init_test_tracing, line, visit,
};
use pretty_assertions::assert_eq;

fn blog_traffic(fixture: &LogFixture) {
    fixture.archive(
        "access.log.2.gz",
        &[
            visit("10.0.0.1", "09:00:00", "/blog/rust-2024"),
            visit("10.0.0.2", "09:01:00", "/blog/rust-2024?utm_source=feed"),
            line("10.0.0.3", "09:02:00", 200, "GET", "/blog/async", GOOGLEBOT),
            visit("10.0.0.1", "09:03:00", "/blog/admincp/login"),
            line("10.0.0.1", "09:04:00", 200, "POST", "/blog/comment", FIREFOX),
            "10.0.0.9 - - [16/Jan/2024:09:05:00 +0000] truncated".to_string(),
        ],
    );
    fixture.archive(
        "access.log.1.gz",
        &[
            visit("10.0.0.2", "10:00:00", "/blog/async"),
            line("10.0.0.2", "10:01:00", 404, "GET", "/blog/missing", FIREFOX),
            visit("10.0.0.4", "10:02:00", "/about"),
            visit("10.0.0.4", "10:03:00", "/blog/"),
        ],
    );
}

/// Two archives in chronological order: `/blog` counts every qualifying hit
/// under the folder and every distinct query-stripped path.
#[test]
fn blog_folder_counts_qualifying_hits_across_archives() {
    // Arrange
    let fixture = LogFixture::new();
    blog_traffic(&fixture);
    let mut cfg = fixture.config();
    cfg.folders.tier = 1;
    cfg.filter.url_exclusions = vec!["admincp".to_string()];

    // Act
    let stats = run_folders(&cfg).unwrap();

    // Assert
    assert_eq!(
        fixture.read(&cfg.folders.output),
        "folder,total_subpages,total_hits\n/blog,3,4\n/about,1,1\n"
    );
    assert_eq!(stats.sources, 2);
    assert_eq!(stats.lines, 10);
    assert_eq!(stats.unparseable, 1);
    assert_eq!(stats.rejected.total(), 4);
}

#[test]
fn second_tier_splits_the_blog_folder() {
    // Arrange
    let fixture = LogFixture::new();
    blog_traffic(&fixture);
    let mut cfg = fixture.config();
    cfg.filter.url_exclusions = vec!["admincp".to_string()];

    // Act
    run_folders(&cfg).unwrap();

    // Assert
    assert_eq!(
        fixture.read(&cfg.folders.output),
        "folder,total_subpages,total_hits\n/blog/rust-2024,1,2\n/blog/async,1,1\n"
    );
}

#[test]
fn uncompressed_files_in_the_directory_are_skipped_with_a_notice() {
    // Arrange
    let events = init_test_tracing();
    let fixture = LogFixture::new();
    fixture.archive("access.log.1.gz", &[visit("10.0.0.1", "10:00:00", "/docs/intro")]);
    fixture.plain("access.log", &visit("10.0.0.1", "10:05:00", "/docs/other"));
    let cfg = fixture.config();

    // Act
    run_folders(&cfg).unwrap();

    // Assert
    assert_eq!(
        fixture.read(&cfg.folders.output),
        "folder,total_subpages,total_hits\n/docs/intro,1,1\n"
    );
    let logs_dir = fixture.logs_dir().display().to_string();
    let skipped: Vec<_> = events_mentioning(&events, &logs_dir)
        .into_iter()
        .filter(|e| e.message().starts_with("Skipping"))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].field("file"), Some("access.log"));
}
