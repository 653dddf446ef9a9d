use clickpath_core::conf::AnalysisConfig;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FIREFOX: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:64.0) Gecko/20100101 Firefox/64.0";
pub const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// One access log line. `at` is `HH:MM:SS` on 16 Jan 2024, UTC.
pub fn line(ip: &str, at: &str, status: u16, method: &str, path: &str, ua: &str) -> String {
    format!(
        "{ip} - - [16/Jan/2024:{at} +0000] {status} \"{method} {path} HTTP/1.1\" 1024 \"https://example.com/\" \"{ua}\""
    )
}

/// A GET/200 from a regular browser.
pub fn visit(ip: &str, at: &str, path: &str) -> String {
    line(ip, at, 200, "GET", path, FIREFOX)
}

/// A temp directory holding a `logs/` input directory and the report outputs.
pub struct LogFixture {
    dir: TempDir,
}

impl LogFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(dir.path().join("logs")).expect("failed to create logs dir");
        Self { dir }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dir.path().join("logs")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a gzip archive into `logs/`.
    pub fn archive(&self, name: &str, lines: &[String]) -> PathBuf {
        let path = self.logs_dir().join(name);
        let file = fs::File::create(&path).expect("failed to create archive");
        let mut encoder = GzEncoder::new(file, Compression::default());
        for line in lines {
            writeln!(encoder, "{line}").expect("failed to write archive");
        }
        encoder.finish().expect("failed to finish archive");
        path
    }

    /// Writes an uncompressed file into `logs/`.
    pub fn plain(&self, name: &str, content: &str) -> PathBuf {
        let path = self.logs_dir().join(name);
        fs::write(&path, content).expect("failed to write file");
        path
    }

    /// Default configuration reading `logs/`, with every report written
    /// next to it.
    pub fn config(&self) -> AnalysisConfig {
        let mut cfg = AnalysisConfig::default();
        cfg.input.path = self.logs_dir();
        cfg.folders.output = self.path("folder_summary.csv");
        cfg.search.output = self.path("search_terms_analysis.csv");
        cfg.next_url.output = self.path("analysis.csv");
        cfg.export.output = self.path("export.csv");
        cfg
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("failed to read report")
    }
}

impl Default for LogFixture {
    fn default() -> Self {
        Self::new()
    }
}
