//! Raw line input.
//!
//! A [`LineSource`] is an ordered list of files, each either plain text or
//! gzip-compressed, read line by line. Correlation results depend on reading
//! archives oldest first, so directory listings are never used in the order
//! the filesystem returns them; see [`InputOrder`].

mod error;
mod lines;
mod order;

use crate::conf::types::InputConfig;
pub use error::SourceError;
pub use lines::LineReader;
pub use order::{archive_sequence, sort_inputs};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub compression: Compression,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>, suffix: &str) -> Self {
        let path = path.into();
        let compression = if has_suffix(&path, suffix) {
            Compression::Gzip
        } else {
            Compression::None
        };
        Self { path, compression }
    }

    pub fn open(&self) -> Result<LineReader, SourceError> {
        LineReader::open(&self.path, self.compression)
    }
}

/// One raw line, with enough context to report where it came from.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub source: &'a InputFile,
    /// Position of `source` in the processing order.
    pub source_index: usize,
    /// 1-based line number within `source`.
    pub number: u64,
    pub text: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct LineSource {
    files: Vec<InputFile>,
}

impl LineSource {
    pub fn from_files(files: Vec<InputFile>) -> Self {
        Self { files }
    }

    /// Resolves the configured input path into an ordered list of files.
    ///
    /// A file is read as-is (decompressed when it carries the configured
    /// suffix). A directory contributes every entry carrying the suffix;
    /// anything else in it is skipped with a notice.
    #[instrument(level = "debug", skip(cfg), fields(path = %cfg.path.display()))]
    pub fn resolve(cfg: &InputConfig) -> Result<Self, SourceError> {
        let path = cfg.path.as_path();
        if !path.exists() {
            return Err(SourceError::NotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_dir() {
            return Ok(Self::from_files(vec![InputFile::new(path, &cfg.suffix)]));
        }

        let files = scan_directory(path, &cfg.suffix)?;
        if files.is_empty() {
            warn!(dir = %path.display(), suffix = %cfg.suffix, "no compressed logs found");
        }

        Ok(Self::from_files(sort_inputs(files, cfg.order)?))
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    /// Streams every line of every file, in order, into `f`.
    ///
    /// Any I/O failure aborts the walk; so does an error returned by `f`.
    pub fn for_each_line<E, F>(&self, mut f: F) -> Result<(), E>
    where
        E: From<SourceError>,
        F: FnMut(Line<'_>) -> Result<(), E>,
    {
        for (source_index, source) in self.files.iter().enumerate() {
            info!(path = %source.path.display(), "Processing");

            let mut number = 0;
            for text in source.open()? {
                let text = text?;
                number += 1;
                f(Line {
                    source,
                    source_index,
                    number,
                    text: &text,
                })?;
            }
        }
        Ok(())
    }
}

fn scan_directory(dir: &Path, suffix: &str) -> Result<Vec<InputFile>, SourceError> {
    let entries = fs::read_dir(dir).map_err(|e| SourceError::read_dir(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SourceError::read_dir(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }
        if !has_suffix(&path, suffix) {
            info!(
                dir = %dir.display(),
                file = %entry.file_name().to_string_lossy(),
                "Skipping non-{suffix} file"
            );
            continue;
        }

        files.push(InputFile {
            path,
            compression: Compression::Gzip,
        });
    }
    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
}
