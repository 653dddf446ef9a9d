use crate::conf::types::InputOrder;
use crate::source::{InputFile, SourceError};
use std::cmp::Reverse;
use std::fs;
use std::time::SystemTime;

/// Sorts inputs oldest first according to `order`.
pub fn sort_inputs(mut files: Vec<InputFile>, order: InputOrder) -> Result<Vec<InputFile>, SourceError> {
    match order {
        InputOrder::Name => files.sort_by(|a, b| a.path.cmp(&b.path)),
        InputOrder::ArchiveSequence => {
            files.sort_by_cached_key(|f| {
                let name = file_name(f);
                (Reverse(archive_sequence(&name).unwrap_or(0)), name)
            });
        }
        InputOrder::Modified => {
            let mut keyed = files
                .into_iter()
                .map(|f| {
                    let modified = fs::metadata(&f.path)
                        .and_then(|m| m.modified())
                        .map_err(|e| SourceError::Metadata {
                            path: f.path.clone(),
                            source: e,
                        })?;
                    Ok((modified, f))
                })
                .collect::<Result<Vec<(SystemTime, InputFile)>, SourceError>>()?;

            keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.path.cmp(&b.1.path)));
            files = keyed.into_iter().map(|(_, f)| f).collect();
        }
    }
    Ok(files)
}

/// logrotate sequence number of an archive: `access.log.12.gz` is 12.
///
/// Higher numbers are older. Names without a numeric component have none.
pub fn archive_sequence(file_name: &str) -> Option<u64> {
    let stem = file_name.strip_suffix(".gz").unwrap_or(file_name);
    let (_, last) = stem.rsplit_once('.')?;
    last.parse().ok()
}

fn file_name(file: &InputFile) -> String {
    file.path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
