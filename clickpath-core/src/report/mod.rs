//! CSV report sink.
//!
//! Writers take any [`io::Write`]; [`create_output`] opens a file for them.
//! Every report starts with its header row, so an empty aggregate still
//! produces a valid, header-only file.

mod error;

use crate::aggregate::{FolderRow, NextUrlSummary};
use crate::correlate::ResolvedPair;
use crate::record::LogRecord;
use chrono::{DateTime, FixedOffset};
pub use error::ReportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Timestamp rendering used in every report.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

pub const FOLDER_HEADER: [&str; 3] = ["folder", "total_subpages", "total_hits"];
pub const SEARCH_HEADER: [&str; 2] = ["search_term", "count"];
pub const NEXT_URL_HEADER: [&str; 3] = ["next_url", "count", "percent_of_total"];
pub const EXPORT_HEADER: [&str; 7] = [
    "ip_address",
    "timestamp",
    "status_code",
    "method",
    "request_path",
    "response_size",
    "user_agent",
];

pub fn create_output(path: &Path) -> Result<BufWriter<File>, ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Writing report");
    Ok(BufWriter::new(file))
}

pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format(REPORT_TIMESTAMP_FORMAT).to_string()
}

//-----------------------------------------------------------------------------
// Aggregate reports
//-----------------------------------------------------------------------------

pub fn write_folder_report<W: Write>(out: W, rows: &[FolderRow]) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(out);
    csv.write_record(FOLDER_HEADER)?;
    for row in rows {
        csv.write_record([
            row.folder.as_str(),
            row.total_subpages.to_string().as_str(),
            row.total_hits.to_string().as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// `terms` are written in the order given; callers pass them already sorted.
pub fn write_search_report<W: Write>(out: W, terms: &[(String, u64)]) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(out);
    csv.write_record(SEARCH_HEADER)?;
    for (term, count) in terms {
        csv.write_record([term.as_str(), count.to_string().as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the click-through table, optionally preceded by a two-line
/// metadata block and a blank separator line.
///
/// The date range line is omitted when nothing was resolved.
pub fn write_next_url_report<W: Write>(
    mut out: W,
    summary: &NextUrlSummary,
    with_summary: bool,
) -> Result<(), ReportError> {
    if with_summary {
        writeln!(out, "Total Hits,{}", summary.total_hits())?;
        if let Some((earliest, latest)) = summary.date_range() {
            writeln!(
                out,
                "Date Range,{} to {}",
                format_timestamp(&earliest),
                format_timestamp(&latest)
            )?;
        }
        writeln!(out)?;
    }

    let mut csv = csv::Writer::from_writer(out);
    csv.write_record(NEXT_URL_HEADER)?;
    for row in summary.rows() {
        csv.write_record([
            row.next_url.as_str(),
            row.count.to_string().as_str(),
            format!("{:.2}", row.percent_of_total).as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

//-----------------------------------------------------------------------------
// Raw export
//-----------------------------------------------------------------------------

/// Streaming writer for the raw filtered export.
///
/// With `with_next_url` set, rows carry a trailing `next_url` column and are
/// expected to come from [`ExportWriter::write_pair`].
pub struct ExportWriter<W: Write> {
    csv: csv::Writer<W>,
    with_next_url: bool,
    rows: u64,
}

impl<W: Write> ExportWriter<W> {
    pub fn new(out: W, with_next_url: bool) -> Result<Self, ReportError> {
        let mut csv = csv::Writer::from_writer(out);
        if with_next_url {
            csv.write_record(EXPORT_HEADER.iter().chain(&["next_url"]))?;
        } else {
            csv.write_record(EXPORT_HEADER)?;
        }
        Ok(Self {
            csv,
            with_next_url,
            rows: 0,
        })
    }

    pub fn write_record(&mut self, record: &LogRecord) -> Result<(), ReportError> {
        self.write_row(record, None)
    }

    pub fn write_pair(&mut self, pair: &ResolvedPair) -> Result<(), ReportError> {
        self.write_row(&pair.anchor, Some(&pair.next_path))
    }

    pub fn finish(mut self) -> Result<u64, ReportError> {
        self.csv.flush()?;
        Ok(self.rows)
    }

    fn write_row(&mut self, record: &LogRecord, next_url: Option<&str>) -> Result<(), ReportError> {
        let status = record.status_code.to_string();
        let size = record.response_size.to_string();
        let timestamp = format_timestamp(&record.timestamp);

        let mut fields: Vec<&str> = vec![
            record.client_address.as_str(),
            timestamp.as_str(),
            status.as_str(),
            record.method.as_str(),
            record.request_path.as_str(),
            size.as_str(),
            record.user_agent.as_str(),
        ];
        if self.with_next_url {
            fields.push(next_url.unwrap_or_default());
        }

        self.csv.write_record(&fields)?;
        self.rows += 1;
        Ok(())
    }
}
