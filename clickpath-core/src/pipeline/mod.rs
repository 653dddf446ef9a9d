//! Report runs.
//!
//! Every run streams the configured input once:
//! line source, parser, order check, classifier, then the run's own
//! reduction or correlation, and finally the CSV sink. Unparseable lines are
//! counted and skipped; I/O failures end the run.

mod order;
mod stats;
#[cfg(test)]
mod tests;

use crate::RunError;
use crate::aggregate::{FolderAggregator, FrequencyTable, NextUrlSummary};
use crate::conf::AnalysisConfig;
use crate::correlate::{AnchorPolicy, SessionCorrelator};
use crate::filter::{Classifier, Verdict};
use crate::path::strip_query;
use crate::record::LogRecord;
use crate::report::{
    ExportWriter, ReportError, create_output, write_folder_report, write_next_url_report,
    write_search_report,
};
use crate::source::LineSource;
pub use order::OrderCheck;
pub use stats::{Rejections, RunStats};
use std::io::Write;
use tracing::{debug, instrument, trace};

/// Folder drilldown: hits and distinct subpages per `folders.tier` prefix.
#[instrument(skip_all, fields(tier = cfg.folders.tier))]
pub fn run_folders(cfg: &AnalysisConfig) -> Result<RunStats, RunError> {
    cfg.validate()?;
    let reduction = cfg.folders.reduction();
    let mut stats = RunStats::default();
    let mut folders = FolderAggregator::new();

    scan(cfg, &mut stats, |record| {
        if let Some(key) = reduction.reduce(&record.request_path) {
            folders.record(key, &strip_query(&record.request_path));
        }
        Ok(())
    })?;
    debug!(hits = folders.total_hits(), "records with a folder key");

    let rows = folders.rows();
    write_folder_report(create_output(&cfg.folders.output)?, &rows)?;

    stats.rows = rows.len() as u64;
    stats.log("folders");
    Ok(stats)
}

/// Site search terms, most frequent first.
#[instrument(skip_all, fields(prefix = %cfg.search.path_prefix, param = %cfg.search.param))]
pub fn run_search(cfg: &AnalysisConfig) -> Result<RunStats, RunError> {
    cfg.validate()?;
    let reduction = cfg.search.reduction();
    let mut stats = RunStats::default();
    let mut terms = FrequencyTable::new();

    scan(cfg, &mut stats, |record| {
        if let Some(term) = reduction.reduce(&record.request_path) {
            terms.add(&term);
        }
        Ok(())
    })?;
    debug!(searches = terms.total(), "records with a search term");

    let rows = terms.sorted();
    write_search_report(create_output(&cfg.search.output)?, &rows)?;

    stats.rows = rows.len() as u64;
    stats.log("search");
    Ok(stats)
}

/// Click-through estimate: where clients went right after an anchor request.
#[instrument(skip_all, fields(anchor = %cfg.next_url.anchor_path, policy = ?cfg.next_url.policy))]
pub fn run_next_url(cfg: &AnalysisConfig) -> Result<RunStats, RunError> {
    cfg.validate()?;
    let mut stats = RunStats::default();
    let mut correlator = SessionCorrelator::new(cfg.next_url.anchor_rule(), cfg.next_url.policy);
    let mut summary = NextUrlSummary::new();

    scan(cfg, &mut stats, |record| {
        if let Some(pair) = correlator.observe(record) {
            summary.record(&pair);
        }
        Ok(())
    })?;
    stats.correlation = Some(correlator.finish());

    write_next_url_report(
        create_output(&cfg.next_url.output)?,
        &summary,
        cfg.next_url.summary_header,
    )?;

    stats.rows = summary.rows().len() as u64;
    stats.log("next_url");
    Ok(stats)
}

/// Raw filtered export. With `export.anchor_path` set, only resolved anchors
/// are written, each with the path its client requested next.
#[instrument(skip_all, fields(output = %cfg.export.output.display()))]
pub fn run_export(cfg: &AnalysisConfig) -> Result<RunStats, RunError> {
    cfg.validate()?;
    let mut stats = RunStats::default();
    let rule = cfg.export.anchor_rule();
    let mut writer = ExportWriter::new(create_output(&cfg.export.output)?, rule.is_some())?;

    match rule {
        None => scan(cfg, &mut stats, |record| Ok(writer.write_record(&record)?))?,
        Some(rule) => {
            let mut correlator = SessionCorrelator::new(rule, AnchorPolicy::ResolveThenRearm);
            scan(cfg, &mut stats, |record| {
                if let Some(pair) = correlator.observe(record) {
                    writer.write_pair(&pair)?;
                }
                Ok(())
            })?;
            stats.correlation = Some(correlator.finish());
        }
    }

    stats.rows = writer.finish()?;
    stats.log("export");
    Ok(stats)
}

/// Writes the first `count` parsed records to `out` as JSON lines.
///
/// Classification is skipped: the point is to see what the grammar extracts.
#[instrument(skip_all, fields(count = count))]
pub fn sample<W: Write>(cfg: &AnalysisConfig, count: usize, mut out: W) -> Result<RunStats, RunError> {
    cfg.validate()?;
    let source = LineSource::resolve(&cfg.input)?;
    let mut stats = RunStats {
        sources: source.files().len(),
        ..RunStats::default()
    };

    'files: for file in source.files() {
        let mut number: u64 = 0;
        for text in file.open()? {
            if stats.rows as usize >= count {
                break 'files;
            }
            let text = text?;
            number += 1;
            stats.lines += 1;

            match text.parse::<LogRecord>() {
                Ok(record) => {
                    stats.parsed += 1;
                    serde_json::to_writer(&mut out, &record).map_err(ReportError::from)?;
                    writeln!(out).map_err(ReportError::from)?;
                    stats.rows += 1;
                }
                Err(e) => {
                    stats.unparseable += 1;
                    debug!(
                        path = %file.path.display(),
                        line = number,
                        error = %e,
                        "unparseable line"
                    );
                }
            }
        }
    }

    out.flush().map_err(ReportError::from)?;
    Ok(stats)
}

/// Streams every classifier-accepted record of the input into `on_record`.
fn scan<F>(cfg: &AnalysisConfig, stats: &mut RunStats, mut on_record: F) -> Result<(), RunError>
where
    F: FnMut(LogRecord) -> Result<(), RunError>,
{
    let source = LineSource::resolve(&cfg.input)?;
    stats.sources = source.files().len();

    let classifier = Classifier::from_config(&cfg.filter);
    let mut order = OrderCheck::new(cfg.input.strict_order);

    source.for_each_line(|line| {
        stats.lines += 1;

        let record = match line.text.parse::<LogRecord>() {
            Ok(record) => record,
            Err(e) => {
                stats.unparseable += 1;
                debug!(
                    path = %line.source.path.display(),
                    line = line.number,
                    error = %e,
                    "unparseable line"
                );
                return Ok(());
            }
        };
        stats.parsed += 1;
        order.observe(&line, &record)?;

        match classifier.classify(&record) {
            Verdict::Accepted => {
                stats.accepted += 1;
                on_record(record)
            }
            Verdict::Rejected(gate) => {
                trace!(gate = gate.as_str(), path = %record.request_path, "rejected");
                stats.rejected.count(gate);
                Ok(())
            }
        }
    })?;

    stats.out_of_order = order.violations();
    Ok(())
}
