//! The batch transform: reconstruct → decode → classify → aggregate.
//!
//! Single-threaded and synchronous; the whole input is read into memory,
//! transformed, and handed to the report sink. Each record's enrichment is
//! independent of every other record.

pub mod aggregate;
pub mod classify;
pub mod decode;
pub mod reconstruct;

use tracing::{info, warn};

use crate::config::ReportConfig;
use aggregate::{sort_for_report, summarize, SummaryStats};
use classify::{rules::RULES, Classifier, EnrichedRecord};

/// Outcome of a full pipeline run: the sorted enriched record set plus the
/// summary statistics for the diagnostic printout.
#[derive(Debug)]
pub struct PipelineResult {
    pub records: Vec<EnrichedRecord>,
    pub stats: SummaryStats,
}

pub struct Pipeline {
    config: ReportConfig,
}

impl Pipeline {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Run from clean input: one tilde-delimited record per line.
    pub fn run_from_lines(&self, text: &str) -> PipelineResult {
        let records = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(decode::decode_record);
        self.finish(records)
    }

    /// Run from a space-joined blob: reconstruct record boundaries first,
    /// then decode each recovered record.
    pub fn run_from_blob(&self, text: &str) -> PipelineResult {
        let outcome = reconstruct::split_by_field_count(text.trim());
        info!(
            records = outcome.records.len(),
            short_records = outcome.short_records,
            "reconstructed record boundaries"
        );
        if outcome.short_records > 0 {
            warn!(
                short_records = outcome.short_records,
                "input ended with a partial record; emitted as-is for inspection"
            );
        }
        if let Some(expected) = self.config.expected_records {
            if outcome.records.len() != expected {
                warn!(
                    expected,
                    actual = outcome.records.len(),
                    "reconstructed record count differs from expected total; \
                     the space-boundary heuristic may have drifted"
                );
            }
        }

        let records = outcome.records.iter().map(|r| decode::decode_record(r));
        self.finish(records)
    }

    fn finish(&self, decoded: impl Iterator<Item = decode::Record>) -> PipelineResult {
        let classifier = Classifier::new(&RULES);
        let mut records: Vec<EnrichedRecord> =
            decoded.map(|r| classifier.enrich(r)).collect();
        sort_for_report(&mut records);
        let stats = summarize(&records);
        info!(total = stats.total, "pipeline run complete");
        PipelineResult { records, stats }
    }
}
