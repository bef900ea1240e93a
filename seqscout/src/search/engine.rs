use rayon::prelude::*;
use std::io::Write;
use std::num::NonZeroUsize;
use tracing::{debug, error, info, trace, warn};

use super::matcher::PatternMatcher;
use crate::config::ScanConfig;
use crate::errors::{ScanError, ScanResult};
use crate::fasta::{self, FastaRecord};
use crate::results::{MatchRecord, PatternFailure, PatternHits, ScanSummary};
use crate::sink::CsvSink;

/// Runs a complete scan as described by `config`: loads the genome and
/// pattern files, scans with `config.thread_count` workers, and writes
/// every match to a CSV report at `config.output_path`
pub fn scan(config: &ScanConfig) -> ScanResult<ScanSummary> {
    info!(
        "Starting scan of {} with patterns from {}",
        config.genome_path.display(),
        config.patterns_path.display()
    );

    let genome = fasta::read_genome(&config.genome_path)?;
    let patterns = fasta::read_patterns(&config.patterns_path)?;

    let sink = CsvSink::create(&config.output_path)?;
    let summary = scan_reference(&genome, &patterns, &sink, config.thread_count)?;

    let written = sink.records_written();
    sink.finish()?;
    debug!(
        "Wrote {} records to {}",
        written,
        config.output_path.display()
    );

    Ok(summary)
}

/// Searches every pattern against one reference sequence concurrently.
///
/// Each pattern becomes one task on a dedicated pool of exactly
/// `thread_count` workers; the reference is shared by reference and
/// never copied. Matches are appended to `sink` as they are found.
/// Returns after every task has finished. Invalid patterns end up in
/// the summary's failure list without disturbing sibling tasks; sink
/// and pool errors abort the run.
pub fn scan_reference<W: Write + Send>(
    reference: &str,
    patterns: &[FastaRecord],
    sink: &CsvSink<W>,
    thread_count: NonZeroUsize,
) -> ScanResult<ScanSummary> {
    info!(
        "Scanning {} patterns against {} bp reference with {} threads",
        patterns.len(),
        reference.len(),
        thread_count
    );

    if patterns.is_empty() {
        debug!("No patterns provided, returning empty summary");
        return Ok(ScanSummary::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count.get())
        .build()
        .map_err(|e| ScanError::ThreadPool(e.to_string()))?;

    let outcomes: Vec<Result<PatternHits, PatternFailure>> = pool.install(|| {
        patterns
            .par_iter()
            .map(|pattern| scan_pattern(reference, pattern, sink))
            .collect()
    });

    let mut summary = ScanSummary::new();
    let mut fatal: Option<ScanError> = None;
    for outcome in outcomes {
        match outcome {
            Ok(hits) => summary.add_hits(hits),
            Err(failure) if failure.error.is_fatal() => {
                error!("Pattern {} aborted the run: {}", failure.pattern_id, failure.error);
                fatal.get_or_insert(failure.error);
            }
            Err(failure) => {
                warn!("Pattern {} failed: {}", failure.pattern_id, failure.error);
                summary.add_failure(failure);
            }
        }
    }
    if let Some(error) = fatal {
        return Err(error);
    }

    info!(
        "Scan complete. Found {} matches for {} of {} patterns",
        summary.total_matches, summary.patterns_with_matches, summary.patterns_searched
    );

    Ok(summary)
}

/// One worker task: match a single pattern against the reference and
/// stream its records to the sink
fn scan_pattern<W: Write + Send>(
    reference: &str,
    pattern: &FastaRecord,
    sink: &CsvSink<W>,
) -> Result<PatternHits, PatternFailure> {
    let matcher = PatternMatcher::new(pattern.id.as_str(), &pattern.sequence).map_err(|error| {
        PatternFailure {
            pattern_id: pattern.id.clone(),
            error,
        }
    })?;

    let mut records = Vec::new();
    for start in matcher.occurrences(reference) {
        let record = MatchRecord {
            pattern_id: pattern.id.clone(),
            start,
            end: start + matcher.pattern_len(),
        };
        if let Err(error) = sink.append(&record) {
            return Err(PatternFailure {
                pattern_id: pattern.id.clone(),
                error,
            });
        }
        records.push(record);
    }

    trace!("Pattern {} matched {} times", pattern.id, records.len());
    Ok(PatternHits {
        pattern_id: pattern.id.clone(),
        records,
    })
}
