//! Match records and run summaries.
//!
//! A scan produces one [`MatchRecord`] per occurrence of a pattern in the
//! reference. Records are grouped per pattern in [`PatternHits`], and a
//! whole run is summarized by [`ScanSummary`], which also carries the
//! per-pattern failures that did not abort the run.

use crate::errors::ScanError;

/// One reported occurrence of a pattern in the reference sequence
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchRecord {
    /// Identifier of the pattern that matched
    pub pattern_id: String,
    /// 0-based offset in the reference where the match starts
    pub start: usize,
    /// Exclusive end offset (`start + pattern length`)
    pub end: usize,
}

impl MatchRecord {
    /// Length of the matched region
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the record spans no symbols; never produced by a scan
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// All matches found for a single pattern
#[derive(Debug, Clone)]
pub struct PatternHits {
    /// Identifier of the searched pattern
    pub pattern_id: String,
    /// Every occurrence, in increasing offset order
    pub records: Vec<MatchRecord>,
}

/// A pattern whose task failed without aborting the run
#[derive(Debug)]
pub struct PatternFailure {
    /// Identifier of the failed pattern
    pub pattern_id: String,
    /// The error that ended this pattern's task
    pub error: ScanError,
}

/// Summary of a complete scan run
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Results per pattern, one entry per successfully searched pattern
    pub pattern_hits: Vec<PatternHits>,
    /// Patterns whose tasks failed; empty on a fully clean run
    pub failures: Vec<PatternFailure>,
    /// Total number of match records produced
    pub total_matches: usize,
    /// Total number of patterns attempted (successes plus failures)
    pub patterns_searched: usize,
    /// Number of patterns with at least one match
    pub patterns_with_matches: usize,
}

impl ScanSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds one pattern's hits to the summary
    pub fn add_hits(&mut self, hits: PatternHits) {
        self.patterns_searched += 1;
        if !hits.records.is_empty() {
            self.total_matches += hits.records.len();
            self.patterns_with_matches += 1;
        }
        self.pattern_hits.push(hits);
    }

    /// Records a failed pattern task
    pub fn add_failure(&mut self, failure: PatternFailure) {
        self.patterns_searched += 1;
        self.failures.push(failure);
    }

    /// Merges another summary into this one
    pub fn merge(&mut self, other: ScanSummary) {
        self.total_matches += other.total_matches;
        self.patterns_searched += other.patterns_searched;
        self.patterns_with_matches += other.patterns_with_matches;
        self.pattern_hits.extend(other.pattern_hits);
        self.failures.extend(other.failures);
    }
}
