use crate::errors::{ScanError, ScanResult};
use crate::results::MatchRecord;

/// Builds the KMP prefix table for a pattern.
///
/// `table[i]` is the length of the longest proper prefix of
/// `pattern[..=i]` that is also a suffix of it. The matcher uses the
/// table to realign after a mismatch without re-reading the reference.
/// An empty pattern yields an empty table.
pub fn prefix_table(pattern: &[u8]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = table[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        table[i] = k;
    }
    table
}

/// Exact matcher for a single pattern, with its prefix table built once
/// at construction
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern_id: String,
    pattern: Vec<u8>,
    table: Vec<usize>,
}

impl PatternMatcher {
    /// Creates a matcher for the given pattern sequence.
    ///
    /// Comparison is byte-exact; callers normalize case before
    /// constructing a matcher. Rejects empty sequences.
    pub fn new(pattern_id: impl Into<String>, sequence: &str) -> ScanResult<Self> {
        let pattern_id = pattern_id.into();
        if sequence.is_empty() {
            return Err(ScanError::invalid_pattern(pattern_id));
        }
        let pattern = sequence.as_bytes().to_vec();
        let table = prefix_table(&pattern);
        Ok(Self {
            pattern_id,
            pattern,
            table,
        })
    }

    /// Identifier of the pattern this matcher searches for
    pub fn pattern_id(&self) -> &str {
        &self.pattern_id
    }

    /// Length of the pattern in bytes
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// Returns an iterator over the start offsets of every occurrence of
    /// the pattern in `reference`, in increasing order.
    ///
    /// Occurrences may overlap: after each full match the scan resumes
    /// from the longest prefix that is also a suffix of the pattern, so
    /// no candidate position is skipped. The iterator scans on demand
    /// and holds no more state than the current alignment.
    pub fn occurrences<'a>(&'a self, reference: &'a str) -> Occurrences<'a> {
        Occurrences {
            pattern: &self.pattern,
            table: &self.table,
            reference: reference.as_bytes(),
            pos: 0,
            matched: 0,
        }
    }

    /// Finds all occurrences of the pattern in `reference` and returns
    /// them as match records
    pub fn find_matches(&self, reference: &str) -> Vec<MatchRecord> {
        let m = self.pattern.len();
        self.occurrences(reference)
            .map(|start| MatchRecord {
                pattern_id: self.pattern_id.clone(),
                start,
                end: start + m,
            })
            .collect()
    }
}

/// Lazy iterator over match start offsets, created by
/// [`PatternMatcher::occurrences`]
#[derive(Debug)]
pub struct Occurrences<'a> {
    pattern: &'a [u8],
    table: &'a [usize],
    reference: &'a [u8],
    pos: usize,
    matched: usize,
}

impl Iterator for Occurrences<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let m = self.pattern.len();
        while self.pos < self.reference.len() {
            let byte = self.reference[self.pos];
            while self.matched > 0 && byte != self.pattern[self.matched] {
                self.matched = self.table[self.matched - 1];
            }
            if byte == self.pattern[self.matched] {
                self.matched += 1;
            }
            self.pos += 1;
            if self.matched == m {
                // Fall back as after a mismatch so overlapping
                // occurrences are still found
                self.matched = self.table[m - 1];
                return Some(self.pos - m);
            }
        }
        None
    }
}
