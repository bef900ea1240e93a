//! Minimal FASTA input and random sequence generation.
//!
//! The parser is permissive and suitable for the small reference and
//! pattern files this tool works with: `>` lines begin a record, every
//! other line is sequence data. Sequences are uppercased here, which is
//! the only place case handling happens; matching downstream is exact.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::errors::{ScanError, ScanResult};

const NUCLEOTIDES: [u8; 4] = *b"ATCG";

/// A single FASTA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// First whitespace-delimited token of the header line
    pub id: String,
    /// Uppercased sequence letters, joined across lines
    pub sequence: String,
}

/// Parses FASTA text into records.
///
/// `source` is only used in error messages. Sequence data before the
/// first header is rejected; everything else is taken as-is.
pub fn parse_fasta(text: &str, source: impl AsRef<Path>) -> ScanResult<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for (index, line) in text.lines().enumerate() {
        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(FastaRecord {
                id: header.split_whitespace().next().unwrap_or("").to_string(),
                sequence: String::new(),
            });
        } else {
            let data = line.trim();
            if data.is_empty() {
                continue;
            }
            match current {
                Some(ref mut record) => record.sequence.push_str(&data.to_ascii_uppercase()),
                None => {
                    return Err(ScanError::fasta_parse(
                        source.as_ref(),
                        index + 1,
                        "sequence data before the first '>' header",
                    ))
                }
            }
        }
    }
    if let Some(record) = current.take() {
        records.push(record);
    }

    Ok(records)
}

/// Reads a FASTA file and concatenates all record sequences into the
/// single reference string
pub fn read_genome(path: impl AsRef<Path>) -> ScanResult<String> {
    let path = path.as_ref();
    let records = read_records(path)?;

    let mut genome = String::with_capacity(records.iter().map(|r| r.sequence.len()).sum());
    for record in &records {
        genome.push_str(&record.sequence);
    }
    info!("Loaded genome ({} bp) from {}", genome.len(), path.display());
    Ok(genome)
}

/// Reads a FASTA file of pattern sequences.
///
/// Record ids are kept as labels for the output; they are not required
/// to be unique.
pub fn read_patterns(path: impl AsRef<Path>) -> ScanResult<Vec<FastaRecord>> {
    let path = path.as_ref();
    let records = read_records(path)?;
    debug!("Loaded {} patterns from {}", records.len(), path.display());
    Ok(records)
}

fn read_records(path: &Path) -> ScanResult<Vec<FastaRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::file_not_found(path),
        io::ErrorKind::PermissionDenied => ScanError::permission_denied(path),
        _ => ScanError::IoError(e),
    })?;

    let records = parse_fasta(&content, path)?;
    if records.is_empty() {
        return Err(ScanError::empty_fasta(path));
    }
    Ok(records)
}

/// Options for [`generate_random_fasta`]
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Number of records to write
    pub count: usize,
    /// Minimum sequence length, at least 1
    pub min_len: usize,
    /// Maximum sequence length, at least `min_len`
    pub max_len: usize,
    /// Fixed RNG seed for reproducible output
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            count: 100,
            min_len: 5,
            max_len: 20,
            seed: None,
        }
    }
}

/// Writes `options.count` random nucleotide records to a FASTA file at
/// `path`, with ids `seq1` through `seqN` and lengths drawn uniformly
/// from `[min_len, max_len]`
pub fn generate_random_fasta(path: impl AsRef<Path>, options: &GenerateOptions) -> ScanResult<()> {
    if options.min_len == 0 || options.min_len > options.max_len {
        return Err(ScanError::InvalidLengthRange {
            min: options.min_len,
            max: options.max_len,
        });
    }

    let path = path.as_ref();
    let file = File::create(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::file_not_found(path),
        io::ErrorKind::PermissionDenied => ScanError::permission_denied(path),
        _ => ScanError::IoError(e),
    })?;
    let mut writer = BufWriter::new(file);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for i in 0..options.count {
        let length = rng.gen_range(options.min_len..=options.max_len);
        let sequence: String = (0..length)
            .map(|_| NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())] as char)
            .collect();
        writeln!(writer, ">seq{}\n{}", i + 1, sequence)?;
    }
    writer.flush()?;

    info!(
        "Generated {} random sequences in {}",
        options.count,
        path.display()
    );
    Ok(())
}
