pub mod config;
pub mod errors;
pub mod fasta;
pub mod results;
pub mod search;
pub mod sink;

pub use config::ScanConfig;
pub use errors::{ScanError, ScanResult};
pub use fasta::{FastaRecord, GenerateOptions};
pub use results::{MatchRecord, PatternFailure, PatternHits, ScanSummary};
pub use search::{scan, scan_reference, PatternMatcher};
pub use sink::CsvSink;
