//! Synchronized CSV output sink.
//!
//! All worker tasks share one [`CsvSink`]. A single `std::sync::Mutex`
//! guards the writer, and `append` is the only operation taken while
//! workers run: lock, write one serialized record, unlock. Rows are
//! serialized before the lock is taken, so the critical section is a
//! single buffered write. Because this mutex is the only lock in the
//! system and is never held across another blocking call, lock ordering
//! issues cannot arise.
//!
//! Once a write fails the sink latches: the failed row is reported to
//! its producer and every later `append` returns an error without
//! touching the writer. Records appended before the failure remain
//! valid output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::{debug, error};

use crate::errors::{ScanError, ScanResult};
use crate::results::MatchRecord;

/// Header row written before any record
pub const CSV_HEADER: &str = "pattern,start,end";

/// Thread-safe writer for match records in CSV form
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: Mutex<W>,
    // Advisory fail-fast flag; the mutex itself orders writer state
    failed: AtomicBool,
    records_written: AtomicU64,
}

impl CsvSink<BufWriter<File>> {
    /// Creates a sink writing to a new file at `path`
    pub fn create(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScanError::file_not_found(path),
            io::ErrorKind::PermissionDenied => ScanError::permission_denied(path),
            _ => ScanError::IoError(e),
        })?;
        debug!("Created result sink at {}", path.display());
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps a writer and emits the CSV header row
    pub fn new(mut writer: W) -> ScanResult<Self> {
        writer
            .write_all(format!("{CSV_HEADER}\n").as_bytes())
            .map_err(ScanError::SinkWrite)?;
        Ok(Self {
            writer: Mutex::new(writer),
            failed: AtomicBool::new(false),
            records_written: AtomicU64::new(0),
        })
    }

    /// Appends one record as a single CSV row.
    ///
    /// Safe to call from any number of threads. The row is written in
    /// one call under the lock, so rows from concurrent appends never
    /// interleave. Fails fast without writing once an earlier append
    /// has failed.
    pub fn append(&self, record: &MatchRecord) -> ScanResult<()> {
        if self.failed.load(Ordering::Relaxed) {
            return Err(ScanError::SinkWrite(io::Error::new(
                io::ErrorKind::Other,
                "sink disabled after earlier write failure",
            )));
        }

        let row = format!("{},{},{}\n", record.pattern_id, record.start, record.end);

        let mut writer = self.writer.lock().map_err(|_| ScanError::SinkPoisoned)?;
        match writer.write_all(row.as_bytes()) {
            Ok(()) => {
                self.records_written.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(e) => {
                self.failed.store(true, Ordering::Relaxed);
                error!("Result sink write failed: {}", e);
                Err(ScanError::SinkWrite(e))
            }
        }
    }

    /// Number of records successfully appended so far
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    /// True once a write has failed and the sink stopped accepting rows
    pub fn is_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    /// Flushes and returns the inner writer.
    ///
    /// Consumes the sink, so no append can race the flush. After a
    /// successful `finish` every appended record has reached the
    /// underlying writer.
    pub fn finish(self) -> ScanResult<W> {
        let written = self.records_written();
        let mut writer = self.writer.into_inner().map_err(|_| ScanError::SinkPoisoned)?;
        writer.flush().map_err(ScanError::SinkWrite)?;
        debug!("Result sink closed with {} records", written);
        Ok(writer)
    }
}
