//! Concurrent pattern search over a single reference sequence.
//!
//! # Decomposition
//!
//! The unit of parallelism is the pattern, not the reference. Every
//! pattern becomes one task that runs a full KMP pass over the shared
//! reference:
//!
//! ```rust,ignore
//! let outcomes: Vec<_> = patterns
//!     .par_iter()
//!     .map(|pattern| scan_pattern(reference, pattern, sink))
//!     .collect();
//! ```
//!
//! Tasks are scheduled on a dedicated Rayon pool sized by the
//! configured thread count, so a scan never competes with (or leaks
//! into) the global pool. The reference is borrowed immutably by all
//! workers at once; no task ever copies or mutates it, and no task
//! communicates with another.
//!
//! # Shared state
//!
//! The only shared mutable resource is the result sink, which
//! serializes appends internally (see [`crate::sink`]). A worker
//! therefore needs no coordination beyond calling `append`, and a
//! pattern whose construction fails is reported in the run summary
//! without affecting its siblings.
//!
//! # Cost model
//!
//! One task per pattern keeps the work linear: each worker does
//! O(|reference| + |pattern|) work, and a scan of p patterns does
//! O(p * |reference|) total regardless of thread count.

pub mod engine;
pub mod matcher;

pub use engine::{scan, scan_reference};
pub use matcher::{prefix_table, Occurrences, PatternMatcher};
