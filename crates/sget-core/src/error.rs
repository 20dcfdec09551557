//! Error types for the download pipeline.

use crate::transport::TransportError;
use thiserror::Error;

/// Top-level error returned by [`crate::DownloadManager`].
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HEAD probe failed: either the transport itself errored, or the origin
    /// answered with a non-200 status.
    #[error("probe failed{}", status_suffix(.status))]
    ProbeFailed {
        /// Observed HTTP status, if the probe got far enough to see one.
        status: Option<u32>,
        #[source]
        source: Option<TransportError>,
    },

    /// `change_client` was given no transport.
    #[error("no transport supplied")]
    InvalidTransport,

    /// One of the chunk fetches failed (transport error, non-2xx status, or
    /// unreadable body). Carries the first failure observed.
    #[error("chunk {index} fetch failed")]
    FetchFailed {
        index: usize,
        #[source]
        source: TransportError,
    },

    /// Fragment indices did not form a contiguous `[0, n)` set during
    /// reassembly. Indicates a planning or collection bug, not an origin fault.
    #[error("fragment consistency violation: {0}")]
    ConsistencyViolation(Inconsistency),
}

/// What exactly went wrong with the fragment index set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    Duplicate { index: usize },
    Missing { index: usize },
    Count { expected: usize, actual: usize },
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inconsistency::Duplicate { index } => write!(f, "duplicate index {}", index),
            Inconsistency::Missing { index } => write!(f, "missing index {}", index),
            Inconsistency::Count { expected, actual } => {
                write!(f, "expected {} fragments, collected {}", expected, actual)
            }
        }
    }
}

fn status_suffix(status: &Option<u32>) -> String {
    match status {
        Some(code) => format!(": HTTP {}", code),
        None => String::new(),
    }
}
