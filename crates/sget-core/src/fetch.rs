//! Concurrent fragment fetching: one worker thread per planned chunk.
//!
//! Workers push their result into an mpsc channel that is drained after the
//! join barrier, so failure recording needs no shared mutable slot. The first
//! failure (in completion order) is the representative one; a shared flag lets
//! not-yet-started workers skip their request once failure is certain.

use crate::error::DownloadError;
use crate::transport::{ByteRange, Transport, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// The bytes retrieved for one chunk, tagged with the chunk's ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub index: usize,
    pub data: Vec<u8>,
}

/// One unit of fetch work. `range: None` is a full-body GET (used when the
/// origin does not support ranged requests).
#[derive(Debug, Clone, Copy)]
pub(crate) struct FetchRequest {
    pub index: usize,
    pub range: Option<ByteRange>,
}

/// Runs all `requests` concurrently against `transport` and collects the
/// resulting fragments in completion order.
///
/// All spawned workers are joined before results are inspected. If any worker
/// failed, completed fragments are discarded and the first recorded failure is
/// returned.
pub(crate) fn fetch_fragments(
    transport: &Arc<dyn Transport>,
    url: &str,
    requests: Vec<FetchRequest>,
) -> Result<Vec<Fragment>, DownloadError> {
    let cancelled = Arc::new(AtomicBool::new(false));
    fetch_with_cancel(transport, url, requests, &cancelled)
}

fn fetch_with_cancel(
    transport: &Arc<dyn Transport>,
    url: &str,
    requests: Vec<FetchRequest>,
    cancelled: &Arc<AtomicBool>,
) -> Result<Vec<Fragment>, DownloadError> {
    let (tx, rx) = mpsc::channel::<(usize, Result<Vec<u8>, TransportError>)>();

    let mut handles = Vec::with_capacity(requests.len());
    for request in requests {
        let transport = Arc::clone(transport);
        let url = url.to_string();
        let tx = tx.clone();
        let cancelled = Arc::clone(cancelled);
        handles.push(thread::spawn(move || {
            if cancelled.load(Ordering::Acquire) {
                // A sibling already failed; this fetch cannot matter.
                return;
            }
            let result = transport.fetch(&url, request.range);
            if result.is_err() {
                cancelled.store(true, Ordering::Release);
            }
            let _ = tx.send((request.index, result));
        }));
    }
    drop(tx);

    // Join barrier: every dispatched worker runs to completion.
    for handle in handles {
        handle
            .join()
            .unwrap_or_else(|e| panic!("fetch worker panicked: {:?}", e));
    }

    let mut fragments = Vec::new();
    let mut failure: Option<DownloadError> = None;
    for (index, result) in rx {
        match result {
            Ok(data) => fragments.push(Fragment { index, data }),
            Err(e) => {
                tracing::warn!(index, error = %e, "chunk fetch failed");
                if failure.is_none() {
                    failure = Some(DownloadError::FetchFailed { index, source: e });
                }
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(fragments),
    }
}
