//! Fragment reassembly: order by chunk index and concatenate.

use crate::error::{DownloadError, Inconsistency};
use crate::fetch::Fragment;

/// Reassembles `fragments` into the original byte sequence.
///
/// Fragments arrive in completion order; they are sorted by chunk index and
/// validated to form the contiguous index set `[0, expected)`. A duplicate or
/// missing index means the plan or the collection step is buggy, which is
/// reported as [`DownloadError::ConsistencyViolation`] rather than tolerated.
pub(crate) fn assemble(
    mut fragments: Vec<Fragment>,
    expected: usize,
) -> Result<Vec<u8>, DownloadError> {
    fragments.sort_by_key(|f| f.index);

    for (position, fragment) in fragments.iter().enumerate() {
        if fragment.index == position {
            continue;
        }
        let kind = if position > 0 && fragment.index == fragments[position - 1].index {
            Inconsistency::Duplicate {
                index: fragment.index,
            }
        } else {
            Inconsistency::Missing { index: position }
        };
        return Err(DownloadError::ConsistencyViolation(kind));
    }
    if fragments.len() != expected {
        return Err(DownloadError::ConsistencyViolation(Inconsistency::Count {
            expected,
            actual: fragments.len(),
        }));
    }

    let total: usize = fragments.iter().map(|f| f.data.len()).sum();
    let mut body = Vec::with_capacity(total);
    for fragment in fragments {
        body.extend_from_slice(&fragment.data);
    }
    Ok(body)
}
