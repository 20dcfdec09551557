//! Chunk planning: split a resource into contiguous byte ranges.

use crate::transport::ByteRange;

/// One planned unit of work: a contiguous byte sub-range tagged with its
/// ordinal position in the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk's bytes in the reassembled payload.
    pub index: usize,
    /// Inclusive byte range to request.
    pub range: ByteRange,
}

/// Splits `data_size` bytes into `connections` chunks of equal width; the last
/// chunk absorbs the integer-division remainder.
///
/// When the size is too small relative to the connection count (per-chunk
/// width would be zero) or the count is not positive, the plan collapses to a
/// single chunk covering the whole resource. Callers guarantee
/// `data_size >= 1`. The returned ranges cover `[0, data_size-1]` exactly
/// once, in order, with no gaps or overlaps.
pub fn plan_chunks(data_size: i64, connections: i64) -> Vec<Chunk> {
    let whole = vec![Chunk {
        index: 0,
        range: ByteRange {
            start: 0,
            end: (data_size - 1).max(0) as u64,
        },
    }];

    if connections < 1 {
        return whole;
    }

    let buffer = data_size / connections;
    if buffer == 0 {
        // Too small to break into ranged requests; fetch in one go.
        return whole;
    }
    let remainder = data_size % connections;

    let mut out = Vec::with_capacity(connections as usize);
    for i in 0..connections {
        let start = buffer * i;
        let mut end = buffer * (i + 1) - 1;
        if i == connections - 1 {
            end += remainder;
        }
        out.push(Chunk {
            index: i as usize,
            range: ByteRange {
                start: start as u64,
                end: end as u64,
            },
        });
    }
    out
}
