//! Connection-count normalization.
//!
//! Turns a caller-requested connection limit into a count that is safe for a
//! given resource size: never more connections than addressable byte
//! boundaries, never a degenerate single-byte range plan.

/// Returns the effective connection count for `data_size` bytes given the
/// caller's `requested` limit and the smallest size worth splitting at all.
///
/// Total over all integer inputs, including negative `data_size` (a probe
/// sentinel); callers validate size before planning ranges. Zero or negative
/// `requested` means "no meaningful limit" and yields a single connection.
pub fn normalize_connections(data_size: i64, requested: i64, min_split: i64) -> i64 {
    // Too small to be worth splitting, or no usable limit: one connection.
    let too_small = min_split >= 2 && min_split > data_size;
    if too_small || requested < 1 {
        return 1;
    }

    // A connection per byte would produce single-byte ranges; back off by one.
    if data_size == requested {
        return requested - 1;
    }

    let mut effective = requested;
    if data_size < requested {
        // Cannot use more connections than byte boundaries allow.
        effective = data_size - 1;
    }

    if effective == 0 {
        // Size too small to split at all.
        return 1;
    }
    effective
}
