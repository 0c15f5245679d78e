//! Block timing statistics shown on explorer dashboards.

/// Average interval between blocks, in the unit of the timestamps.
///
/// Computes `(last_timestamp - first_timestamp) / block_count`, truncated
/// toward zero. Returns `None` when `block_count` is zero or the difference
/// does not fit in `i64`.
pub fn average_block_interval(
    last_timestamp: i64,
    first_timestamp: i64,
    block_count: u64,
) -> Option<i64> {
    if block_count == 0 {
        return None;
    }
    let span = last_timestamp.checked_sub(first_timestamp)?;
    let count = i64::try_from(block_count).ok()?;
    span.checked_div(count)
}
