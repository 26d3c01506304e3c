//! Collision-free index offsets for generated variants.

/// Smallest offset ever handed out.
pub const BASE_OFFSET: u64 = 1_000_000;

/// Compute the offset added (times the shift amount) to each variant index.
///
/// Starts at one million and multiplies by 10 until it strictly exceeds the
/// maximum original index, so no shifted index can land in the original
/// range. The shift ranges themselves (`offset`, `2*offset`, `3*offset`) are
/// disjoint because no bucket produces more than 3 variants per row.
pub fn compute_offset(max_index: u64) -> u64 {
    let mut offset = BASE_OFFSET;
    while max_index >= offset {
        offset *= 10;
    }
    offset
}
