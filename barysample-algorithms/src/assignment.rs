//! Expansion of per-triangle counts into per-sample triangle ids

use crate::allocation::SampleAllocation;
use barysample_core::Result;

/// Map every sample to its owning triangle.
///
/// Triangle `i` appears `allocation[i]` consecutive times, in ascending
/// triangle order, so samples of one triangle always form a contiguous run.
pub fn expand(allocation: &SampleAllocation) -> Vec<usize> {
    let mut triangle_ids = Vec::with_capacity(allocation.total());
    for (triangle, &count) in allocation.counts().iter().enumerate() {
        triangle_ids.extend(std::iter::repeat(triangle).take(count));
    }
    triangle_ids
}

/// Like [`expand`], for counts that have not been validated yet
pub fn expand_signed(counts: &[i64]) -> Result<Vec<usize>> {
    Ok(expand(&SampleAllocation::try_from_signed(counts)?))
}
