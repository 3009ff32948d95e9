//! Region selection by size
//!
//! Drops regions whose bounding rectangle is too small to be worth
//! exporting (stray pixels, compression noise). Survivors keep their
//! relative order.

use alphaseg_core::Region;
use tracing::debug;

/// Keep regions with `width >= min_width && height >= min_height`.
///
/// Order-preserving and idempotent. Bounds below 1 are not rejected
/// here; they simply keep everything.
///
/// # Examples
///
/// ```
/// use alphaseg_core::Region;
/// use alphaseg_region::select_by_size;
///
/// let regions = vec![
///     Region::new_unchecked(0, 0, 5, 5),
///     Region::new_unchecked(9, 9, 1, 1),
///     Region::new_unchecked(20, 0, 3, 8),
/// ];
/// let kept = select_by_size(&regions, 3, 3);
/// assert_eq!(kept, vec![regions[0], regions[2]]);
/// ```
pub fn select_by_size(regions: &[Region], min_width: u32, min_height: u32) -> Vec<Region> {
    let kept: Vec<Region> = regions
        .iter()
        .filter(|r| r.width >= min_width && r.height >= min_height)
        .copied()
        .collect();

    debug!(
        min_width,
        min_height,
        before = regions.len(),
        after = kept.len(),
        "size selection"
    );
    kept
}
