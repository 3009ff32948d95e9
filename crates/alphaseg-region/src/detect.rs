//! Region detection
//!
//! Finds every maximal connected set of foreground pixels (opacity
//! strictly above a threshold) and reports its bounding rectangle.
//!
//! The scan is a single row-major pass over the grid. Each unvisited
//! foreground pixel seeds a queue-based flood fill; a flat visited mask
//! guarantees that no pixel is processed twice across the whole scan, so
//! the cost is O(width * height) regardless of how many regions there
//! are. Regions come out in the order their first pixel is met by the
//! scan (top-to-bottom, then left-to-right).

use crate::error::{RegionError, RegionResult};
use alphaseg_core::cancel::is_cancelled;
use alphaseg_core::{AlphaView, CancelFlag, Region};
use std::collections::VecDeque;
use tracing::debug;

/// Default opacity threshold: pixels with alpha > 10 are foreground
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 10;

/// Connectivity type for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbour offsets `(dx, dy)` for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ];
        match self {
            Self::FourWay => &FOUR,
            Self::EightWay => &EIGHT,
        }
    }
}

/// Options for region detection
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Pixels with opacity strictly greater than this are foreground
    pub alpha_threshold: u8,
    /// Connectivity used when growing a region
    pub connectivity: ConnectivityType,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            connectivity: ConnectivityType::EightWay,
        }
    }
}

impl DetectOptions {
    /// Create options with the given threshold and 8-way connectivity
    pub fn new(alpha_threshold: u8) -> Self {
        Self {
            alpha_threshold,
            ..Self::default()
        }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// One flag per pixel, row-major, for a single detection run.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    width: u32,
    bits: Vec<bool>,
}

impl VisitedMask {
    /// Create an all-unvisited mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            bits: vec![false; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether (x, y) has been visited
    #[inline]
    pub fn is_visited(&self, x: u32, y: u32) -> bool {
        self.bits[self.index(x, y)]
    }

    /// Mark (x, y) visited. Returns `false` if it already was.
    #[inline]
    pub fn mark(&mut self, x: u32, y: u32) -> bool {
        let idx = self.index(x, y);
        !std::mem::replace(&mut self.bits[idx], true)
    }

    /// Number of visited pixels
    pub fn count_visited(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Detect 8-connected foreground regions.
///
/// A pixel is foreground when its opacity is strictly greater than
/// `alpha_threshold`, so a threshold of 255 never finds anything.
///
/// # Errors
///
/// Returns [`RegionError::Cancelled`] if `cancel` is set during the scan.
/// No partial result is returned in that case.
///
/// # Examples
///
/// ```
/// use alphaseg_core::{AlphaPlane, Region};
/// use alphaseg_region::detect_regions;
///
/// let plane = AlphaPlane::from_ascii(&[
///     "#...",
///     ".#..",
///     "...#",
/// ]).unwrap();
///
/// let regions = detect_regions(&plane, 10, None).unwrap();
/// assert_eq!(regions, vec![
///     Region::new_unchecked(0, 0, 2, 2),
///     Region::new_unchecked(3, 2, 1, 1),
/// ]);
/// ```
pub fn detect_regions<G: AlphaView + ?Sized>(
    grid: &G,
    alpha_threshold: u8,
    cancel: Option<&CancelFlag>,
) -> RegionResult<Vec<Region>> {
    detect_regions_with(grid, &DetectOptions::new(alpha_threshold), cancel)
}

/// Detect foreground regions with explicit options.
///
/// See [`detect_regions`].
pub fn detect_regions_with<G: AlphaView + ?Sized>(
    grid: &G,
    options: &DetectOptions,
    cancel: Option<&CancelFlag>,
) -> RegionResult<Vec<Region>> {
    let width = grid.width();
    let height = grid.height();
    let threshold = options.alpha_threshold;
    let offsets = options.connectivity.offsets();

    let mut visited = VisitedMask::new(width, height);
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if is_cancelled(cancel) {
                debug!(x, y, "detection cancelled during scan");
                return Err(RegionError::Cancelled);
            }
            if !visited.mark(x, y) {
                continue;
            }
            if grid.alpha(x, y) <= threshold {
                continue;
            }

            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            queue.push_back((x, y));

            while let Some((px, py)) = queue.pop_front() {
                if is_cancelled(cancel) {
                    debug!(x = px, y = py, "detection cancelled during fill");
                    return Err(RegionError::Cancelled);
                }

                min_x = min_x.min(px);
                max_x = max_x.max(px);
                min_y = min_y.min(py);
                max_y = max_y.max(py);

                for &(dx, dy) in offsets {
                    let nx = px as i64 + dx as i64;
                    let ny = py as i64 + dy as i64;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    if visited.mark(nx, ny) && grid.alpha(nx, ny) > threshold {
                        queue.push_back((nx, ny));
                    }
                }
            }

            regions.push(Region::from_extents(min_x, min_y, max_x, max_y));
        }
    }

    debug!(
        width,
        height,
        threshold,
        regions = regions.len(),
        "region detection finished"
    );
    Ok(regions)
}
