//! Test region geometry and rectangle extraction
//!
//! Covers the pieces the export pipeline relies on when it crops a
//! detected region out of the source image.

use alphaseg_core::{AlphaPlane, AlphaView, Region, RgbaImage, color};

/// Image where every pixel encodes its own coordinates
fn coord_image(w: u32, h: u32) -> RgbaImage {
    let mut img = RgbaImage::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            img.set_pixel_unchecked(x, y, color::compose_rgba(x as u8, y as u8, 0, 255));
        }
    }
    img
}

// ============================================================================
// clip_region
// ============================================================================

#[test]
fn test_clip_copies_exact_pixels() {
    let img = coord_image(20, 15);
    let region = Region::new(3, 4, 6, 5).unwrap();
    let crop = img.clip_region(&region).unwrap();
    assert_eq!((crop.width(), crop.height()), (6, 5));
    for y in 0..5 {
        for x in 0..6 {
            let (r, g, _, a) = crop.get_rgba(x, y).unwrap();
            assert_eq!((r, g, a), ((x + 3) as u8, (y + 4) as u8, 255));
        }
    }
}

#[test]
fn test_clip_whole_image_is_identity() {
    let img = coord_image(7, 3);
    let crop = img.clip_region(&Region::new_unchecked(0, 0, 7, 3)).unwrap();
    assert_eq!(crop, img);
}

#[test]
fn test_clip_hanging_off_edge() {
    let img = coord_image(10, 10);
    let crop = img.clip_region(&Region::new_unchecked(8, 9, 5, 5)).unwrap();
    assert_eq!((crop.width(), crop.height()), (2, 1));
    assert_eq!(crop.get_rgba(1, 0).map(|p| (p.0, p.1)), Some((9, 9)));
}

#[test]
fn test_clip_rejects_degenerate() {
    let img = coord_image(10, 10);
    assert!(img.clip_region(&Region::new_unchecked(2, 2, 0, 4)).is_err());
    assert!(img.clip_region(&Region::new_unchecked(10, 0, 1, 1)).is_err());
    assert!(img.clip_region(&Region::new_unchecked(0, 12, 3, 3)).is_err());
}

#[test]
fn test_clip_keeps_transparency() {
    let mut img = RgbaImage::new(6, 6).unwrap();
    img.fill_rect(1, 1, 3, 3, 0xffffffff);
    img.set_pixel(2, 2, 0x00000000).unwrap();
    let crop = img.clip_region(&Region::new_unchecked(1, 1, 3, 3)).unwrap();
    let plane = AlphaPlane::from_image(&crop);
    assert_eq!(plane.alpha(1, 1), 0);
    assert_eq!(plane.pixel_count(), 9);
    assert_eq!(plane.values().iter().filter(|&&a| a == 255).count(), 8);
}

// ============================================================================
// Region geometry
// ============================================================================

#[test]
fn test_extents_and_edges() {
    let r = Region::from_extents(4, 2, 4, 2);
    assert_eq!(r, Region::new_unchecked(4, 2, 1, 1));
    assert_eq!((r.right(), r.bottom()), (5, 3));

    let r = Region::from_extents(1, 2, 8, 3);
    assert_eq!((r.width, r.height, r.area()), (8, 2, 16));
}

#[test]
fn test_bounding_boxes_may_overlap() {
    // An L-shape and a dot inside its bounding box
    let l_shape = Region::new_unchecked(0, 0, 5, 5);
    let dot = Region::new_unchecked(3, 1, 1, 1);
    assert!(l_shape.overlaps(&dot));
    assert!(l_shape.contains_region(&dot));
    assert_eq!(l_shape.intersect(&dot), Some(dot));
    assert_eq!(l_shape.union(&dot), l_shape);
}

#[test]
fn test_disjoint_regions() {
    let a = Region::new_unchecked(0, 0, 2, 2);
    let b = Region::new_unchecked(2, 0, 2, 2);
    assert!(!a.overlaps(&b));
    assert_eq!(a.intersect(&b), None);
    assert_eq!(a.union(&b), Region::new_unchecked(0, 0, 4, 2));
}

#[test]
fn test_display() {
    assert_eq!(Region::new_unchecked(8, 9, 2, 3).to_string(), "2x3+8+9");
}
