//! Candidate region extraction from the binary mask.
//!
//! Contours are found with a two-level hierarchy (outer boundaries and inner
//! holes), reduced to axis-aligned bounding rectangles, ordered top-to-bottom
//! and filtered by the size retention rule. An empty mask yields an empty
//! sequence, which is valid: the page is judged to contain no text.

#![allow(clippy::cast_possible_truncation)]

use image::GrayImage;
use imageproc::contours::{find_contours, Contour};
use serde::{Deserialize, Serialize};

use crate::types::BoundingBox;

/// Size retention rule for candidate boxes. A box survives only if
/// `min_height < height < max_height` and `width > min_width`; anything else
/// is ruling, page-edge noise, or a stray speck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourConfig {
    /// Exclusive lower bound on region height.
    pub min_height: u32,
    /// Exclusive upper bound on region height.
    pub max_height: u32,
    /// Exclusive lower bound on region width.
    pub min_width: u32,
}

impl Default for ContourConfig {
    #[inline]
    fn default() -> Self {
        Self {
            min_height: 50,
            max_height: 1540,
            min_width: 10,
        }
    }
}

impl ContourConfig {
    /// Whether a candidate box passes the retention rule.
    #[inline]
    #[must_use = "retention test result is not used"]
    pub const fn retains(&self, bbox: &BoundingBox) -> bool {
        bbox.height > self.min_height && bbox.height < self.max_height && bbox.width > self.min_width
    }
}

/// Extract candidate text regions from a binary mask.
///
/// Output is sorted ascending by top-edge y coordinate; this fixes the
/// convention that reading order follows vertical position. The sort is
/// stable, so boxes sharing a top edge keep their discovery order.
#[must_use = "extracted regions are returned but not used"]
pub fn extract_regions(mask: &GrayImage, config: &ContourConfig) -> Vec<BoundingBox> {
    let contours: Vec<Contour<u32>> = find_contours(mask);

    let mut boxes: Vec<BoundingBox> = contours
        .iter()
        .filter_map(|contour| bounding_rect(contour))
        .collect();

    boxes.sort_by_key(|bbox| bbox.y);
    boxes.retain(|bbox| config.retains(bbox));
    boxes
}

/// Axis-aligned bounding rectangle of one contour, or `None` for an empty
/// point set.
fn bounding_rect(contour: &Contour<u32>) -> Option<BoundingBox> {
    let first = contour.points.first()?;
    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);

    for point in &contour.points[1..] {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }

    Some(BoundingBox::new(
        min_x,
        min_y,
        max_x - min_x + 1,
        max_y - min_y + 1,
    ))
}
