//! Core data model for page segmentation.
//!
//! All coordinates are page pixel coordinates with the origin at the top-left
//! corner. Boxes and groups are transient: they are created and consumed while
//! processing a single page and never outlive it.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned candidate or merged text region.
///
/// `(x, y)` is the top-left corner; `width` and `height` extend right and
/// down. All fields are non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Create a new bounding box.
    #[inline]
    #[must_use = "bounding box is created but not used"]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge coordinate (exclusive of the box when iterating pixels).
    #[inline]
    #[must_use = "right coordinate is computed but not used"]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge coordinate.
    #[inline]
    #[must_use = "bottom coordinate is computed but not used"]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Full containment test: every point of `self` lies within `other`.
    ///
    /// Inequalities are closed on all four sides, so a box is contained in an
    /// identical copy of itself. Callers that iterate over pairs must exclude
    /// the pair `(i, i)` by index, not by value.
    #[inline]
    #[must_use = "containment test result is not used"]
    pub const fn contained_in(&self, other: &Self) -> bool {
        self.x >= other.x
            && self.y >= other.y
            && self.right() <= other.right()
            && self.bottom() <= other.bottom()
    }

    /// Minimal enclosing rectangle of `self` and `other`.
    #[inline]
    #[must_use = "union box is computed but not used"]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

/// One rasterized document page: a zero-based index plus an RGB raster.
///
/// Pages are immutable once produced by the rasterizer collaborator; the
/// pipeline crops regions from `image` but never mutates it.
#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub image: RgbImage,
}

impl Page {
    #[inline]
    #[must_use = "page is created but not used"]
    pub const fn new(index: usize, image: RgbImage) -> Self {
        Self { index, image }
    }
}

/// An ordered run of boxes believed to belong to one visual row or paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionGroup {
    pub members: Vec<BoundingBox>,
}

impl RegionGroup {
    #[inline]
    #[must_use = "group emptiness is checked but not used"]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Collapse the group into its output boxes.
    ///
    /// Single-member groups pass through unchanged. Multi-member groups merge
    /// into one union rectangle only when the height spread across members is
    /// at most `max_height_spread`; otherwise the members are emitted
    /// individually (the grouping heuristic failed to find a consistent
    /// block, so we degrade to the original boxes).
    #[must_use = "collapsed boxes are returned but not used"]
    pub fn collapse(self, max_height_spread: u32) -> Vec<BoundingBox> {
        if self.members.len() <= 1 {
            return self.members;
        }

        let mut min_height = u32::MAX;
        let mut max_height = 0u32;
        for member in &self.members {
            min_height = min_height.min(member.height);
            max_height = max_height.max(member.height);
        }

        if max_height - min_height > max_height_spread {
            return self.members;
        }

        let mut merged = self.members[0];
        for member in &self.members[1..] {
            merged = merged.union(member);
        }
        vec![merged]
    }
}
