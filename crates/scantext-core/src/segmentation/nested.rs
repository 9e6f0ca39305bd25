//! Removal of boxes fully contained inside another box.
//!
//! After merging, a small region can survive inside a larger merged block;
//! recognizing it again would duplicate its text in the output. The pairwise
//! scan below keeps only the outermost boxes.

use crate::types::BoundingBox;

/// Drops every box that lies fully inside some other box in the slice.
///
/// Containment is closed on all four edges, so a box sharing an edge with
/// its container still counts as nested. Two identical boxes contain each
/// other and are both dropped. The relative order of survivors is the
/// order of the input.
#[must_use = "filtered boxes are returned but not used"]
pub fn remove_nested(boxes: &[BoundingBox]) -> Vec<BoundingBox> {
    boxes
        .iter()
        .enumerate()
        .filter(|&(i, bbox)| {
            !boxes
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && bbox.contained_in(other))
        })
        .map(|(_, &bbox)| bbox)
        .collect()
}
