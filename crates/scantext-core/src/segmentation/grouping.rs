//! Grouping of adjacent candidate boxes into paragraph-level blocks.
//!
//! A single left-to-right pass over the y-sorted candidates maintains one
//! open group. Two heuristics close it:
//! - Row break: a box whose vertical distance from the previous box exceeds
//!   half its own height starts a new row. Boxes that far apart, relative to
//!   their own scale, cannot belong to the same paragraph row.
//! - Height consistency: a box whose height differs from the most recently
//!   added member by more than the configured delta starts a new group.
//!
//! Closed groups then collapse into a single union rectangle when their
//! members' heights are consistent; inconsistent groups degrade back to
//! their original boxes. The output is a flat ordered sequence, no group
//! structure survives.

use serde::{Deserialize, Serialize};

use crate::types::{BoundingBox, RegionGroup};

/// Tunables for the grouping stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Maximum height difference between a box and the group's most recent
    /// member for the box to join the group.
    pub max_height_delta: u32,
    /// Maximum height spread across a group's members for the group to
    /// collapse into one merged box.
    pub max_height_spread: u32,
}

impl Default for GroupingConfig {
    #[inline]
    fn default() -> Self {
        Self {
            max_height_delta: 100,
            max_height_spread: 100,
        }
    }
}

/// Groups spatially and size-consistent adjacent regions into blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionGrouper {
    config: GroupingConfig,
}

impl RegionGrouper {
    #[inline]
    #[must_use = "grouper is created but not used"]
    pub fn new() -> Self {
        Self {
            config: GroupingConfig::default(),
        }
    }

    #[inline]
    #[must_use = "grouper is created but not used"]
    pub const fn with_config(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// Run the grouping pass and the merge step.
    ///
    /// The input must already be sorted ascending by y (the contour stage
    /// guarantees this). Given the same input, the output is always the
    /// same: there is no hidden randomness anywhere in the pass.
    #[must_use = "grouped boxes are returned but not used"]
    pub fn group(&self, boxes: &[BoundingBox]) -> Vec<BoundingBox> {
        let mut groups: Vec<RegionGroup> = Vec::new();
        let mut open = RegionGroup::default();

        for &bbox in boxes {
            if let Some(previous) = open.members.last() {
                // Row break: compare the vertical gap against half the
                // candidate's own height (integer form: 2 * gap > height).
                let gap = bbox.y.abs_diff(previous.y);
                if 2 * gap > bbox.height {
                    groups.push(std::mem::take(&mut open));
                }
            }

            match open.members.last() {
                Some(recent) if recent.height.abs_diff(bbox.height) > self.config.max_height_delta => {
                    groups.push(std::mem::take(&mut open));
                    open.members.push(bbox);
                }
                _ => open.members.push(bbox),
            }
        }

        if !open.is_empty() {
            groups.push(open);
        }

        groups
            .into_iter()
            .flat_map(|group| group.collapse(self.config.max_height_spread))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(RegionGrouper::new().group(&[]).is_empty());
    }

    #[test]
    fn test_single_box_passes_through() {
        let bbox = BoundingBox::new(10, 10, 200, 60);
        assert_eq!(RegionGrouper::new().group(&[bbox]), vec![bbox]);
    }

    #[test]
    fn test_row_break_splits_groups() {
        // Vertical gap 70 > 60 / 2: the second box starts a new row and the
        // two boxes must not merge.
        let boxes = [
            BoundingBox::new(10, 10, 200, 60),
            BoundingBox::new(10, 80, 200, 60),
        ];

        let grouped = RegionGrouper::new().group(&boxes);
        assert_eq!(grouped, boxes.to_vec());
    }

    #[test]
    fn test_same_row_merges() {
        // Gap 20 <= 60 / 2 and equal heights: one merged union box.
        let boxes = [
            BoundingBox::new(10, 10, 200, 60),
            BoundingBox::new(250, 30, 150, 60),
        ];

        let grouped = RegionGrouper::new().group(&boxes);
        assert_eq!(grouped, vec![BoundingBox::new(10, 10, 390, 80)]);
    }

    #[test]
    fn test_height_delta_closes_group() {
        // Small vertical gap but wildly different heights: the second box
        // opens a fresh group and nothing merges.
        let boxes = [
            BoundingBox::new(10, 10, 200, 400),
            BoundingBox::new(250, 20, 150, 60),
        ];

        let grouped = RegionGrouper::new().group(&boxes);
        assert_eq!(grouped, boxes.to_vec());
    }

    #[test]
    fn test_gap_exactly_half_height_stays_grouped() {
        // Gap 30 == 60 / 2 does not exceed half the height, so the row-break
        // heuristic does not fire.
        let boxes = [
            BoundingBox::new(10, 10, 200, 60),
            BoundingBox::new(10, 40, 200, 60),
        ];

        let grouped = RegionGrouper::new().group(&boxes);
        assert_eq!(grouped, vec![BoundingBox::new(10, 10, 200, 90)]);
    }

    #[test]
    fn test_inconsistent_group_degrades_to_members() {
        // All three land in one group via pairwise height deltas <= 100, but
        // the overall spread (160) blocks the merge, so the originals are
        // emitted individually.
        let boxes = [
            BoundingBox::new(10, 10, 200, 60),
            BoundingBox::new(250, 15, 150, 140),
            BoundingBox::new(450, 20, 120, 220),
        ];

        let grouped = RegionGrouper::new().group(&boxes);
        assert_eq!(grouped, boxes.to_vec());
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let boxes = [
            BoundingBox::new(10, 10, 200, 60),
            BoundingBox::new(250, 30, 150, 70),
            BoundingBox::new(10, 200, 200, 65),
            BoundingBox::new(300, 205, 90, 55),
        ];

        let grouper = RegionGrouper::new();
        let first = grouper.group(&boxes);
        let second = grouper.group(&boxes);
        assert_eq!(first, second);
    }

    #[test]
    fn test_merged_extent_is_exact_union() {
        let boxes = [
            BoundingBox::new(40, 100, 300, 80),
            BoundingBox::new(400, 110, 250, 90),
            BoundingBox::new(20, 120, 100, 75),
        ];

        let grouped = RegionGrouper::new().group(&boxes);
        assert_eq!(grouped.len(), 1);

        let merged = grouped[0];
        assert_eq!(merged.x, 20);
        assert_eq!(merged.y, 100);
        assert_eq!(merged.right(), 650);
        assert_eq!(merged.bottom(), 200);
    }
}
