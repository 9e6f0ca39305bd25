//! Debug overlays showing which regions the segmentation stages produced.

#![allow(clippy::cast_possible_wrap)]

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::types::BoundingBox;

/// Highlight color for region outlines.
const OUTLINE_COLOR: Rgb<u8> = Rgb([36, 255, 12]);

/// Pixels of padding between a region's edge and its drawn outline, so the
/// outline never covers the text it marks.
const OUTLINE_MARGIN: i32 = 5;

/// Draws a hollow rectangle around each region onto `page`.
///
/// Outlines reaching past the page edge are clipped by the drawing routine,
/// matching how regions near a border behave.
pub fn draw_region_overlay(page: &mut RgbImage, regions: &[BoundingBox]) {
    for bbox in regions {
        let rect = Rect::at(
            bbox.x as i32 - OUTLINE_MARGIN,
            bbox.y as i32 - OUTLINE_MARGIN,
        )
        .of_size(
            bbox.width + 2 * OUTLINE_MARGIN as u32,
            bbox.height + 2 * OUTLINE_MARGIN as u32,
        );
        draw_hollow_rect_mut(page, rect, OUTLINE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_drawn_with_margin() {
        let mut page = RgbImage::new(100, 100);
        draw_region_overlay(&mut page, &[BoundingBox::new(20, 20, 40, 30)]);

        // Top-left corner of the outline sits 5px outside the region.
        assert_eq!(*page.get_pixel(15, 15), OUTLINE_COLOR);
        // Bottom edge: y + height + margin - 1 = 20 + 30 + 5 - 1.
        assert_eq!(*page.get_pixel(15, 54), OUTLINE_COLOR);
        // Interior stays untouched.
        assert_eq!(*page.get_pixel(40, 35), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_region_at_origin_clips_cleanly() {
        let mut page = RgbImage::new(50, 50);
        draw_region_overlay(&mut page, &[BoundingBox::new(0, 0, 20, 20)]);

        // The outline's visible parts land inside the page.
        assert_eq!(*page.get_pixel(24, 10), OUTLINE_COLOR);
    }

    #[test]
    fn test_empty_region_list_leaves_page_untouched() {
        let mut page = RgbImage::new(10, 10);
        let before = page.clone();
        draw_region_overlay(&mut page, &[]);
        assert_eq!(page, before);
    }
}
