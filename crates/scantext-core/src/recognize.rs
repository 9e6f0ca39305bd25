//! Recognition of text inside segmented regions.
//!
//! The pipeline stays engine-agnostic: the [`TextRecognizer`] trait is the
//! only contact point with an actual OCR engine, and everything here works
//! purely on the fragments the engine returns.

use anyhow::Result;
use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};

use crate::types::BoundingBox;

/// One piece of recognized text, as reported by the engine.
///
/// The bounding box is relative to the cropped region the engine was given,
/// not to the full page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub bbox: BoundingBox,
    pub text: String,
    /// Engine confidence in `[0.0, 1.0]`.
    pub confidence: f32,
}

/// Text recovered from one segmented region of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedRegion {
    /// Region extent in full-page coordinates.
    pub bbox: BoundingBox,
    /// Fragment texts joined by single spaces, in engine order.
    pub text: String,
    /// Number of fragments the engine reported for the region.
    pub fragment_count: usize,
}

/// An OCR engine capable of reading text out of a region image.
pub trait TextRecognizer {
    /// Recognizes all text fragments in `region`.
    ///
    /// Returning an empty vector is not an error: it means the engine found
    /// no text, and the region's joined text is the empty string.
    fn recognize(&self, region: &RgbImage) -> Result<Vec<TextFragment>>;
}

/// Crops `bbox` out of `page` and runs `recognizer` over the crop.
///
/// The crop is taken from the original page raster, not from the binarized
/// mask, so the engine sees the full grayscale detail. Boxes reaching past
/// the page edge are clamped to it.
pub fn recognize_region<R: TextRecognizer>(
    page: &RgbImage,
    bbox: BoundingBox,
    recognizer: &R,
) -> Result<RecognizedRegion> {
    let x = bbox.x.min(page.width());
    let y = bbox.y.min(page.height());
    let width = bbox.width.min(page.width() - x);
    let height = bbox.height.min(page.height() - y);

    let crop = imageops::crop_imm(page, x, y, width, height).to_image();
    let fragments = recognizer.recognize(&crop)?;

    let text = fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(RecognizedRegion {
        bbox,
        text,
        fragment_count: fragments.len(),
    })
}
