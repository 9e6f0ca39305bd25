//! Turning an input source into page rasters.

use std::path::Path;

use anyhow::Result;
use image::RgbImage;

/// Default rasterization resolution.
///
/// 300 dpi is the standard resolution for OCR work: lower resolutions lose
/// small glyph detail, higher ones cost time without improving accuracy.
pub const DEFAULT_DPI: u32 = 300;

/// A source of page images, typically a PDF renderer.
///
/// Implementations return the pages in document order; the pipeline assigns
/// page numbers from the position in the returned vector.
pub trait PageRasterizer {
    /// Renders every page of `source` at `dpi`.
    fn rasterize(&self, source: &Path, dpi: u32) -> Result<Vec<RgbImage>>;
}
