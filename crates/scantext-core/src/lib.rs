//! Text-region segmentation and document assembly for scanned pages.
//!
//! `scantext-core` turns page rasters into plain text. Each page is
//! binarized and morphologically closed so paragraphs become connected
//! blobs, the blobs are traced into bounding boxes, the boxes are grouped
//! into paragraph-level blocks, and each block is cropped from the original
//! raster and handed to a pluggable OCR engine. Recognized text passes a
//! quality gate, gets normalized, and is assembled into one document with
//! a blank line between blocks.
//!
//! The crate is deliberately engine- and renderer-agnostic: callers supply
//! a [`TextRecognizer`] and, for PDF input, a [`PageRasterizer`].
//!
//! ```no_run
//! use scantext_core::{Pipeline, TextFragment, TextRecognizer};
//!
//! struct MyEngine;
//!
//! impl TextRecognizer for MyEngine {
//!     fn recognize(&self, region: &image::RgbImage) -> anyhow::Result<Vec<TextFragment>> {
//!         // call into your OCR engine here
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # fn main() -> scantext_core::Result<()> {
//! let page = image::RgbImage::new(2480, 3508);
//! let pages = [scantext_core::Page::new(0, page)];
//! let document = Pipeline::new().run(&pages, &MyEngine)?;
//! println!("{}", document.render());
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod error;
pub mod overlay;
pub mod pipeline;
pub mod quality;
pub mod rasterize;
pub mod recognize;
pub mod segmentation;
pub mod types;

pub use assemble::Document;
pub use error::{Result, ScantextError};
pub use pipeline::{Pipeline, PipelineConfig};
pub use quality::{clean, QualityThresholds};
pub use rasterize::{PageRasterizer, DEFAULT_DPI};
pub use recognize::{recognize_region, RecognizedRegion, TextFragment, TextRecognizer};
pub use segmentation::{
    binarize, extract_regions, remove_nested, ContourConfig, GroupingConfig, PreprocessConfig,
    RegionGrouper,
};
pub use types::{BoundingBox, Page, RegionGroup};
