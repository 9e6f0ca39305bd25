//! Text-region segmentation for scanned page rasters.
//!
//! The segmentation half of the pipeline turns a page image into an ordered
//! list of rectangular text regions:
//!
//! 1. [`preprocess`] binarizes the page and closes the gaps between words so
//!    each paragraph becomes one connected blob.
//! 2. [`contours`] traces the blobs, takes their bounding boxes, sorts them
//!    top to bottom, and discards implausible sizes.
//! 3. [`grouping`] merges vertically adjacent, similarly sized boxes into
//!    paragraph-level blocks.
//! 4. [`nested`] drops boxes swallowed whole by a larger block.

pub mod contours;
pub mod grouping;
pub mod nested;
pub mod preprocess;

pub use contours::{extract_regions, ContourConfig};
pub use grouping::{GroupingConfig, RegionGrouper};
pub use nested::remove_nested;
pub use preprocess::{binarize, PreprocessConfig};
