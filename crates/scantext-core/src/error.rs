//! Error types for the segmentation and recognition pipeline.
//!
//! The taxonomy is deliberately small. Rasterization failures abort a job
//! before any region work starts; any failure while processing one page is
//! fatal for the whole job and no output is written, even for pages that
//! already succeeded. There is no retry logic anywhere in the core.

use thiserror::Error;

/// Errors that can occur while running a recognition job.
#[derive(Debug, Error)]
pub enum ScantextError {
    /// The upstream rasterizer could not produce page images.
    #[error("rasterization failed: {source}")]
    Rasterization {
        #[source]
        source: anyhow::Error,
    },

    /// Processing of a single page failed (preprocessing, contour
    /// extraction, or the recognition call). Fatal for the whole job.
    #[error("failed to process page {page_no}: {source}")]
    PageProcessing {
        /// One-based number of the failing page.
        page_no: usize,
        #[source]
        source: anyhow::Error,
    },

    /// Writing the output artifact failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScantextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_processing_display_includes_page() {
        let err = ScantextError::PageProcessing {
            page_no: 3,
            source: anyhow::anyhow!("recognizer unavailable"),
        };
        let msg = err.to_string();
        assert!(msg.contains("page 3"));
        assert!(msg.contains("recognizer unavailable"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing output dir");
        let err: ScantextError = io_err.into();
        assert!(matches!(err, ScantextError::Io(_)));
    }
}
