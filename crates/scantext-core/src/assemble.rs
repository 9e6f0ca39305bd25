//! Assembly of accepted region texts into the final document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Ordered collection of cleaned block texts from a processing run.
///
/// Blocks accumulate in pipeline order (pages top to bottom, regions top to
/// bottom within a page) and render as one string with a blank line between
/// consecutive blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<String>,
}

impl Document {
    #[inline]
    #[must_use = "document is created but not used"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one cleaned block of text.
    pub fn push(&mut self, text: String) {
        self.blocks.push(text);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block texts in assembly order.
    #[inline]
    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.blocks
    }

    /// Renders the document as block texts separated by `"\n\n"`.
    ///
    /// No separator precedes the first block or follows the last; an empty
    /// document renders as the empty string.
    #[must_use = "rendered document is returned but not used"]
    pub fn render(&self) -> String {
        self.blocks.join("\n\n")
    }

    /// Renders the document and writes it to `path`, replacing any
    /// existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_renders_empty() {
        let document = Document::new();
        assert!(document.is_empty());
        assert_eq!(document.render(), "");
    }

    #[test]
    fn test_single_block_has_no_separator() {
        let mut document = Document::new();
        document.push("only block".to_string());
        assert_eq!(document.render(), "only block");
    }

    #[test]
    fn test_blocks_joined_by_blank_line() {
        let mut document = Document::new();
        document.push("first".to_string());
        document.push("second".to_string());
        document.push("third".to_string());

        assert_eq!(document.len(), 3);
        assert_eq!(document.render(), "first\n\nsecond\n\nthird");
    }

    #[test]
    fn test_write_to_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale contents").expect("seed file");

        let mut document = Document::new();
        document.push("fresh".to_string());
        document.write_to(&path).expect("write succeeds");

        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "fresh");
    }
}
