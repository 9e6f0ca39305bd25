//! Tesseract-backed text recognition via subprocess.
//!
//! Each region image is written to a temporary PNG and fed to the
//! `tesseract` binary in TSV mode, which reports one row per recognized
//! word with its box and confidence.

use std::io::ErrorKind;
use std::process::Command;

use anyhow::{bail, Context, Result};
use image::RgbImage;
use log::debug;
use scantext_core::{BoundingBox, TextFragment, TextRecognizer};

/// Word-level rows in tesseract's TSV output carry this level tag.
const WORD_LEVEL: &str = "5";

/// Recognizer shelling out to the `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    lang: String,
}

impl TesseractRecognizer {
    #[must_use = "recognizer is created but not used"]
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }

    /// Whether the `tesseract` binary is on the PATH.
    #[must_use]
    pub fn is_available() -> bool {
        which::which("tesseract").is_ok()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, region: &RgbImage) -> Result<Vec<TextFragment>> {
        let dir = tempfile::tempdir().context("creating temp dir for region image")?;
        let image_path = dir.path().join("region.png");
        region
            .save(&image_path)
            .context("writing region image for tesseract")?;

        let output = Command::new("tesseract")
            .arg(&image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("tsv")
            .output()
            .map_err(|err| {
                if err.kind() == ErrorKind::NotFound {
                    anyhow::anyhow!("tesseract not found (install tesseract-ocr)")
                } else {
                    anyhow::Error::from(err).context("spawning tesseract")
                }
            })?;

        if !output.status.success() {
            bail!(
                "tesseract failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let fragments = parse_tsv(&stdout);
        debug!(
            "tesseract returned {} words for {}x{} region",
            fragments.len(),
            region.width(),
            region.height()
        );
        Ok(fragments)
    }
}

/// Parses tesseract TSV output into word fragments.
///
/// Rows that are not word-level, fail to parse, or carry only whitespace
/// text are skipped rather than treated as errors; tesseract emits header
/// and layout rows in the same stream.
fn parse_tsv(tsv: &str) -> Vec<TextFragment> {
    tsv.lines()
        .filter_map(|line| {
            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() < 12 || columns[0] != WORD_LEVEL {
                return None;
            }

            let left: u32 = columns[6].parse().ok()?;
            let top: u32 = columns[7].parse().ok()?;
            let width: u32 = columns[8].parse().ok()?;
            let height: u32 = columns[9].parse().ok()?;
            let conf: f32 = columns[10].parse().ok()?;

            let text = columns[11].trim();
            if text.is_empty() || conf < 0.0 {
                return None;
            }

            Some(TextFragment {
                bbox: BoundingBox::new(left, top, width, height),
                text: text.to_string(),
                confidence: conf / 100.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
        1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t\n\
        4\t1\t1\t1\t1\t0\t32\t40\t400\t28\t-1\t\n\
        5\t1\t1\t1\t1\t1\t32\t40\t96\t28\t96.32\tHello\n\
        5\t1\t1\t1\t1\t2\t140\t40\t96\t28\t91.50\tworld\n\
        5\t1\t1\t1\t1\t3\t250\t40\t10\t28\t-1.00\t \n";

    #[test]
    fn test_parse_tsv_keeps_word_rows() {
        let fragments = parse_tsv(SAMPLE_TSV);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Hello");
        assert_eq!(fragments[0].bbox, BoundingBox::new(32, 40, 96, 28));
        assert!((fragments[0].confidence - 0.9632).abs() < 1e-4);
        assert_eq!(fragments[1].text, "world");
    }

    #[test]
    fn test_parse_tsv_skips_malformed_rows() {
        let fragments = parse_tsv("5\t1\t1\n5\t1\t1\t1\t1\t1\tx\t40\t96\t28\t90\tbroken\n");
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_parse_tsv_empty_input() {
        assert!(parse_tsv("").is_empty());
    }
}
