//! PDF rasterization via the poppler `pdftoppm` binary.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use image::RgbImage;
use log::debug;
use scantext_core::PageRasterizer;

/// Rasterizer shelling out to `pdftoppm`, one PNG per page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdftoppmRasterizer;

impl PdftoppmRasterizer {
    #[inline]
    #[must_use = "rasterizer is created but not used"]
    pub const fn new() -> Self {
        Self
    }

    /// Whether the `pdftoppm` binary is on the PATH.
    #[must_use]
    pub fn is_available() -> bool {
        which::which("pdftoppm").is_ok()
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, source: &Path, dpi: u32) -> Result<Vec<RgbImage>> {
        let dir = tempfile::tempdir().context("creating temp dir for page images")?;
        let prefix = dir.path().join("page");

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg(source)
            .arg(&prefix)
            .output()
            .map_err(|err| {
                if err.kind() == ErrorKind::NotFound {
                    anyhow::anyhow!("pdftoppm not found (install poppler-utils)")
                } else {
                    anyhow::Error::from(err).context("spawning pdftoppm")
                }
            })?;

        if !output.status.success() {
            bail!(
                "pdftoppm failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        // pdftoppm names pages page-1.png, page-2.png, ...; zero-padded when
        // the document has ten or more pages. Lexicographic order is wrong
        // for unpadded names, so sort on the parsed page number.
        let mut page_files: Vec<(u32, std::path::PathBuf)> = std::fs::read_dir(dir.path())
            .context("listing rasterized pages")?
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                let stem = path.file_stem()?.to_str()?;
                let number: u32 = stem.strip_prefix("page-")?.parse().ok()?;
                Some((number, path))
            })
            .collect();
        page_files.sort_by_key(|(number, _)| *number);

        if page_files.is_empty() {
            bail!("pdftoppm produced no pages for {}", source.display());
        }

        let mut pages = Vec::with_capacity(page_files.len());
        for (number, path) in page_files {
            let image = image::open(&path)
                .with_context(|| format!("loading rasterized page {number}"))?
                .to_rgb8();
            pages.push(image);
        }
        debug!(
            "rasterized {} pages from {} at {dpi} dpi",
            pages.len(),
            source.display()
        );
        Ok(pages)
    }
}
