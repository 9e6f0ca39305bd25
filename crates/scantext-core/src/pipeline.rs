//! End-to-end orchestration of segmentation, recognition, and assembly.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbImage;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::assemble::Document;
use crate::error::{Result, ScantextError};
use crate::overlay::draw_region_overlay;
use crate::quality::{clean, QualityThresholds};
use crate::rasterize::PageRasterizer;
use crate::recognize::{recognize_region, TextRecognizer};
use crate::segmentation::{
    binarize, extract_regions, remove_nested, ContourConfig, GroupingConfig, PreprocessConfig,
    RegionGrouper,
};
use crate::types::{BoundingBox, Page};

/// Aggregate configuration for a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub preprocess: PreprocessConfig,
    pub contours: ContourConfig,
    pub grouping: GroupingConfig,
    pub quality: QualityThresholds,
    /// When set, an overlay image outlining the final regions of each page
    /// is written into this directory as `page-NNN-regions.png`.
    pub debug_overlay_dir: Option<PathBuf>,
}

/// The full page-to-document pipeline.
///
/// Stateless between runs; the same pipeline value can process any number
/// of jobs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    #[inline]
    #[must_use = "pipeline is created but not used"]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use = "pipeline is created but not used"]
    pub const fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the segmentation stages on one page raster.
    ///
    /// Returns the final text regions, top to bottom, with merged blocks
    /// collapsed and nested boxes removed.
    #[must_use = "segmented regions are returned but not used"]
    pub fn segment_page(&self, page: &RgbImage) -> Vec<BoundingBox> {
        let mask = binarize(page, &self.config.preprocess);
        debug!("binarized page ({}x{})", mask.width(), mask.height());

        let candidates = extract_regions(&mask, &self.config.contours);
        debug!("extracted {} candidate regions", candidates.len());

        let grouped = RegionGrouper::with_config(self.config.grouping).group(&candidates);
        debug!("grouped into {} blocks", grouped.len());

        let regions = remove_nested(&grouped);
        debug!(
            "removed {} nested boxes, {} regions remain",
            grouped.len() - regions.len(),
            regions.len()
        );
        regions
    }

    /// Recognizes each region, filters by quality, and cleans the survivors.
    ///
    /// Returned texts are in region order. Rejected regions are dropped
    /// silently apart from a debug log line.
    pub fn recognize_regions<R: TextRecognizer>(
        &self,
        page: &RgbImage,
        regions: &[BoundingBox],
        recognizer: &R,
    ) -> anyhow::Result<Vec<String>> {
        let mut texts = Vec::new();
        for &bbox in regions {
            let recognized = recognize_region(page, bbox, recognizer)?;
            if self.config.quality.accepts(&recognized.text) {
                texts.push(clean(&recognized.text));
            } else {
                debug!(
                    "dropped low-quality region at ({}, {}): {} chars, {} fragments",
                    bbox.x,
                    bbox.y,
                    recognized.text.chars().count(),
                    recognized.fragment_count
                );
            }
        }
        Ok(texts)
    }

    /// Processes one page and appends its accepted block texts to `document`.
    pub fn process_page<R: TextRecognizer>(
        &self,
        page: &Page,
        recognizer: &R,
        document: &mut Document,
    ) -> Result<()> {
        let regions = self.segment_page(&page.image);

        if let Some(dir) = &self.config.debug_overlay_dir {
            self.write_overlay(dir, page, &regions)
                .map_err(|source| ScantextError::PageProcessing {
                    page_no: page.index + 1,
                    source,
                })?;
        }

        let texts = self
            .recognize_regions(&page.image, &regions, recognizer)
            .map_err(|source| ScantextError::PageProcessing {
                page_no: page.index + 1,
                source,
            })?;

        debug!(
            "page {}: {} regions, {} blocks accepted",
            page.index + 1,
            regions.len(),
            texts.len()
        );
        for text in texts {
            document.push(text);
        }
        Ok(())
    }

    /// Runs the pipeline over all pages of a job.
    ///
    /// A failure on any page aborts the whole job: partially recognized
    /// documents are worse than a clean error the caller can retry.
    pub fn run<R: TextRecognizer>(&self, pages: &[Page], recognizer: &R) -> Result<Document> {
        let start = Instant::now();
        info!("starting recognition job with {} pages", pages.len());

        let mut document = Document::new();
        for page in pages {
            self.process_page(page, recognizer, &mut document)?;
        }

        info!(
            "job finished: {} blocks from {} pages in {:.2}s",
            document.len(),
            pages.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(document)
    }

    /// Runs the pipeline and writes the rendered document to `output`.
    pub fn run_to_file<R: TextRecognizer>(
        &self,
        pages: &[Page],
        recognizer: &R,
        output: &Path,
    ) -> Result<Document> {
        let document = self.run(pages, recognizer)?;
        document.write_to(output)?;
        Ok(document)
    }

    /// Rasterizes `source` and runs the pipeline over the resulting pages.
    pub fn run_source<P: PageRasterizer, R: TextRecognizer>(
        &self,
        rasterizer: &P,
        source: &Path,
        dpi: u32,
        recognizer: &R,
    ) -> Result<Document> {
        let rasters = rasterizer
            .rasterize(source, dpi)
            .map_err(|err| ScantextError::Rasterization { source: err })?;

        let pages: Vec<Page> = rasters
            .into_iter()
            .enumerate()
            .map(|(index, image)| Page::new(index, image))
            .collect();
        self.run(&pages, recognizer)
    }

    fn write_overlay(
        &self,
        dir: &Path,
        page: &Page,
        regions: &[BoundingBox],
    ) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)?;
        let mut annotated = page.image.clone();
        draw_region_overlay(&mut annotated, regions);
        let path = dir.join(format!("page-{:03}-regions.png", page.index + 1));
        annotated.save(&path)?;
        debug!("wrote region overlay to {}", path.display());
        Ok(())
    }
}
