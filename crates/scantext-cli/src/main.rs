//! Command-line front end for scanned-document text extraction.

mod rasterizer;
mod tesseract;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use scantext_core::{Page, Pipeline, PipelineConfig, DEFAULT_DPI};

use crate::rasterizer::PdftoppmRasterizer;
use crate::tesseract::TesseractRecognizer;

/// Extract plain text from scanned PDFs and page images.
#[derive(Debug, Parser)]
#[command(name = "scantext", version, about)]
struct Cli {
    /// Input file: a PDF or a single page image (PNG, JPEG, TIFF).
    input: PathBuf,

    /// Where to write the extracted text.
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Rasterization resolution for PDF input.
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,

    /// Tesseract language code.
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Write per-page overlay images outlining detected regions into this
    /// directory.
    #[arg(long, value_name = "DIR")]
    debug_overlay: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !TesseractRecognizer::is_available() {
        bail!("tesseract not found (install tesseract-ocr)");
    }

    let pipeline = Pipeline::with_config(PipelineConfig {
        debug_overlay_dir: cli.debug_overlay.clone(),
        ..PipelineConfig::default()
    });
    let recognizer = TesseractRecognizer::new(&cli.lang);

    let is_pdf = cli
        .input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let document = if is_pdf {
        if !PdftoppmRasterizer::is_available() {
            bail!("pdftoppm not found (install poppler-utils)");
        }
        info!("processing PDF {} at {} dpi", cli.input.display(), cli.dpi);
        pipeline.run_source(&PdftoppmRasterizer::new(), &cli.input, cli.dpi, &recognizer)?
    } else {
        info!("processing image {}", cli.input.display());
        let image = image::open(&cli.input)
            .with_context(|| format!("loading {}", cli.input.display()))?
            .to_rgb8();
        pipeline.run(&[Page::new(0, image)], &recognizer)?
    };

    document
        .write_to(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!(
        "extracted {} text blocks to {}",
        document.len(),
        cli.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::parse_from(["scantext", "scan.pdf"]);
        assert_eq!(cli.input, PathBuf::from("scan.pdf"));
        assert_eq!(cli.output, PathBuf::from("output.txt"));
        assert_eq!(cli.dpi, DEFAULT_DPI);
        assert_eq!(cli.lang, "eng");
        assert!(cli.debug_overlay.is_none());
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "scantext",
            "page.png",
            "-o",
            "text.txt",
            "--dpi",
            "150",
            "--lang",
            "deu",
            "--debug-overlay",
            "overlays",
        ]);
        assert_eq!(cli.output, PathBuf::from("text.txt"));
        assert_eq!(cli.dpi, 150);
        assert_eq!(cli.lang, "deu");
        assert_eq!(cli.debug_overlay, Some(PathBuf::from("overlays")));
    }
}
