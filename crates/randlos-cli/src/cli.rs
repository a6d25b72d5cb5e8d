// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and the single cleanup run they drive.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use image::DynamicImage;
use randlos_core::{BorderConfig, Result};
use randlos_scan::{BorderRemover, ImageProcessor};
use tracing::{info, instrument};

/// Remove dark scanner borders from a document image before OCR.
#[derive(Parser, Debug)]
#[command(name = "randlos")]
#[command(version)]
#[command(about = "Remove scanner borders from document images", long_about = None)]
pub struct Cli {
    /// Image to clean (any format the `image` crate decodes); `-` reads stdin
    pub input: PathBuf,

    /// Where to write the cleaned image; format follows the extension, `-`
    /// writes PNG to stdout
    #[arg(short, long)]
    pub output: PathBuf,

    /// JSON file with border removal settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Near-white cutoff; overrides the config file
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Contour line width on the overlay; overrides the config file
    #[arg(long)]
    pub thickness: Option<u32>,

    /// Also write the contour debug overlay to this path
    #[arg(long)]
    pub overlay: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<BorderConfig> {
        let mut config = match &self.config {
            Some(path) => BorderConfig::load(path)?,
            None => BorderConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(thickness) = self.thickness {
            config.contour_thickness = thickness;
        }
        config.debug_overlay = self.overlay.is_some();
        config.validate()?;
        Ok(config)
    }
}

/// Path argument that stands for stdin (input) or stdout (output).
const STDIO_MARKER: &str = "-";

/// Load the input, remove its border, and write the result (and overlay).
#[instrument(skip_all, fields(input = %args.input.display()))]
pub fn run(args: &Cli) -> Result<()> {
    let config = args.resolve_config()?;
    let remover = BorderRemover::new(config);

    let page = load_page(&args.input)?.grayscale();
    let removal = remover.remove_border_detailed(&page.as_dynamic().to_luma8());
    info!(contours = removal.contours.len(), "Border removed");

    let cleaned = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(removal.image));
    if args.output == Path::new(STDIO_MARKER) {
        write_png(&cleaned, std::io::stdout().lock())?;
    } else {
        cleaned.save(&args.output)?;
    }
    info!(output = %args.output.display(), "Cleaned image written");

    if let (Some(path), Some(overlay)) = (&args.overlay, removal.overlay) {
        ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(overlay)).save(path)?;
        info!(overlay = %path.display(), "Contour overlay written");
    }
    Ok(())
}

/// Open `input`, or decode stdin when it is `-`.
fn load_page(input: &Path) -> Result<ImageProcessor> {
    if input == Path::new(STDIO_MARKER) {
        read_page(std::io::stdin().lock())
    } else {
        ImageProcessor::open(input)
    }
}

/// Decode a whole encoded image from `reader`.
fn read_page(mut reader: impl Read) -> Result<ImageProcessor> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    ImageProcessor::from_bytes(&data)
}

/// Write `page` to `writer` as PNG.
fn write_png(page: &ImageProcessor, mut writer: impl Write) -> Result<()> {
    writer.write_all(&page.to_png_bytes()?)?;
    writer.flush()?;
    Ok(())
}
