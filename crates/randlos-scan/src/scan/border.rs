// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border removal — erases dark scanner borders and edge noise around the
// content of a document image before it is handed to OCR.
//
// Pipeline: threshold → external contours → filled mask → invert → OR.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::point::Point;
use imageproc::rect::Rect;
use imageproc::region_labelling::{Connectivity, connected_components};
use randlos_core::BorderConfig;
use tracing::{debug, info, instrument};

/// Colour of the contour lines on the debug overlay.
const OVERLAY_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Boundary polyline of one connected bright region.
pub type ContourPolygon = Vec<Point<i32>>;

/// Everything produced by a single border removal pass.
#[derive(Debug, Clone)]
pub struct BorderRemoval {
    /// The cleaned, binary image (same shape as the input).
    pub image: GrayImage,
    /// External contours of the thresholded image, collinear points dropped.
    pub contours: Vec<ContourPolygon>,
    /// Contours drawn over the thresholded image; only set when the
    /// configuration asks for it.
    pub overlay: Option<RgbImage>,
}

/// Removes borders from single-channel document scans.
///
/// Stateless apart from its configuration: every call allocates its own
/// intermediate buffers, so one remover can be shared across threads.
///
/// The transform has no error contract. Callers are expected to hand in a
/// real grayscale image; background is assumed brighter than content.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderRemover {
    config: BorderConfig,
}

impl BorderRemover {
    pub fn new(config: BorderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BorderConfig {
        &self.config
    }

    /// Threshold the image and force everything outside the detected
    /// content regions to white.
    ///
    /// The result is binary (every sample is 0 or 255) and has the same
    /// dimensions as `image`. An image without any bright region comes back
    /// entirely white.
    pub fn remove_border(&self, image: &GrayImage) -> GrayImage {
        self.remove_border_detailed(image).image
    }

    /// Convert any decoded image to 8-bit luma, then remove its border.
    pub fn remove_border_dynamic(&self, image: &DynamicImage) -> GrayImage {
        self.remove_border(&image.to_luma8())
    }

    /// Same transform as [`remove_border`](Self::remove_border), also
    /// returning the contour set and, if enabled, the debug overlay.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn remove_border_detailed(&self, image: &GrayImage) -> BorderRemoval {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            debug!("Empty image; nothing to remove");
            return BorderRemoval {
                image: GrayImage::new(width, height),
                contours: Vec::new(),
                overlay: None,
            };
        }

        info!(threshold = self.config.threshold, "Removing document border");

        let binary = threshold_binary(image, self.config.threshold);
        let contours = find_external_contours(&binary);
        debug!(contour_count = contours.len(), "External contours found");

        let mut mask = fill_contours(&contours, width, height);
        invert_mask(&mut mask);
        let result = bitwise_or(&binary, &mask);

        let overlay = self
            .config
            .debug_overlay
            .then(|| self.draw_contours(&binary, &contours));

        BorderRemoval {
            image: result,
            contours,
            overlay,
        }
    }

    /// Draw `contours` in green over an RGB copy of `binary`.
    ///
    /// Every outline pixel is covered by a square brush of side
    /// `contour_thickness`, so straight edges come out exactly that wide.
    pub fn draw_contours(&self, binary: &GrayImage, contours: &[ContourPolygon]) -> RgbImage {
        let mut canvas = RgbImage::from_fn(binary.width(), binary.height(), |x, y| {
            let value = binary.get_pixel(x, y).0[0];
            Rgb([value, value, value])
        });
        let side = self.config.contour_thickness.max(1);

        for contour in contours {
            for_each_outline_pixel(contour, |x, y| {
                stamp(&mut canvas, x, y, side, OVERLAY_COLOR);
            });
        }
        canvas
    }
}

/// Binarize with a fixed cutoff: `sample >= cutoff` becomes 255, else 0.
pub fn threshold_binary(image: &GrayImage, cutoff: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let binary = if pixel.0[0] >= cutoff { 255u8 } else { 0u8 };
        output.put_pixel(x, y, Luma([binary]));
    }
    output
}

/// Outermost boundaries of the bright regions in a binary image.
///
/// Pixels beyond the image count as background, so a page that runs to the
/// image edge still gets an outer border. Contours nested inside another
/// region (holes and anything within them) are skipped. Each boundary is
/// reduced to its corner points.
pub fn find_external_contours(binary: &GrayImage) -> Vec<ContourPolygon> {
    let (width, height) = binary.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut padded = GrayImage::new(width + 2, height + 2);
    image::imageops::replace(&mut padded, binary, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer))
        .filter(|contour| contour.parent.is_none())
        .map(|contour| {
            contour
                .points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect::<ContourPolygon>()
        })
        .map(simplify_chain)
        .filter(|points| !points.is_empty())
        .collect()
}

/// Paint the interior of every contour (boundary included) with 255 on a
/// fresh `width` x `height` mask.
///
/// The outlines are rasterised onto a canvas with a one-pixel empty frame;
/// every pixel that cannot reach that frame through 4-connected unpainted
/// pixels lies inside one of them.
pub fn fill_contours(contours: &[ContourPolygon], width: u32, height: u32) -> GrayImage {
    if width == 0 || height == 0 || contours.is_empty() {
        return GrayImage::new(width, height);
    }

    let mut outline = GrayImage::new(width + 2, height + 2);
    for contour in contours {
        for_each_outline_pixel(contour, |x, y| {
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                outline.put_pixel(x as u32 + 1, y as u32 + 1, Luma([255]));
            }
        });
    }

    // Unpainted pixels become the foreground for labelling; the frame is
    // never painted, so its label marks the outside.
    image::imageops::invert(&mut outline);
    let labels = connected_components(&outline, Connectivity::Four, Luma([0u8]));
    let outside = labels.get_pixel(0, 0).0[0];

    let mask = GrayImage::from_fn(width, height, |x, y| {
        if labels.get_pixel(x + 1, y + 1).0[0] == outside {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    debug!(
        filled = mask.pixels().filter(|p| p.0[0] == 255).count(),
        "Content mask built"
    );
    mask
}

/// Replace every sample `v` with `255 - v`.
pub fn invert_mask(mask: &mut GrayImage) {
    image::imageops::invert(mask);
}

/// Per-pixel bitwise OR of two equally sized images.
pub fn bitwise_or(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let mut output = a.clone();
    for (out, other) in output.pixels_mut().zip(b.pixels()) {
        out.0[0] |= other.0[0];
    }
    output
}

// -- Contour helpers ----------------------------------------------------------

/// Drop every point that continues the previous step's direction, leaving
/// only the corners of the closed chain.
fn simplify_chain(mut points: Vec<Point<i32>>) -> ContourPolygon {
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return points;
    }

    let n = points.len();
    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());
    let corners: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if corners.is_empty() { points } else { corners }
}

/// Visit every pixel on the closed polyline through `polygon`.
///
/// Segments between simplified chain corners are horizontal, vertical, or
/// diagonal, so stepping by the larger axis delta hits the original chain
/// pixels exactly.
fn for_each_outline_pixel(polygon: &[Point<i32>], mut visit: impl FnMut(i32, i32)) {
    match polygon.len() {
        0 => {}
        1 => visit(polygon[0].x, polygon[0].y),
        n => {
            for i in 0..n {
                let start = polygon[i];
                let end = polygon[(i + 1) % n];
                let dx = end.x - start.x;
                let dy = end.y - start.y;
                let steps = dx.abs().max(dy.abs());
                for s in 0..steps {
                    let x = start.x + (dx * s) / steps;
                    let y = start.y + (dy * s) / steps;
                    visit(x, y);
                }
            }
        }
    }
}

/// Paint a `side` x `side` square centred on (x, y); even sides extend one
/// pixel further up and left than down and right.
fn stamp(canvas: &mut RgbImage, x: i32, y: i32, side: u32, color: Rgb<u8>) {
    let offset = (side / 2) as i32;
    let brush = Rect::at(x - offset, y - offset).of_size(side, side);
    draw_filled_rect_mut(canvas, brush, color);
}

// -- Tests --------------------------------------------------------------------
