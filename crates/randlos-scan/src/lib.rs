// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// randlos-scan — Border removal for scanned documents.
//
// Provides the border removal transform (threshold, external contours, mask
// compositing) and a small image wrapper for decoding, grayscale conversion,
// and encoding.

pub mod image;
pub mod scan;

// Re-export the primary structs so callers can use `randlos_scan::BorderRemover` etc.
pub use crate::image::processor::ImageProcessor;
pub use crate::scan::border::{BorderRemoval, BorderRemover, ContourPolygon};
