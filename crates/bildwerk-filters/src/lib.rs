// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-filters — Image decoding, canned filters, and PNG encoding for Bildwerk.
//
// Provides the seven filters (grayscale, blur, edge detection, sharpen,
// cartoon, negative, zoom) and an `ImageProcessor` that turns an uploaded
// JPEG/PNG into a filtered PNG ready for download.

pub mod filters;
pub mod image;

// Re-export the primary structs so callers can use `bildwerk_filters::ImageProcessor` etc.
pub use filters::apply_filter;
pub use self::image::processor::{ImageProcessor, ProcessedImage};
