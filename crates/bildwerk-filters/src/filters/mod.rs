// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The canned filters and their dispatcher.

pub mod basic;
pub mod cartoon;
pub mod edges;

use bildwerk_core::FilterKind;
use image::{DynamicImage, RgbImage};
use tracing::instrument;

pub use basic::{gaussian_blur, grayscale, negative, sharpen, zoom_in};
pub use cartoon::{adaptive_mean_threshold, bilateral_filter, cartoonize};
pub use edges::edge_detect;

/// Apply one filter to an RGB image.
///
/// Grayscale and Edge Detection return a single-channel image; every other
/// filter returns RGB of the same size.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn apply_filter(image: &RgbImage, kind: FilterKind) -> DynamicImage {
    match kind {
        FilterKind::Grayscale => DynamicImage::ImageLuma8(grayscale(image)),
        FilterKind::Blur => DynamicImage::ImageRgb8(gaussian_blur(image)),
        FilterKind::EdgeDetection => DynamicImage::ImageLuma8(edge_detect(image)),
        FilterKind::Sharpen => DynamicImage::ImageRgb8(sharpen(image)),
        FilterKind::Cartoon => DynamicImage::ImageRgb8(cartoonize(image)),
        FilterKind::Negative => DynamicImage::ImageRgb8(negative(image)),
        FilterKind::ZoomIn => DynamicImage::ImageRgb8(zoom_in(image)),
    }
}
