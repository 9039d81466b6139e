// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge detection — Canny edge map of the luminance channel.

use image::{GrayImage, RgbImage};
use imageproc::edges::canny;
use tracing::{debug, instrument};

use super::basic::grayscale;

/// Lower hysteresis threshold for Canny.
pub const CANNY_LOW_THRESHOLD: f32 = 100.0;

/// Upper hysteresis threshold for Canny.
pub const CANNY_HIGH_THRESHOLD: f32 = 200.0;

/// Convert to grayscale, then extract a binary edge map (0 or 255 per pixel).
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn edge_detect(image: &RgbImage) -> GrayImage {
    let gray = grayscale(image);
    let edges = canny(&gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
    debug!(
        edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count(),
        "Canny edge detection complete"
    );
    edges
}
