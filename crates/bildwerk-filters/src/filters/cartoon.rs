// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cartoon effect — an adaptive-threshold line mask over bilateral-smoothed
// colour.
//
// `imageproc` provides the median filter. Adaptive mean thresholding and the
// colour bilateral filter are implemented here on top of `image` buffers.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::median_filter;
use tracing::{debug, info, instrument};

use super::basic::grayscale;

/// Radius of the median filter applied before thresholding (5x5 window).
pub const MEDIAN_RADIUS: u32 = 2;

/// Radius of the adaptive threshold neighbourhood (9x9 block).
pub const THRESHOLD_BLOCK_RADIUS: u32 = 4;

/// Constant subtracted from the local mean before thresholding.
pub const THRESHOLD_C: i32 = 9;

/// Radius of the bilateral filter window (diameter 9).
pub const BILATERAL_RADIUS: u32 = 4;

/// Bilateral range sigma, on the summed per-channel difference.
pub const BILATERAL_SIGMA_COLOR: f32 = 250.0;

/// Bilateral spatial sigma, in pixels.
pub const BILATERAL_SIGMA_SPACE: f32 = 250.0;

/// Run the two-stage cartoon pipeline:
///
/// 1. Grayscale, 5x5 median, adaptive mean threshold (block 9, C 9) → line mask
/// 2. Bilateral smoothing of the colour image (diameter 9, sigmas 250/250)
/// 3. Masked copy: smoothed colour where the mask is set, black elsewhere
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn cartoonize(image: &RgbImage) -> RgbImage {
    info!("Running cartoon pipeline");

    let gray = grayscale(image);
    let smoothed_gray = median_filter(&gray, MEDIAN_RADIUS, MEDIAN_RADIUS);
    let mask = adaptive_mean_threshold(&smoothed_gray, THRESHOLD_BLOCK_RADIUS, THRESHOLD_C);
    debug!(
        line_pixels = mask.pixels().filter(|p| p.0[0] == 0).count(),
        "Edge mask computed"
    );

    let color = bilateral_filter(
        image,
        BILATERAL_RADIUS,
        BILATERAL_SIGMA_COLOR,
        BILATERAL_SIGMA_SPACE,
    );

    masked_copy(&color, &mask)
}

/// Keep `color` where `mask` is non-zero; everything else becomes black.
fn masked_copy(color: &RgbImage, mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(color.width(), color.height(), |x, y| {
        if mask.get_pixel(x, y).0[0] > 0 {
            *color.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    })
}

// -- Adaptive threshold -------------------------------------------------------

/// Local-mean binarization.
///
/// For each pixel, the threshold is the mean intensity of the
/// `(2 * block_radius + 1)` square around it (clipped to the image) minus
/// `c`. Pixels strictly brighter than the threshold become 255, the rest 0.
#[instrument(skip(gray))]
pub fn adaptive_mean_threshold(gray: &GrayImage, block_radius: u32, c: i32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let integral = compute_integral_image(gray);

    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let local_mean = region_mean(&integral, width, height, x, y, block_radius);
            let threshold = local_mean - c as f64;
            let value = gray.get_pixel(x, y).0[0] as f64;
            let binary = if value > threshold { 255u8 } else { 0u8 };
            output.put_pixel(x, y, Luma([binary]));
        }
    }

    output
}

/// Compute the integral (summed-area table) of a grayscale image.
///
/// `integral[y * (width+1) + x]` contains the sum of all pixel values in the
/// rectangle [0, 0) to (x, y) (exclusive on both axes). The table has
/// dimensions `(width+1) x (height+1)` with a zero-padded border.
fn compute_integral_image(gray: &GrayImage) -> Vec<u64> {
    let (w, h) = gray.dimensions();
    let stride = (w + 1) as usize;
    let mut table = vec![0u64; stride * (h + 1) as usize];

    for y in 0..h {
        let mut row_sum: u64 = 0;
        for x in 0..w {
            row_sum += gray.get_pixel(x, y).0[0] as u64;
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            let above = y as usize * stride + (x + 1) as usize;
            table[idx] = row_sum + table[above];
        }
    }

    table
}

/// Mean pixel value within a square region centred on (cx, cy), clipped to
/// the image, read from the precomputed integral image.
fn region_mean(
    integral: &[u64],
    img_width: u32,
    img_height: u32,
    cx: u32,
    cy: u32,
    radius: u32,
) -> f64 {
    let stride = (img_width + 1) as usize;

    let x1 = cx.saturating_sub(radius) as usize;
    let y1 = cy.saturating_sub(radius) as usize;
    let x2 = ((cx + radius + 1) as usize).min(img_width as usize);
    let y2 = ((cy + radius + 1) as usize).min(img_height as usize);

    let area = ((x2 - x1) * (y2 - y1)) as f64;
    if area == 0.0 {
        return 128.0;
    }

    // S = I[y2][x2] - I[y1][x2] - I[y2][x1] + I[y1][x1]
    let sum = integral[y2 * stride + x2] as f64
        - integral[y1 * stride + x2] as f64
        - integral[y2 * stride + x1] as f64
        + integral[y1 * stride + x1] as f64;

    sum / area
}

// -- Bilateral filter ---------------------------------------------------------

/// Edge-preserving smoothing of a colour image.
///
/// Each output pixel is a weighted mean over a disc of `radius` pixels. The
/// weight is the product of a spatial Gaussian (`sigma_space`) and a range
/// Gaussian (`sigma_color`) on the sum of absolute channel differences to
/// the centre pixel. Samples outside the image are skipped.
#[instrument(skip(image))]
pub fn bilateral_filter(
    image: &RgbImage,
    radius: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> RgbImage {
    let (width, height) = image.dimensions();
    let r = radius as i64;

    // Disc of (dx, dy, spatial weight).
    let space_coeff = -0.5 / (sigma_space as f64 * sigma_space as f64);
    let offsets: Vec<(i64, i64, f64)> = (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx * dx + dy * dy <= r * r)
        .map(|(dx, dy)| (dx, dy, (((dx * dx + dy * dy) as f64) * space_coeff).exp()))
        .collect();

    // Range weights indexed by the summed channel difference (0..=765).
    let color_coeff = -0.5 / (sigma_color as f64 * sigma_color as f64);
    let color_weights: Vec<f64> = (0..=3 * 255)
        .map(|d: u32| ((d as f64) * (d as f64) * color_coeff).exp())
        .collect();

    let mut output = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let Rgb(centre) = *image.get_pixel(x, y);
            let mut acc = [0.0f64; 3];
            let mut weight_sum = 0.0f64;

            for &(dx, dy, space_weight) in &offsets {
                let sx = x as i64 + dx;
                let sy = y as i64 + dy;
                if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
                    continue;
                }
                let Rgb(sample) = *image.get_pixel(sx as u32, sy as u32);
                let diff: u32 = sample
                    .iter()
                    .zip(centre.iter())
                    .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs())
                    .sum();
                let weight = space_weight * color_weights[diff as usize];
                for (channel, value) in acc.iter_mut().zip(sample) {
                    *channel += weight * value as f64;
                }
                weight_sum += weight;
            }

            let Rgb(out) = output.get_pixel_mut(x, y);
            for (dst, value) in out.iter_mut().zip(acc) {
                *dst = (value / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    output
}

// -- Tests --------------------------------------------------------------------
