// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-step filters — grayscale, Gaussian blur, sharpen, negative, zoom.

use image::imageops::{self, FilterType};
use image::{GrayImage, Rgb, Rgb32FImage, RgbImage};
use tracing::{debug, instrument};

/// Side length of the Gaussian blur kernel.
pub const BLUR_KERNEL_SIZE: usize = 15;

/// High-pass sharpening kernel, row-major.
pub const SHARPEN_KERNEL: [i32; 9] = [0, -1, 0, -1, 5, -1, 0, -1, 0];

/// Magnification applied by [`zoom_in`].
pub const ZOOM_FACTOR: f32 = 1.5;

/// Reduce to a single luminance channel.
#[instrument(skip_all)]
pub fn grayscale(image: &RgbImage) -> GrayImage {
    imageops::grayscale(image)
}

/// Gaussian smoothing with a fixed 15-tap kernel.
///
/// The standard deviation is derived from the kernel size the usual way:
/// `0.3 * ((size - 1) / 2 - 1) + 0.8`, which gives 2.6 for 15 taps.
///
/// Both passes accumulate in `f32` and the result is rounded once at the
/// end, so flat regions keep their exact value. Borders are reflected
/// without repeating the edge pixel, as in [`sharpen`].
#[instrument(skip_all)]
pub fn gaussian_blur(image: &RgbImage) -> RgbImage {
    let kernel = gaussian_kernel(BLUR_KERNEL_SIZE);
    let (width, height) = image.dimensions();

    let source = Rgb32FImage::from_fn(width, height, |x, y| {
        let Rgb(sample) = *image.get_pixel(x, y);
        Rgb(sample.map(f32::from))
    });
    let rows = convolve_axis(&source, &kernel, Axis::Horizontal);
    let blurred = convolve_axis(&rows, &kernel, Axis::Vertical);

    RgbImage::from_fn(width, height, |x, y| {
        let Rgb(sample) = *blurred.get_pixel(x, y);
        Rgb(sample.map(|v| v.round().clamp(0.0, 255.0) as u8))
    })
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One pass of a separable convolution along `axis`.
fn convolve_axis(image: &Rgb32FImage, kernel: &[f32], axis: Axis) -> Rgb32FImage {
    let (width, height) = image.dimensions();
    let half = (kernel.len() / 2) as i64;

    Rgb32FImage::from_fn(width, height, |x, y| {
        let mut acc = [0.0f32; 3];
        for (tap, &weight) in kernel.iter().enumerate() {
            let offset = tap as i64 - half;
            let (sx, sy) = match axis {
                Axis::Horizontal => (reflect_101(x as i64 + offset, width), y),
                Axis::Vertical => (x, reflect_101(y as i64 + offset, height)),
            };
            let Rgb(sample) = *image.get_pixel(sx, sy);
            for (channel, value) in acc.iter_mut().zip(sample) {
                *channel += weight * value;
            }
        }
        Rgb(acc)
    })
}

/// Sigma used for a Gaussian kernel of `size` taps.
pub fn sigma_for_kernel_size(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1-D Gaussian kernel with `size` taps (odd).
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = sigma_for_kernel_size(size);
    let centre = (size / 2) as f32;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - centre;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    debug!(size, sigma, "Gaussian kernel built");
    kernel
}

/// Convolve with [`SHARPEN_KERNEL`]. Colour channels are filtered
/// independently; borders are reflected without repeating the edge pixel.
#[instrument(skip_all)]
pub fn sharpen(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut output = RgbImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0i32; 3];
            for (tap, &weight) in SHARPEN_KERNEL.iter().enumerate() {
                if weight == 0 {
                    continue;
                }
                let dx = (tap % 3) as i64 - 1;
                let dy = (tap / 3) as i64 - 1;
                let sx = reflect_101(x as i64 + dx, width);
                let sy = reflect_101(y as i64 + dy, height);
                let Rgb(sample) = *image.get_pixel(sx, sy);
                for (channel, value) in acc.iter_mut().zip(sample) {
                    *channel += weight * value as i32;
                }
            }
            let Rgb(out) = output.get_pixel_mut(x, y);
            for (dst, value) in out.iter_mut().zip(acc) {
                *dst = value.clamp(0, 255) as u8;
            }
        }
    }

    output
}

/// Map an out-of-range coordinate back into `0..len` by mirroring around the
/// edge pixel (`-1 -> 1`, `len -> len - 2`). Offsets wider than the axis
/// keep bouncing between the edges. Single-pixel axes map to 0.
fn reflect_101(coord: i64, len: u32) -> u32 {
    let len = len as i64;
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let c = coord.rem_euclid(period);
    (if c >= len { period - c } else { c }) as u32
}

/// Invert every channel of every pixel. Applying it twice is the identity.
#[instrument(skip_all)]
pub fn negative(image: &RgbImage) -> RgbImage {
    let mut inverted = image.clone();
    imageops::invert(&mut inverted);
    inverted
}

/// Crop the centred 1/[`ZOOM_FACTOR`] region and scale it back up to the
/// original dimensions with linear interpolation.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn zoom_in(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let (x, y, crop_w, crop_h) = zoom_window(width, height);
    debug!(x, y, crop_w, crop_h, "Zoom window");

    let cropped = imageops::crop_imm(image, x, y, crop_w, crop_h).to_image();
    imageops::resize(&cropped, width, height, FilterType::Triangle)
}

/// Top-left corner and size of the centred zoom window. The window is at
/// least one pixel on each axis.
pub fn zoom_window(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let crop_w = ((width as f32 / ZOOM_FACTOR) as u32).clamp(1, width.max(1));
    let crop_h = ((height as f32 / ZOOM_FACTOR) as u32).clamp(1, height.max(1));
    let x = (width - crop_w) / 2;
    let y = (height - crop_h) / 2;
    (x, y, crop_w, crop_h)
}
