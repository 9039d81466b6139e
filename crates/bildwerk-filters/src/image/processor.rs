// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode an upload, apply one filter, encode PNG.
// Operates on in-memory images using the `image` and `imageproc` crates.

use bildwerk_core::error::BildwerkError;
use bildwerk_core::{FilterKind, UploadFormat};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::{debug, info, instrument, warn};

use crate::filters::apply_filter;

/// Holds one decoded upload, normalised to 8-bit RGB.
///
/// The source is never modified: [`ImageProcessor::apply`] borrows it and
/// returns a new [`ProcessedImage`], so the dropdown can switch filters
/// without decoding the upload again.
///
/// ```ignore
/// let png = ImageProcessor::from_upload("photo.jpg", &bytes)?
///     .apply(FilterKind::Cartoon)?
///     .into_png_bytes();
/// ```
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    /// The decoded source image.
    image: RgbImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode an upload, checking its file name against the accepted
    /// extensions first.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_upload(name: &str, data: &[u8]) -> Result<Self, BildwerkError> {
        if UploadFormat::from_file_name(name).is_none() {
            warn!(name, "rejected upload with unsupported extension");
            return Err(BildwerkError::UnsupportedFormat(name.to_string()));
        }
        Self::from_bytes(data)
    }

    /// Create a processor from raw encoded bytes. Only JPEG and PNG content
    /// is accepted.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BildwerkError> {
        let format = image::guess_format(data).map_err(|err| {
            BildwerkError::Decode(format!("unrecognised image data: {}", err))
        })?;
        let upload_format = match format {
            ImageFormat::Jpeg => UploadFormat::Jpeg,
            ImageFormat::Png => UploadFormat::Png,
            other => {
                return Err(BildwerkError::UnsupportedFormat(format!("{other:?}")));
            }
        };

        let img = image::load_from_memory_with_format(data, format)
            .map_err(|err| BildwerkError::Decode(err.to_string()))?;
        debug!(
            mime = upload_format.mime_type(),
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "Image decoded from bytes"
        );
        Self::from_dynamic(img)
    }

    /// Wrap an already-decoded image, dropping alpha and promoting grayscale
    /// to three channels.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, BildwerkError> {
        Self::from_rgb(image.into_rgb8())
    }

    /// Wrap an RGB image.
    pub fn from_rgb(image: RgbImage) -> Result<Self, BildwerkError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(BildwerkError::EmptyImage { width, height });
        }
        info!(width, height, "Image loaded");
        Ok(Self { image })
    }

    // -- Accessors ------------------------------------------------------------

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the source image.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    // -- Filtering ------------------------------------------------------------

    /// Apply `kind` and encode the result as PNG.
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn apply(&self, kind: FilterKind) -> Result<ProcessedImage, BildwerkError> {
        info!(filter = %kind, "Applying filter");
        let image = apply_filter(&self.image, kind);
        let png_bytes = encode_png(&image)?;
        debug!(png_bytes = png_bytes.len(), "Processed image encoded");
        Ok(ProcessedImage {
            kind,
            image,
            png_bytes,
        })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the source image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, BildwerkError> {
        encode_png(&DynamicImage::ImageRgb8(self.image.clone()))
    }

    /// PNG of the source, scaled down so its longest edge is at most
    /// `max_dimension`. Small enough sources are encoded as they are.
    pub fn preview_png(&self, max_dimension: u32) -> Result<Vec<u8>, BildwerkError> {
        if self.image.width().max(self.image.height()) <= max_dimension {
            return self.to_png_bytes();
        }
        preview_png(&DynamicImage::ImageRgb8(self.image.clone()), max_dimension)
    }
}

/// The result of applying exactly one filter to an upload.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    kind: FilterKind,
    image: DynamicImage,
    png_bytes: Vec<u8>,
}

impl ProcessedImage {
    /// Filter that produced this image.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Borrow the processed pixels.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 1 for grayscale output, 3 for colour.
    pub fn channel_count(&self) -> u8 {
        self.image.color().channel_count()
    }

    /// Full-resolution PNG encoding, as offered for download.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png_bytes
    }

    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png_bytes
    }

    /// PNG for on-screen display, scaled down so its longest edge is at most
    /// `max_dimension`. Returns the download bytes when no scaling is needed.
    pub fn preview_png(&self, max_dimension: u32) -> Result<Vec<u8>, BildwerkError> {
        if fits_within(&self.image, max_dimension) {
            return Ok(self.png_bytes.clone());
        }
        preview_png(&self.image, max_dimension)
    }
}

fn fits_within(image: &DynamicImage, max_dimension: u32) -> bool {
    image.width().max(image.height()) <= max_dimension
}

/// Encode `image` as PNG, shrinking it first when it exceeds `max_dimension`.
fn preview_png(image: &DynamicImage, max_dimension: u32) -> Result<Vec<u8>, BildwerkError> {
    if fits_within(image, max_dimension) || max_dimension == 0 {
        return encode_png(image);
    }
    debug!(
        from_w = image.width(),
        from_h = image.height(),
        max_dimension,
        "Scaling preview"
    );
    encode_png(&image.resize(max_dimension, max_dimension, FilterType::Triangle))
}

/// Encode a `DynamicImage` as PNG, returning the raw bytes.
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, BildwerkError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| BildwerkError::Encode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    /// A 120x100 colour photo stand-in with edges, gradients and flat areas.
    fn sample_photo() -> RgbImage {
        RgbImage::from_fn(120, 100, |x, y| {
            if (30..90).contains(&x) && (20..80).contains(&y) {
                Rgb([240, 220, 30])
            } else {
                Rgb([(x * 2) as u8, (y * 2) as u8, 128])
            }
        })
    }

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), format)
            .expect("encode fixture");
        buffer
    }

    #[test]
    fn every_filter_produces_png() {
        let processor = ImageProcessor::from_rgb(sample_photo()).expect("processor");
        for kind in FilterKind::ALL {
            let processed = processor.apply(kind).expect("filter must not fail");
            assert_eq!(processed.kind(), kind);
            assert!(processed.png_bytes().starts_with(&PNG_SIGNATURE), "{kind}");

            let decoded = image::load_from_memory(processed.png_bytes()).expect("valid PNG");
            assert_eq!(decoded.color().channel_count(), kind.output_channels(), "{kind}");
            assert_eq!((decoded.width(), decoded.height()), (120, 100), "{kind}");
        }
    }

    #[test]
    fn channel_counts_follow_the_filter() {
        let processor = ImageProcessor::from_rgb(sample_photo()).expect("processor");
        assert_eq!(processor.apply(FilterKind::Grayscale).expect("gray").channel_count(), 1);
        assert_eq!(processor.apply(FilterKind::EdgeDetection).expect("edges").channel_count(), 1);
        for kind in [
            FilterKind::Blur,
            FilterKind::Sharpen,
            FilterKind::Cartoon,
            FilterKind::Negative,
            FilterKind::ZoomIn,
        ] {
            assert_eq!(processor.apply(kind).expect("colour").channel_count(), 3, "{kind}");
        }
    }

    #[test]
    fn zoom_round_trip_keeps_dimensions() {
        let processor = ImageProcessor::from_rgb(sample_photo()).expect("processor");
        let zoomed = processor.apply(FilterKind::ZoomIn).expect("zoom");
        assert_eq!((zoomed.width(), zoomed.height()), (120, 100));
    }

    #[test]
    fn negative_twice_restores_pixels() {
        let original = sample_photo();
        let once = ImageProcessor::from_rgb(original.clone())
            .expect("processor")
            .apply(FilterKind::Negative)
            .expect("negative");
        let twice = ImageProcessor::from_dynamic(once.image().clone())
            .expect("processor")
            .apply(FilterKind::Negative)
            .expect("negative");
        assert_eq!(twice.image().to_rgb8(), original);
    }

    #[test]
    fn decodes_png_and_jpeg_uploads() {
        let photo = DynamicImage::ImageRgb8(sample_photo());

        let png = encode(photo.clone(), ImageFormat::Png);
        let from_png = ImageProcessor::from_upload("photo.png", &png).expect("png");
        assert_eq!(from_png.as_rgb(), &sample_photo());

        let jpeg = encode(photo, ImageFormat::Jpeg);
        let from_jpeg = ImageProcessor::from_upload("photo.JPEG", &jpeg).expect("jpeg");
        assert_eq!((from_jpeg.width(), from_jpeg.height()), (120, 100));
    }

    #[test]
    fn rgba_and_gray_uploads_become_rgb() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 40])));
        let processor = ImageProcessor::from_bytes(&encode(rgba, ImageFormat::Png)).expect("rgba");
        assert_eq!(processor.as_rgb().get_pixel(0, 0).0, [1, 2, 3]);

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([90])));
        let processor = ImageProcessor::from_bytes(&encode(gray, ImageFormat::Png)).expect("gray");
        assert_eq!(processor.as_rgb().get_pixel(5, 5).0, [90, 90, 90]);
    }

    #[test]
    fn rejects_wrong_extension() {
        let png = encode(DynamicImage::ImageRgb8(sample_photo()), ImageFormat::Png);
        assert!(matches!(
            ImageProcessor::from_upload("photo.gif", &png),
            Err(BildwerkError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_other_encoded_formats() {
        let bmp = encode(DynamicImage::ImageRgb8(sample_photo()), ImageFormat::Bmp);
        assert!(matches!(
            ImageProcessor::from_bytes(&bmp),
            Err(BildwerkError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_garbage_and_truncated_data() {
        assert!(matches!(
            ImageProcessor::from_bytes(b"definitely not an image"),
            Err(BildwerkError::Decode(_))
        ));

        let png = encode(DynamicImage::ImageRgb8(sample_photo()), ImageFormat::Png);
        assert!(matches!(
            ImageProcessor::from_bytes(&png[..png.len() / 2]),
            Err(BildwerkError::Decode(_))
        ));
    }

    #[test]
    fn rejects_empty_image() {
        assert!(matches!(
            ImageProcessor::from_rgb(RgbImage::new(0, 5)),
            Err(BildwerkError::EmptyImage { width: 0, height: 5 })
        ));
    }

    #[test]
    fn preview_is_scaled_but_download_is_not() {
        let processor = ImageProcessor::from_rgb(sample_photo()).expect("processor");
        let processed = processor.apply(FilterKind::Blur).expect("blur");

        let preview = image::load_from_memory(&processed.preview_png(60).expect("preview"))
            .expect("decode preview");
        assert_eq!((preview.width(), preview.height()), (60, 50));

        let download = image::load_from_memory(processed.png_bytes()).expect("decode");
        assert_eq!((download.width(), download.height()), (120, 100));

        assert_eq!(processed.preview_png(4000).expect("preview"), processed.png_bytes());
    }

    #[test]
    fn source_preview_respects_limit() {
        let processor = ImageProcessor::from_rgb(sample_photo()).expect("processor");
        let preview = image::load_from_memory(&processor.preview_png(30).expect("preview"))
            .expect("decode preview");
        assert!(preview.width() <= 30 && preview.height() <= 30);
    }

    #[test]
    fn small_source_preview_is_the_full_png() {
        let processor = ImageProcessor::from_rgb(sample_photo()).expect("processor");
        let full = processor.to_png_bytes().expect("png");
        assert_eq!(processor.preview_png(4000).expect("preview"), full);

        let decoded = image::load_from_memory(&full).expect("decode");
        assert_eq!(decoded.to_rgb8(), sample_photo());
    }
}
