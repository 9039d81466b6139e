// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads configuration once at startup and turns
// uploads and filter selections into data the studio page can render.
//
// Nothing here outlives a single upload: the decoded image lives in the
// page state and is dropped when the next photo arrives.

use std::sync::Arc;

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::{AppConfig, DOWNLOAD_MIME_TYPE, FilterKind};
use bildwerk_filters::ImageProcessor;
use tracing::{info, warn};

use super::data_dir;
use super::data_url::data_url;

/// How a photo reached the studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSource {
    /// Picked from disk; the file name must carry an accepted extension.
    File,
    /// Taken with the camera; the name is whatever the device chose.
    Camera,
}

/// A decoded upload plus what the page needs to show it.
#[derive(Debug, Clone)]
pub struct LoadedUpload {
    pub name: String,
    pub source: UploadSource,
    pub processor: ImageProcessor,
    /// `data:image/png` URL of the (possibly scaled) original.
    pub preview_url: String,
}

impl LoadedUpload {
    pub fn width(&self) -> u32 {
        self.processor.width()
    }

    pub fn height(&self) -> u32 {
        self.processor.height()
    }
}

/// One filter applied to the current upload, ready to display and download.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub kind: FilterKind,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    /// `data:image/png` URL of the (possibly scaled) result.
    pub preview_url: String,
    /// `data:image/png` URL of the full-resolution result.
    pub download_url: String,
    /// Full-resolution PNG, for the native save dialog.
    pub png_bytes: Vec<u8>,
}

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// Cheaply cloneable so it can be moved into event handlers.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
}

impl AppServices {
    /// Load configuration from the data directory. Call once at app startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        let config = AppConfig::load(&dir)?;
        Ok(Self::with_config(config))
    }

    /// Services running on built-in defaults, used when `config.json`
    /// cannot be read.
    pub fn fallback() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // -- Uploads -------------------------------------------------------------

    /// Reject uploads above the configured size before reading them.
    pub fn check_upload_size(&self, size: u64) -> Result<()> {
        let limit = self.config.max_upload_bytes;
        if size > limit {
            warn!(size, limit, "upload too large");
            return Err(BildwerkError::UploadTooLarge { size, limit });
        }
        Ok(())
    }

    /// Decode an upload and prepare its on-screen preview.
    pub fn load_upload(
        &self,
        source: UploadSource,
        name: &str,
        bytes: &[u8],
    ) -> Result<LoadedUpload> {
        self.check_upload_size(bytes.len() as u64)?;

        let processor = match source {
            UploadSource::File => ImageProcessor::from_upload(name, bytes)?,
            UploadSource::Camera => ImageProcessor::from_bytes(bytes)?,
        };
        let preview = processor.preview_png(self.config.preview_max_dimension)?;

        info!(
            name,
            ?source,
            width = processor.width(),
            height = processor.height(),
            "photo loaded"
        );

        Ok(LoadedUpload {
            name: name.to_string(),
            source,
            processor,
            preview_url: data_url(DOWNLOAD_MIME_TYPE, &preview),
        })
    }

    // -- Filtering -----------------------------------------------------------

    /// Apply `kind` to the upload and build the preview and download URLs.
    pub fn render(&self, upload: &LoadedUpload, kind: FilterKind) -> Result<RenderedResult> {
        let processed = upload.processor.apply(kind)?;
        let preview = processed.preview_png(self.config.preview_max_dimension)?;

        let result = RenderedResult {
            kind,
            width: processed.width(),
            height: processed.height(),
            channels: processed.channel_count(),
            preview_url: data_url(DOWNLOAD_MIME_TYPE, &preview),
            download_url: data_url(DOWNLOAD_MIME_TYPE, processed.png_bytes()),
            png_bytes: processed.into_png_bytes(),
        };
        info!(filter = %kind, png_bytes = result.png_bytes.len(), "filter rendered");
        Ok(result)
    }

    // -- Export --------------------------------------------------------------

    /// Write the processed PNG where the user chose in the save dialog.
    #[cfg(feature = "desktop")]
    pub fn save_png(&self, path: &std::path::Path, png_bytes: &[u8]) -> Result<()> {
        std::fs::write(path, png_bytes)?;
        info!(path = %path.display(), bytes = png_bytes.len(), "processed image saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    fn photo_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode fixture");
        bytes
    }

    #[test]
    fn services_carry_the_given_config() {
        let svc = AppServices::with_config(AppConfig {
            default_filter: FilterKind::Sharpen,
            ..AppConfig::default()
        });
        assert_eq!(svc.config().default_filter, FilterKind::Sharpen);
        assert_eq!(AppServices::fallback().config(), &AppConfig::default());
    }

    #[test]
    fn every_filter_renders_for_a_100px_photo() {
        let svc = AppServices::fallback();
        let upload = svc
            .load_upload(UploadSource::File, "photo.png", &photo_png(100, 100))
            .expect("upload");

        for kind in FilterKind::ALL {
            let result = svc.render(&upload, kind).expect("render");
            assert_eq!(result.kind, kind);
            assert_eq!(result.channels, kind.output_channels());
            assert!(!result.png_bytes.is_empty());
            assert!(result.download_url.starts_with("data:image/png;base64,"));
        }
    }

    #[test]
    fn preview_is_limited_but_download_is_full_size() {
        let svc = AppServices::with_config(AppConfig {
            preview_max_dimension: 50,
            ..AppConfig::default()
        });
        let upload = svc
            .load_upload(UploadSource::File, "photo.png", &photo_png(200, 100))
            .expect("upload");
        let result = svc.render(&upload, FilterKind::ZoomIn).expect("render");

        assert_eq!((result.width, result.height), (200, 100));
        assert_ne!(result.preview_url, result.download_url);
    }

    #[test]
    fn oversized_upload_is_rejected() {
        let svc = AppServices::with_config(AppConfig {
            max_upload_bytes: 64,
            ..AppConfig::default()
        });
        let err = svc
            .load_upload(UploadSource::File, "photo.png", &photo_png(100, 100))
            .expect_err("too large");
        assert!(matches!(err, BildwerkError::UploadTooLarge { limit: 64, .. }));
    }

    #[test]
    fn camera_frames_skip_the_extension_check() {
        let svc = AppServices::fallback();
        let png = photo_png(120, 100);

        assert!(matches!(
            svc.load_upload(UploadSource::File, "capture", &png),
            Err(BildwerkError::UnsupportedFormat(_))
        ));
        let upload = svc
            .load_upload(UploadSource::Camera, "capture", &png)
            .expect("camera frame");
        assert_eq!((upload.width(), upload.height()), (120, 100));
    }
}
