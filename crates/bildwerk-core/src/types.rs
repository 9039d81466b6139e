// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Bildwerk: the closed filter list and accepted uploads.

use serde::{Deserialize, Serialize};

/// File name offered for the processed image download.
pub const DOWNLOAD_FILE_NAME: &str = "processed_image.png";

/// MIME type of the processed image download.
pub const DOWNLOAD_MIME_TYPE: &str = "image/png";

/// The fixed set of filters a user can pick from.
///
/// Variant order is the dropdown order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    #[default]
    Grayscale,
    Blur,
    EdgeDetection,
    Sharpen,
    Cartoon,
    Negative,
    ZoomIn,
}

impl FilterKind {
    /// Every filter, in dropdown order.
    pub const ALL: [FilterKind; 7] = [
        Self::Grayscale,
        Self::Blur,
        Self::EdgeDetection,
        Self::Sharpen,
        Self::Cartoon,
        Self::Negative,
        Self::ZoomIn,
    ];

    /// Label shown in the filter dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::Blur => "Blur",
            Self::EdgeDetection => "Edge Detection",
            Self::Sharpen => "Sharpen",
            Self::Cartoon => "Cartoon Effect",
            Self::Negative => "Negative",
            Self::ZoomIn => "Zoom In (1.5x)",
        }
    }

    /// Caption under the processed image.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale Image",
            Self::Blur => "Blurred Image",
            Self::EdgeDetection => "Edges Detected",
            Self::Sharpen => "Sharpened Image",
            Self::Cartoon => "Cartoonized Image",
            Self::Negative => "Negative Image",
            Self::ZoomIn => "Zoomed Image",
        }
    }

    /// One-line explanation for the filter guide.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Grayscale => "Reduces the photo to a single luminance channel.",
            Self::Blur => "Gaussian smoothing with a 15x15 kernel.",
            Self::EdgeDetection => "Canny edge map of the grayscale photo (thresholds 100 and 200).",
            Self::Sharpen => "Convolves with a 3x3 high-pass kernel; colours are kept.",
            Self::Cartoon => {
                "Keeps bilateral-smoothed colour inside an adaptive-threshold edge mask."
            }
            Self::Negative => "Inverts every channel of every pixel.",
            Self::ZoomIn => "Crops the centre two thirds and scales it back to full size.",
        }
    }

    /// Number of channels in this filter's output for a 3-channel input.
    pub fn output_channels(&self) -> u8 {
        match self {
            Self::Grayscale | Self::EdgeDetection => 1,
            _ => 3,
        }
    }

    /// Look up a filter by its dropdown label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Encoded image formats accepted as uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadFormat {
    Jpeg,
    Png,
}

impl UploadFormat {
    /// Extensions the upload widgets filter on.
    pub const EXTENSIONS: [&'static str; 3] = ["jpg", "jpeg", "png"];

    /// MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Infer the upload format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Infer the upload format from a file name such as `holiday.JPG`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    /// Value for the `accept` attribute of a file input.
    pub fn accept_attribute() -> String {
        Self::EXTENSIONS
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_lookup() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(FilterKind::from_label("Sepia"), None);
    }

    #[test]
    fn only_grayscale_and_edges_drop_colour() {
        let single: Vec<_> = FilterKind::ALL
            .into_iter()
            .filter(|kind| kind.output_channels() == 1)
            .collect();
        assert_eq!(single, vec![FilterKind::Grayscale, FilterKind::EdgeDetection]);
    }

    #[test]
    fn upload_format_from_file_name() {
        assert_eq!(UploadFormat::from_file_name("cat.JPG"), Some(UploadFormat::Jpeg));
        assert_eq!(UploadFormat::from_file_name("a.b.jpeg"), Some(UploadFormat::Jpeg));
        assert_eq!(UploadFormat::from_file_name("shot.png"), Some(UploadFormat::Png));
        assert_eq!(UploadFormat::from_file_name("scan.tiff"), None);
        assert_eq!(UploadFormat::from_file_name("noextension"), None);
    }

    #[test]
    fn accept_attribute_lists_every_extension() {
        assert_eq!(UploadFormat::accept_attribute(), ".jpg,.jpeg,.png");
    }
}
