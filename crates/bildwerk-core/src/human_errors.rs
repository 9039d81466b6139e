// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages shown in place of the processed image.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::BildwerkError;
use crate::types::UploadFormat;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user can fix it (pick another file, shrink the photo).
    ActionRequired,
    /// Retrying with the same input will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives colour in UI).
    pub severity: Severity,
}

/// Convert a `BildwerkError` into a `HumanError` for display.
pub fn humanize_error(err: &BildwerkError) -> HumanError {
    match err {
        BildwerkError::UnsupportedFormat(detail) => HumanError {
            message: "This type of file isn't supported.".into(),
            suggestion: format!(
                "Choose a photo saved as {}. (Got: {detail})",
                UploadFormat::EXTENSIONS.join(", ")
            ),
            severity: Severity::ActionRequired,
        },

        BildwerkError::UploadTooLarge { size, limit } => HumanError {
            message: "This photo is too large.".into(),
            suggestion: format!(
                "The limit is {} MB and this file is {} MB. Try a smaller photo.",
                megabytes(*limit),
                megabytes(*size)
            ),
            severity: Severity::ActionRequired,
        },

        BildwerkError::Decode(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The file may be damaged. Try opening it in another program, or save it again as JPEG or PNG.".into(),
            severity: Severity::Permanent,
        },

        BildwerkError::EmptyImage { .. } => HumanError {
            message: "This image is empty.".into(),
            suggestion: "The file contains no pixels. Choose a different photo.".into(),
            severity: Severity::Permanent,
        },

        BildwerkError::Encode(_) => HumanError {
            message: "The result couldn't be prepared for download.".into(),
            suggestion: "Try a different filter, or upload the photo again.".into(),
            severity: Severity::Permanent,
        },

        BildwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or choose a different folder.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        BildwerkError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Check config.json for typos, or delete it to use the defaults.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

fn megabytes(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / (1024.0 * 1024.0))
}
