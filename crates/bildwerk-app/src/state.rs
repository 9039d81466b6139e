// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Studio state — one photo, one filter choice, and the result of applying it.

use bildwerk_core::FilterKind;
use bildwerk_core::human_errors::HumanError;

use crate::services::app_services::{LoadedUpload, RenderedResult};

/// Shown instead of the filter controls until a photo is loaded.
pub const INSTRUCTIONS: &str =
    "Please upload an image or take a photo to start processing.";

/// Outcome of applying the selected filter.
pub type RenderOutcome = Result<RenderedResult, HumanError>;

/// What the studio page should draw.
#[derive(Debug)]
pub enum StudioPanel<'a> {
    /// No photo yet: instructions, plus the reason the last upload failed.
    Instructions {
        message: &'static str,
        error: Option<&'a HumanError>,
    },
    /// A photo is loaded: original preview, filter dropdown, and result.
    Controls {
        upload: &'a LoadedUpload,
        selected: FilterKind,
        outcome: Option<&'a RenderOutcome>,
    },
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct StudioState {
    /// The current photo, if any.
    upload: Option<LoadedUpload>,
    /// Dropdown selection; survives new uploads.
    selected: FilterKind,
    /// Result of applying `selected` to `upload`.
    outcome: Option<RenderOutcome>,
    /// Why the most recent upload was rejected.
    upload_error: Option<HumanError>,
}

impl StudioState {
    pub fn new(default_filter: FilterKind) -> Self {
        Self {
            upload: None,
            selected: default_filter,
            outcome: None,
            upload_error: None,
        }
    }

    pub fn selected(&self) -> FilterKind {
        self.selected
    }

    pub fn upload(&self) -> Option<&LoadedUpload> {
        self.upload.as_ref()
    }

    /// Whether the dropdown and result area are drawn.
    pub fn shows_filter_controls(&self) -> bool {
        self.upload.is_some()
    }

    pub fn panel(&self) -> StudioPanel<'_> {
        match self.upload {
            None => StudioPanel::Instructions {
                message: INSTRUCTIONS,
                error: self.upload_error.as_ref(),
            },
            Some(ref upload) => StudioPanel::Controls {
                upload,
                selected: self.selected,
                outcome: self.outcome.as_ref(),
            },
        }
    }

    /// Replace the photo with a freshly decoded one and its rendered result.
    pub fn set_upload(&mut self, upload: LoadedUpload, outcome: RenderOutcome) {
        self.upload = Some(upload);
        self.outcome = Some(outcome);
        self.upload_error = None;
    }

    /// Drop the current photo and remember why the new one was refused.
    pub fn reject_upload(&mut self, error: HumanError) {
        self.upload = None;
        self.outcome = None;
        self.upload_error = Some(error);
    }

    /// Change the dropdown selection. `outcome` is `None` when no photo is
    /// loaded.
    pub fn select(&mut self, kind: FilterKind, outcome: Option<RenderOutcome>) {
        self.selected = kind;
        self.outcome = outcome;
    }
}

impl Default for StudioState {
    fn default() -> Self {
        Self::new(FilterKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildwerk_core::BildwerkError;
    use bildwerk_core::human_errors::humanize_error;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use crate::services::app_services::{AppServices, UploadSource};

    fn loaded(svc: &AppServices) -> LoadedUpload {
        let image = RgbImage::from_fn(100, 100, |x, y| Rgb([x as u8, y as u8, 50]));
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .expect("encode fixture");
        svc.load_upload(UploadSource::File, "photo.png", &png).expect("upload")
    }

    #[test]
    fn without_a_photo_only_instructions_are_shown() {
        let state = StudioState::default();
        assert!(!state.shows_filter_controls());
        match state.panel() {
            StudioPanel::Instructions { message, error } => {
                assert_eq!(message, INSTRUCTIONS);
                assert!(error.is_none());
            }
            other => panic!("expected instructions, got {other:?}"),
        }
    }

    #[test]
    fn a_photo_brings_up_the_controls() {
        let svc = AppServices::fallback();
        let upload = loaded(&svc);
        let outcome = svc.render(&upload, FilterKind::Blur).map_err(|e| humanize_error(&e));

        let mut state = StudioState::new(FilterKind::Blur);
        state.set_upload(upload, outcome);

        assert!(state.shows_filter_controls());
        match state.panel() {
            StudioPanel::Controls { selected, outcome, .. } => {
                assert_eq!(selected, FilterKind::Blur);
                let result = outcome.expect("outcome").as_ref().expect("rendered");
                assert_eq!(result.kind, FilterKind::Blur);
            }
            other => panic!("expected controls, got {other:?}"),
        }
    }

    #[test]
    fn changing_selection_replaces_the_result() {
        let svc = AppServices::fallback();
        let upload = loaded(&svc);
        let first = svc.render(&upload, FilterKind::Grayscale).map_err(|e| humanize_error(&e));

        let mut state = StudioState::default();
        state.set_upload(upload, first);

        let next = state
            .upload()
            .map(|u| svc.render(u, FilterKind::Negative).map_err(|e| humanize_error(&e)));
        state.select(FilterKind::Negative, next);

        assert_eq!(state.selected(), FilterKind::Negative);
        match state.panel() {
            StudioPanel::Controls { outcome: Some(Ok(result)), .. } => {
                assert_eq!(result.kind, FilterKind::Negative);
                assert_eq!(result.channels, 3);
            }
            other => panic!("expected a rendered negative, got {other:?}"),
        }
    }

    #[test]
    fn rejected_upload_hides_controls_and_explains() {
        let svc = AppServices::fallback();
        let mut state = StudioState::default();
        state.set_upload(loaded(&svc), Err(humanize_error(&BildwerkError::Encode("x".into()))));

        let err = BildwerkError::UnsupportedFormat("notes.txt".into());
        state.reject_upload(humanize_error(&err));

        assert!(!state.shows_filter_controls());
        match state.panel() {
            StudioPanel::Instructions { error: Some(error), .. } => {
                assert_eq!(error, &humanize_error(&err));
            }
            other => panic!("expected instructions with an error, got {other:?}"),
        }
    }

    #[test]
    fn selection_without_photo_is_remembered() {
        let mut state = StudioState::default();
        state.select(FilterKind::Cartoon, None);
        assert_eq!(state.selected(), FilterKind::Cartoon);
        assert!(!state.shows_filter_controls());
    }
}
