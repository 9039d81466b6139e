// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Studio page — upload or capture a photo, pick a filter, download the result.
//
// Uploads and camera captures both arrive through file inputs; on phones the
// `capture` hint opens the camera directly. The download is a `data:` link
// carrying the PNG, so it works in the browser and in the desktop webview.

use dioxus::prelude::*;

use bildwerk_core::human_errors::{HumanError, Severity, humanize_error};
use bildwerk_core::{DOWNLOAD_FILE_NAME, FilterKind, UploadFormat};

use crate::services::app_services::{AppServices, RenderedResult, UploadSource};
use crate::state::{StudioPanel, StudioState};

#[component]
pub fn Studio() -> Element {
    let state = use_context::<Signal<StudioState>>();

    let intro = if state.read().shows_filter_controls() {
        "Choose a filter, or load another photo to start over."
    } else {
        "Upload a photo or take one with your camera, choose a filter, and download the result."
    };

    let content = match state.read().panel() {
        StudioPanel::Instructions { message, error } => rsx! {
            Instructions { message, error: error.cloned() }
        },
        StudioPanel::Controls { upload, selected, outcome } => {
            let caption = match upload.source {
                UploadSource::File => format!("Original Image ({})", upload.name),
                UploadSource::Camera => "Captured Photo".to_string(),
            };
            let size = format!("{} x {} px", upload.width(), upload.height());
            let preview_url = upload.preview_url.clone();
            let result_view = match outcome.cloned() {
                Some(Ok(result)) => rsx! { ResultView { result } },
                Some(Err(error)) => rsx! { ErrorCard { error } },
                None => rsx! {},
            };
            rsx! {
                Preview { url: preview_url, caption, detail: size }
                FilterSelect { selected }
                {result_view}
            }
        }
    };

    rsx! {
        div {
            h1 { "\u{1F5BC} Image Processing Studio" }
            p { style: "color: #666;", "{intro}" }
            UploadControls {}
            {content}
        }
    }
}

// -- Upload ---------------------------------------------------------------------

#[component]
fn UploadControls() -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<StudioState>>();
    let accept = UploadFormat::accept_attribute();

    rsx! {
        div { style: "display: flex; gap: 8px; margin: 16px 0;",
            label {
                style: "flex: 1; padding: 16px; border-radius: 12px; border: 2px dashed #007aff; color: #007aff; background: white; font-size: 16px; text-align: center; cursor: pointer;",
                "\u{1F4C2} Upload an Image"
                input {
                    r#type: "file",
                    accept: "{accept}",
                    style: "display: none;",
                    onchange: {
                        let svc = svc.clone();
                        move |evt: FormEvent| receive_files(svc.clone(), state, UploadSource::File, evt)
                    },
                }
            }
            label {
                style: "flex: 1; padding: 16px; border-radius: 12px; border: 2px dashed #34c759; color: #34c759; background: white; font-size: 16px; text-align: center; cursor: pointer;",
                "\u{1F4F7} Take a Photo"
                input {
                    r#type: "file",
                    accept: "image/jpeg,image/png",
                    "capture": "environment",
                    style: "display: none;",
                    onchange: {
                        let svc = svc.clone();
                        move |evt: FormEvent| receive_files(svc.clone(), state, UploadSource::Camera, evt)
                    },
                }
            }
        }
    }
}

/// Read the first selected file, decode it, and render the current filter.
async fn receive_files(
    svc: AppServices,
    mut state: Signal<StudioState>,
    source: UploadSource,
    evt: FormEvent,
) {
    let Some(file) = evt.files().into_iter().next() else {
        return;
    };
    let name = file.name();

    if let Err(e) = svc.check_upload_size(file.size()) {
        state.write().reject_upload(humanize_error(&e));
        return;
    }

    let bytes = match file.read_bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(name = %name, error = %e, "failed to read upload");
            let err = bildwerk_core::BildwerkError::Io(std::io::Error::other(e.to_string()));
            state.write().reject_upload(humanize_error(&err));
            return;
        }
    };

    match svc.load_upload(source, &name, &bytes[..]) {
        Ok(upload) => {
            let selected = state.read().selected();
            let outcome = svc.render(&upload, selected).map_err(|e| {
                tracing::error!(filter = %selected, error = %e, "filter failed");
                humanize_error(&e)
            });
            state.write().set_upload(upload, outcome);
        }
        Err(e) => {
            tracing::warn!(name = %name, error = %e, "upload rejected");
            state.write().reject_upload(humanize_error(&e));
        }
    }
}

// -- Filter selection -------------------------------------------------------------

#[component]
fn FilterSelect(selected: FilterKind) -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<StudioState>>();

    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "Choose Processing Technique" }
            select {
                style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                value: selected.label(),
                onchange: move |evt| {
                    let Some(kind) = FilterKind::from_label(&evt.value()) else {
                        return;
                    };
                    let outcome = state.read().upload().map(|upload| {
                        svc.render(upload, kind).map_err(|e| {
                            tracing::error!(filter = %kind, error = %e, "filter failed");
                            humanize_error(&e)
                        })
                    });
                    tracing::info!(filter = %kind, "filter selected");
                    state.write().select(kind, outcome);
                },
                for kind in FilterKind::ALL {
                    option { value: kind.label(), selected: kind == selected, "{kind.label()}" }
                }
            }
        }
    }
}

// -- Display ----------------------------------------------------------------------

#[component]
fn Instructions(message: &'static str, error: Option<HumanError>) -> Element {
    rsx! {
        if let Some(error) = error {
            ErrorCard { error }
        }
        p { style: "text-align: center; color: #888; margin: 48px 0;", "{message}" }
    }
}

#[component]
fn Preview(url: String, caption: String, detail: String) -> Element {
    rsx! {
        figure { style: "margin: 16px 0; text-align: center;",
            img { src: "{url}", alt: "{caption}", style: "max-width: 100%; border-radius: 8px;" }
            figcaption { style: "color: #666; font-size: 14px; margin-top: 4px;",
                "{caption}"
                span { style: "color: #aaa; margin-left: 8px;", "{detail}" }
            }
        }
    }
}

#[component]
fn ResultView(result: RenderedResult) -> Element {
    let channels = if result.channels == 1 { "grayscale" } else { "colour" };
    let detail = format!("{} x {} px, {channels}", result.width, result.height);
    let size_kb = result.png_bytes.len() / 1024;

    rsx! {
        Preview { url: result.preview_url.clone(), caption: result.kind.caption().to_string(), detail }
        a {
            href: "{result.download_url}",
            download: DOWNLOAD_FILE_NAME,
            style: "display: block; padding: 12px; border-radius: 8px; background: #007aff; color: white; font-size: 16px; text-align: center; text-decoration: none;",
            "Download Processed Image ({size_kb} KB)"
        }
        SaveAsButton { png_bytes: result.png_bytes.clone() }
    }
}

#[cfg(feature = "desktop")]
#[component]
fn SaveAsButton(png_bytes: Vec<u8>) -> Element {
    let svc = use_context::<AppServices>();
    let mut status_msg = use_signal(|| Option::<String>::None);

    rsx! {
        button {
            style: "width: 100%; padding: 8px; border-radius: 8px; border: 1px solid #ccc; background: white; font-size: 14px; margin-top: 8px;",
            onclick: move |_| {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name(DOWNLOAD_FILE_NAME)
                    .add_filter("PNG image", &["png"])
                    .save_file()
                {
                    match svc.save_png(&path, &png_bytes) {
                        Ok(()) => status_msg.set(Some(format!("Saved to {}", path.display()))),
                        Err(e) => status_msg.set(Some(humanize_error(&e).message)),
                    }
                }
            },
            "Save As\u{2026}"
        }
        if let Some(ref msg) = *status_msg.read() {
            p { style: "margin-top: 8px; color: #666; font-size: 14px; text-align: center;", "{msg}" }
        }
    }
}

#[cfg(not(feature = "desktop"))]
#[component]
fn SaveAsButton(png_bytes: Vec<u8>) -> Element {
    let _ = png_bytes;
    rsx! {}
}

#[component]
fn ErrorCard(error: HumanError) -> Element {
    let (color, bg) = match error.severity {
        Severity::ActionRequired => ("#856404", "#fff3cd"),
        Severity::Permanent => ("#721c24", "#f8d7da"),
    };
    rsx! {
        div { style: "padding: 12px; margin: 12px 0; border-radius: 8px; color: {color}; background: {bg};",
            strong { "{error.message}" }
            p { style: "margin: 4px 0 0; font-size: 14px;", "{error.suggestion}" }
        }
    }
}
