// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter guide — what each filter in the dropdown does.

use dioxus::prelude::*;

use bildwerk_core::{DOWNLOAD_FILE_NAME, FilterKind, UploadFormat};

use crate::Route;

#[component]
pub fn Guide() -> Element {
    let formats = UploadFormat::EXTENSIONS.join(", ");

    rsx! {
        div {
            h1 { "Filters" }
            p { style: "color: #666;",
                "Every filter works on the whole photo with fixed settings. Photos can be {formats}; results download as {DOWNLOAD_FILE_NAME}."
            }

            for kind in FilterKind::ALL {
                FilterRow { kind }
            }

            Link { to: Route::Studio {},
                style: "display: block; padding: 12px; border-radius: 8px; background: #007aff; color: white; font-size: 16px; text-align: center; text-decoration: none; margin-top: 16px;",
                "Open the Studio"
            }
        }
    }
}

#[component]
fn FilterRow(kind: FilterKind) -> Element {
    let output = if kind.output_channels() == 1 {
        "grayscale output"
    } else {
        "keeps colour"
    };
    rsx! {
        div { style: "padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            strong { "{kind.label()}" }
            span { style: "color: #aaa; font-size: 12px; margin-left: 8px;", "{output}" }
            p { style: "color: #666; font-size: 14px; margin: 4px 0 0;", "{kind.description()}" }
        }
    }
}
