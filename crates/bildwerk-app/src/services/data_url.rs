// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `data:` URLs for inline previews and the download link.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Build a `data:<mime>;base64,<payload>` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
