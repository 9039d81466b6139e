// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Settings come from `Default`, optionally overridden by a hand-edited
// `config.json`. Bildwerk reads that file but never writes it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::types::FilterKind;

/// Name of the optional override file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Filter preselected in the dropdown when a photo is loaded.
    pub default_filter: FilterKind,
    /// Uploads larger than this many bytes are rejected before decoding.
    pub max_upload_bytes: u64,
    /// Longest edge, in pixels, of the on-screen previews. Downloads are
    /// always full resolution.
    pub preview_max_dimension: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_filter: FilterKind::Grayscale,
            max_upload_bytes: 20 * 1024 * 1024,
            preview_max_dimension: 1600,
        }
    }
}

impl AppConfig {
    /// Load `config.json` from `dir`, falling back to defaults when the file
    /// does not exist. A file that exists but cannot be parsed is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&data)?;
        info!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
