// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the Dioxus UI to the bildwerk backend crates.
//
// Services return data the UI can display directly (data URLs, captions)
// so that components stay free of image handling.

pub mod app_services;
pub mod data_dir;
pub mod data_url;
