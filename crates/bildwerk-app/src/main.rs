// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildwerk — photo filter studio
//
// Entry point. Initialises logging, configuration, studio state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::guide::Guide;
use pages::studio::Studio;

use services::app_services::AppServices;

fn main() {
    init_tracing();

    tracing::info!("Bildwerk starting");

    dioxus::launch(app);
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // No system clock in the browser.
    #[cfg(target_arch = "wasm32")]
    builder.without_time().init();
    #[cfg(not(target_arch = "wasm32"))]
    builder.init();
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    Studio {},
    #[route("/guide")]
    Guide {},
}

/// Root component.
fn app() -> Element {
    // Load configuration once; a broken config.json falls back to defaults.
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => {
            tracing::info!("app services initialised");
            s
        }
        Err(e) => {
            tracing::error!(error = %e, "config could not be loaded — using defaults");
            AppServices::fallback()
        }
    });

    // Provide services and state as context for all pages
    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::StudioState::new(svc.config().default_filter)));

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent bottom tab layout wrapping all pages.
#[component]
fn TabLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            // Page content
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px; max-width: 960px; width: 100%; margin: 0 auto; box-sizing: border-box;",
                Outlet::<Route> {}
            }

            // Bottom tab bar
            nav { class: "tab-bar",
                style: "display: flex; justify-content: space-around; padding: 8px 0; border-top: 1px solid #e0e0e0; background: #fafafa;",
                TabButton { to: Route::Studio {}, label: "Studio", icon: "\u{1F5BC}" }
                TabButton { to: Route::Guide {}, label: "Filters", icon: "\u{2139}" }
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; flex-direction: column; align-items: center; text-decoration: none; color: #333; font-size: 12px;",
            span { style: "font-size: 20px;", "{icon}" }
            span { "{label}" }
        }
    }
}
