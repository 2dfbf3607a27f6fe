//! Relief Connect Frontend Entry Point

mod api;
mod app;
mod browser;
mod components;
mod config;
mod context;
mod error;
mod export;
mod format;
mod guard;
mod models;
mod store;
mod validation;
mod view_model;

use app::App;
use config::ClientConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_warning) = ClientConfig::load();
    if let Err(e) = rolling_logger::init(config.log_level_filter(), config.log_capacity) {
        web_sys::console::warn_1(&format!("[APP] {}", e).into());
    }
    if let Some(warning) = config_warning {
        log::warn!("[APP] {}", warning);
    }

    mount_to_body(move || view! { <App config=config /> });
}
