#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod util;

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{tao::window::WindowBuilder, Config as DesktopConfig};

use crate::{
    config::AppConfig,
    util::{logging::init_logger, version::window_title},
};

fn main() {
    let (config, config_error) = match AppConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    init_logger(config.log_format);
    if let Some(err) = config_error {
        tracing::warn!("using default configuration: {err}");
    }
    tracing::info!(api = %config.api_base_url, "starting {}", window_title());
    config::install(config);

    // WebKit's DMABUF renderer opts into explicit sync; disable it unless the user overrides.
    if std::env::var("WAYLAND_DISPLAY").is_ok()
        && std::env::var("WEBKIT_DISABLE_DMABUF_RENDERER").is_err()
    {
        std::env::set_var("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
    }

    let builder = LaunchBuilder::new();

    #[cfg(feature = "desktop")]
    let builder = {
        let config = desktop! {
            DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(window_title())
            )
        };
        builder.with_cfg(config)
    };

    #[cfg(not(feature = "desktop"))]
    let builder = builder;

    builder.launch(app::App);
}
