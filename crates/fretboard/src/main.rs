#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(clippy::new_without_default)] // not a library

pub mod app;
mod config;
mod context;
pub use context::Context;
mod export;
mod resources;
mod screen;
mod state;
pub use state::EphemeralState;
mod widget;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::path::PathBuf;

    use app::FretboardApp;
    use config::Config;

    tracing_subscriber::fmt::init();

    // an optional config path is the only argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    eframe::run_native(
        "Fretboard Diagram Creator",
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 480.0]),
            ..Default::default()
        },
        Box::new(|cc| Ok(Box::new(FretboardApp::new(cc, config)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run app: {err}"))
}
