#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod code;
mod config;
mod driver;
mod error;
mod history;
mod hotkey;
mod injector;

use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::injector::RdevInjector;

fn main() -> eframe::Result<()> {
    setup_tracing();

    let injector = match RdevInjector::new() {
        Ok(injector) => injector,
        Err(error) => {
            tracing::error!(%error, "cannot simulate keyboard input, exiting");
            std::process::exit(1);
        }
    };
    let config = config::load_config();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 380.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Code Guesser",
        native_options,
        Box::new(move |cc| Box::new(app::GuesserApp::new(cc, config, injector))),
    )
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
