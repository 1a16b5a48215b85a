// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! RichCopy - Main Entry Point
//!
//! A four-panel rich text scratchpad that copies email-ready HTML and plain
//! text to the clipboard. Built with Rust and egui.

mod app;
mod config;
mod content;
mod editor;
mod error;
mod export;
mod formatting;
mod ui;

use app::RichCopyApp;
use config::{load_config, Settings};
use log::info;

/// Application name constant.
const APP_NAME: &str = "RichCopy";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    // Load settings to get window configuration
    let settings = load_config();
    let window_size = settings.window_size;

    info!(
        "Window configuration: {}x{}, panels: {}",
        window_size.width, window_size.height, settings.panel_count
    );

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([Settings::MIN_WINDOW_SIZE, 300.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(RichCopyApp::new(cc, settings)))),
    )
}
