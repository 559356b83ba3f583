// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! bloc - climbing board hold and problem setter
//!
//! A cross-platform desktop application for outlining the holds on a
//! photograph of a climbing wall and setting problems from those holds.

mod app;
mod composer;
mod config;
mod editor;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::BlocApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::load();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("bloc - Climbing Board Setter"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "bloc",
        options,
        Box::new(|_cc| Ok(Box::new(BlocApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
