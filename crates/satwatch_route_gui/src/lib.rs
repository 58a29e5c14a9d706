// src/lib.rs
mod app;
mod canvas;

use std::sync::Arc;

use anyhow::Result;

use satwatch_route_core::backend::HttpTransport;
use satwatch_route_core::config::Config;

pub fn run(config: Config) -> Result<()> {
    let transport = Arc::new(HttpTransport::new(config.request_timeout())?);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Satwatch Route Analyzer")
            .with_inner_size([1200.0, 760.0]),
        ..Default::default()
    };

    // `eframe::Error` is not `Send + Sync`, so it cannot go through `?` into anyhow.
    if let Err(err) = eframe::run_native(
        "Satwatch Route Analyzer",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::RouteAnalyzerApp::new(cc, config, transport)))),
    ) {
        anyhow::bail!("Failed to start the GUI: {err}");
    }

    Ok(())
}
