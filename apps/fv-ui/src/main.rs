#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod painter;

use app::FlowVizApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title("FlowViz"),
        ..Default::default()
    };

    eframe::run_native(
        "FlowViz",
        options,
        Box::new(|cc| Ok(Box::new(FlowVizApp::new(cc)))),
    )
}
