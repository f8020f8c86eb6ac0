//! CORD-19 Data Explorer
//!
//! Interactive dashboard over CORD-19 research-paper metadata: year-range
//! filtering, distribution charts, a title word cloud, and CSV export.

mod charts;
mod data;
mod export;
mod gui;

use eframe::egui;
use gui::ExplorerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("CORD-19 Data Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "CORD-19 Data Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc)))),
    )
}
