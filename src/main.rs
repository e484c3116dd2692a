mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::ScopeViewerApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the banner png.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ScopeViewerApp::new(config)))
        }),
    )
}
