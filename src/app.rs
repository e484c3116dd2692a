use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ScopeViewerApp {
    pub state: AppState,
    /// Title last sent to the viewport.
    title: String,
}

impl ScopeViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        let title = config.title.clone();
        Self {
            state: AppState::new(config),
            title,
        }
    }
}

impl eframe::App for ScopeViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_dropped_files(ctx, &mut self.state);

        let title = self.state.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: channel controls ----
        if self.state.session.is_some() {
            egui::SidePanel::left("channel_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::trace_plot(ui, &mut self.state);
        });

        panels::drop_hint(ctx);
    }
}
