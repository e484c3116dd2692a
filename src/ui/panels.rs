use std::path::PathBuf;

use eframe::egui::{self, Color32, Key, RichText, Ui};

use crate::state::{AppState, TraceSession};

// ---------------------------------------------------------------------------
// Left side panel – channel controls
// ---------------------------------------------------------------------------

/// Render the left control panel. Only shown while a trace is loaded.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let (lo, hi) = state.config.amplitude_range;
    let step = state.config.amplitude_step;

    let Some(session) = state.session.as_mut() else {
        return;
    };

    ui.heading("Channel");
    ui.separator();

    channel_selector(ui, session);
    ui.add_space(8.0);

    // ---- Amplitude ----
    ui.strong("Amplitude");
    let mut amplitude = session.active_view().amplitude;
    let slider = egui::Slider::new(&mut amplitude, lo..=hi)
        .step_by(step)
        .fixed_decimals(1);
    if ui.add(slider).changed() {
        session.set_active_amplitude(amplitude);
    }
    ui.add_space(8.0);

    // ---- Offsets ----
    ui.strong("Offsets");
    let view = session.active_view();
    ui.label(format!("X: {:+.6} s   Y: {:+.6} V", view.x_offset, view.y_offset));

    if offset_row(ui, &mut session.x_offset_text, "X offset (s)", "Apply X") {
        let _ = session.apply_x_offset();
    }
    if offset_row(ui, &mut session.y_offset_text, "Y offset (V)", "Apply Y") {
        let _ = session.apply_y_offset();
    }

    if let Some(err) = &session.offset_error {
        ui.label(RichText::new(err).color(Color32::RED));
    }

    ui.add_space(8.0);
    if ui.button("Reset channel").clicked() {
        session.reset_active();
    }
}

fn channel_selector(ui: &mut Ui, session: &mut TraceSession) {
    let labels: Vec<String> = session
        .trace
        .channels
        .iter()
        .map(|c| format!("Channel {}", c.label))
        .collect();

    let mut selected = session.active;
    egui::ComboBox::from_id_salt("active_channel")
        .selected_text(&labels[selected])
        .show_ui(ui, |ui: &mut Ui| {
            for (i, label) in labels.iter().enumerate() {
                ui.selectable_value(&mut selected, i, label);
            }
        });
    if selected != session.active {
        session.select_channel(selected);
    }
}

/// Text box plus apply button. Returns true when the user submits.
fn offset_row(ui: &mut Ui, text: &mut String, hint: &str, button: &str) -> bool {
    ui.horizontal(|ui: &mut Ui| {
        let edit = ui.add(
            egui::TextEdit::singleline(text)
                .hint_text(hint)
                .desired_width(120.0),
        );
        let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        ui.button(button).clicked() || entered
    })
    .inner
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.session.is_some(), egui::Button::new("Close"))
                .clicked()
            {
                state.close();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}: {} channels, {} samples",
                session.file_name,
                session.trace.channel_count(),
                session.trace.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog / drag-and-drop
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV file")
        .add_filter("CSV files", &["csv"])
        .pick_file();

    if let Some(path) = file {
        // Errors are already logged and put in the status line.
        let _ = state.open_path(&path);
    }
}

/// Open every file dropped on the window this frame.
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped: Vec<PathBuf> = ctx.input(|i| {
        i.raw
            .dropped_files
            .iter()
            .filter_map(|f| f.path.clone())
            .collect()
    });

    for path in dropped {
        let _ = state.open_path(&path);
    }
}

/// Dim the window while files are dragged over it.
pub fn drop_hint(ctx: &egui::Context) {
    if ctx.input(|i| i.raw.hovered_files.is_empty()) {
        return;
    }

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("drop_hint"),
    ));
    let rect = ctx.screen_rect();
    painter.rect_filled(rect, 0.0, Color32::from_black_alpha(180));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Drop the CSV file to open it",
        egui::FontId::proportional(22.0),
        Color32::WHITE,
    );
}
