use std::ops::RangeInclusive;

use eframe::egui::{self, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::channel_color;
use crate::data::axis::{axis_exponent, format_tick};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trace plot (central panel)
// ---------------------------------------------------------------------------

/// Render the trace plot in the central panel.
pub fn trace_plot(ui: &mut Ui, state: &mut AppState) {
    if state.session.is_none() {
        empty_view(ui, state);
        return;
    }
    let Some(session) = state.session.as_mut() else {
        return;
    };

    // Axis exponents follow what was visible last frame.
    let (x_exp, y_exp) = match session.last_bounds {
        Some((min, max)) => (axis_exponent(min[0], max[0]), axis_exponent(min[1], max[1])),
        None => (0, 0),
    };

    let count = session.curves.len();
    let active = session.active;
    let curves = &session.curves;

    let response = Plot::new("trace_plot")
        .legend(Legend::default())
        .x_axis_label(format!("Seconds [e{x_exp} s]"))
        .y_axis_label(format!("Volts [e{y_exp} V]"))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            format_tick(mark.value, x_exp)
        })
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            format_tick(mark.value, y_exp)
        })
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, curve) in curves.iter().enumerate() {
                let points: PlotPoints = curve.points().collect();
                let width = if idx == active { 2.0 } else { 1.5 };

                let line = Line::new(points)
                    .name(format!("Channel {}", curve.label))
                    .color(channel_color(idx, count))
                    .width(width);

                plot_ui.line(line);
            }
            plot_ui.plot_bounds()
        });

    let bounds = response.inner;
    session.last_bounds = Some((bounds.min(), bounds.max()));
}

/// Placeholder shown before any file is loaded.
fn empty_view(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        if let Some(banner) = state.config.banner() {
            ui.add(
                egui::Image::new(format!("file://{}", banner.display()))
                    .max_width(ui.available_width() * 0.8)
                    .max_height(160.0),
            );
            ui.add_space(8.0);
        }
        ui.add_space(ui.available_height() * 0.3);
        ui.heading("Drag and drop a CSV file here or use File → Open…");
    });
}
