use std::path::Path;

use crate::config::ViewerConfig;
use crate::data::loader::{self, LoadError};
use crate::data::model::{default_view_states, ChannelViewState, Curve, ValidatedTrace, ViewStates};
use crate::data::transform::{
    self, add_x_offset, add_y_offset, parse_offset, render, render_channel, TransformError,
};

// ---------------------------------------------------------------------------
// Trace session: one loaded file and its view state
// ---------------------------------------------------------------------------

/// Everything the plot view needs for one loaded file.
pub struct TraceSession {
    /// File name shown in the window title.
    pub file_name: String,
    pub trace: ValidatedTrace,
    /// Per-channel amplitude and offsets, keyed by channel label.
    pub views: ViewStates,
    /// Index into `trace.channels` that edits apply to.
    pub active: usize,
    /// Rendered curves, one per channel, in channel order.
    pub curves: Vec<Curve>,

    /// Raw contents of the offset text boxes.
    pub x_offset_text: String,
    pub y_offset_text: String,
    /// Last rejected offset input, shown under the text boxes.
    pub offset_error: Option<String>,

    /// Visible plot bounds of the previous frame (`[x, y]` min and max).
    pub last_bounds: Option<([f64; 2], [f64; 2])>,
}

impl TraceSession {
    pub fn new(file_name: impl Into<String>, trace: ValidatedTrace) -> Self {
        let views = default_view_states(&trace);
        let curves = render(&trace, &views);
        Self {
            file_name: file_name.into(),
            trace,
            views,
            active: 0,
            curves,
            x_offset_text: String::new(),
            y_offset_text: String::new(),
            offset_error: None,
            last_bounds: None,
        }
    }

    /// Label of the active channel.
    pub fn active_label(&self) -> &str {
        &self.trace.channels[self.active].label
    }

    /// View state of the active channel.
    pub fn active_view(&self) -> ChannelViewState {
        self.views.get(self.active_label()).copied().unwrap_or_default()
    }

    /// Make channel `index` the target of subsequent edits.
    pub fn select_channel(&mut self, index: usize) {
        if index < self.trace.channels.len() {
            log::debug!("Active channel: {}", self.trace.channels[index].label);
            self.active = index;
            self.offset_error = None;
        }
    }

    /// Set the active channel's amplitude, snapped to the slider grid.
    pub fn set_active_amplitude(&mut self, value: f64) {
        let value = transform::snap_amplitude(value);
        transform::set_amplitude(self.active_view_mut(), value);
        log::debug!("Channel {} amplitude = {value:.1}", self.active_label());
        self.rerender_active();
    }

    /// Apply the X offset text box to the active channel.
    pub fn apply_x_offset(&mut self) -> Result<(), TransformError> {
        let text = self.x_offset_text.clone();
        self.apply_offset(&text, add_x_offset)
    }

    /// Apply the Y offset text box to the active channel.
    pub fn apply_y_offset(&mut self) -> Result<(), TransformError> {
        let text = self.y_offset_text.clone();
        self.apply_offset(&text, add_y_offset)
    }

    /// Restore the active channel's defaults.
    pub fn reset_active(&mut self) {
        *self.active_view_mut() = ChannelViewState::default();
        self.offset_error = None;
        self.rerender_active();
    }

    fn apply_offset(
        &mut self,
        text: &str,
        add: fn(&mut ChannelViewState, f64) -> Result<(), TransformError>,
    ) -> Result<(), TransformError> {
        let result = parse_offset(text).and_then(|delta| add(self.active_view_mut(), delta));
        match &result {
            Ok(()) => {
                self.offset_error = None;
                self.rerender_active();
            }
            Err(e) => {
                log::warn!("Rejected offset for channel {}: {e}", self.active_label());
                self.offset_error = Some(e.to_string());
            }
        }
        result
    }

    fn active_view_mut(&mut self) -> &mut ChannelViewState {
        let label = self.trace.channels[self.active].label.clone();
        self.views.entry(label).or_default()
    }

    /// Recompute only the active channel's curve from the source arrays.
    fn rerender_active(&mut self) {
        let state = self.active_view();
        let channel = &self.trace.channels[self.active];
        self.curves[self.active] = render_channel(&self.trace.time, channel, &state);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded trace (None until user loads a file).
    pub session: Option<TraceSession>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            session: None,
            status_message: None,
        }
    }

    /// Load `path` and, on success, replace the current session.
    /// On failure the previous session stays open and the error is shown.
    pub fn open_path(&mut self, path: &Path) -> Result<(), LoadError> {
        match loader::load(path) {
            Ok(trace) => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                log::info!(
                    "Loaded {file_name}: {} channels, {} samples",
                    trace.channel_count(),
                    trace.len()
                );
                self.session = Some(TraceSession::new(file_name, trace));
                self.status_message = None;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(describe_load_error(&e));
                Err(e)
            }
        }
    }

    /// Close the current trace, back to the empty view.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Closed {}", session.file_name);
        }
    }

    pub fn window_title(&self) -> String {
        match &self.session {
            Some(session) => format!("Plot of {}", session.file_name),
            None => self.config.title.clone(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

/// Human-readable message for the status line.
pub fn describe_load_error(e: &LoadError) -> String {
    if e.is_validation() {
        format!("Validation error: {e}")
    } else {
        format!("Error reading CSV file: {e}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::Channel;

    fn session() -> TraceSession {
        TraceSession::new(
            "scope.csv",
            ValidatedTrace {
                time: vec![0.0, 1.0, 2.0],
                channels: vec![
                    Channel { label: "1".into(), samples: vec![1.0, -1.0, 0.5] },
                    Channel { label: "2".into(), samples: vec![0.0, 2.0, 4.0] },
                ],
            },
        )
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn new_session_renders_every_channel_with_defaults() {
        let s = session();
        assert_eq!(s.active, 0);
        assert_eq!(s.curves.len(), 2);
        assert_eq!(s.curves, render(&s.trace, &s.views));
        assert_eq!(s.active_view(), ChannelViewState::default());
    }

    #[test]
    fn edits_apply_to_the_active_channel_only() {
        let mut s = session();
        s.select_channel(1);
        s.set_active_amplitude(2.0);
        s.y_offset_text = "0.5".into();
        s.apply_y_offset().unwrap();

        assert_eq!(s.curves[0].y, vec![1.0, -1.0, 0.5]);
        assert_eq!(s.curves[1].y, vec![0.5, 4.5, 8.5]);
        assert_eq!(s.views["1"], ChannelViewState::default());
    }

    #[test]
    fn scenario_through_the_session() {
        let mut s = session();
        s.set_active_amplitude(2.0);
        s.x_offset_text = "1.0".into();
        s.apply_x_offset().unwrap();
        s.y_offset_text = "0.5".into();
        s.apply_y_offset().unwrap();

        assert_eq!(s.curves[0].x, vec![1.0, 2.0, 3.0]);
        assert_eq!(s.curves[0].y, vec![2.5, -1.5, 1.5]);
    }

    #[test]
    fn cached_curves_match_a_full_render_after_many_edits() {
        let mut s = session();
        s.x_offset_text = "0.1".into();
        for _ in 0..10 {
            s.apply_x_offset().unwrap();
        }
        s.set_active_amplitude(1.5);
        s.set_active_amplitude(0.5);

        assert_eq!(s.curves, render(&s.trace, &s.views));
        assert!((s.active_view().x_offset - 1.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_offset_text_is_reported_and_ignored() {
        let mut s = session();
        let before = s.curves.clone();
        s.x_offset_text = "ten".into();

        assert_eq!(
            s.apply_x_offset(),
            Err(TransformError::InvalidOffset("ten".into()))
        );
        assert!(s.offset_error.is_some());
        assert_eq!(s.curves, before);
        assert_eq!(s.active_view().x_offset, 0.0);
    }

    #[test]
    fn amplitude_is_snapped_to_the_slider_domain() {
        let mut s = session();
        s.set_active_amplitude(7.0);
        assert!((s.active_view().amplitude - 2.0).abs() < 1e-12);
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut s = session();
        s.select_channel(5);
        assert_eq!(s.active, 0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut s = session();
        s.set_active_amplitude(0.3);
        s.reset_active();
        assert_eq!(s.active_view(), ChannelViewState::default());
        assert_eq!(s.curves[0].y, s.trace.channels[0].samples);
    }

    #[test]
    fn failed_load_keeps_the_previous_session() {
        let good = write_csv("x-axis,1\nsecond,Volt\n0,1.0\n");
        let bad = write_csv("x-axis,2\nsecond,Volt\n0,1.0\n");

        let mut app = AppState::default();
        app.open_path(good.path()).unwrap();
        assert!(app.session.is_some());
        assert!(app.status_message.is_none());
        assert!(app.window_title().starts_with("Plot of "));

        assert!(app.open_path(bad.path()).is_err());
        assert!(app.session.is_some());
        let msg = app.status_message.clone().unwrap();
        assert!(msg.starts_with("Validation error:"), "{msg}");

        app.close();
        assert!(app.session.is_none());
    }

    #[test]
    fn access_errors_use_the_read_prefix() {
        let mut app = AppState::default();
        assert!(app.open_path(Path::new("trace.txt")).is_err());
        let msg = app.status_message.unwrap();
        assert!(msg.starts_with("Error reading CSV file:"), "{msg}");
    }
}
