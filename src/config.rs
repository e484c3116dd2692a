use std::path::PathBuf;

use crate::data::transform::{AMPLITUDE_MAX, AMPLITUDE_MIN, AMPLITUDE_STEP};

/// Startup settings of the viewer window.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Image shown above the drop prompt when the file exists.
    pub banner_path: Option<PathBuf>,
    /// Slider bounds and increment for the amplitude control.
    pub amplitude_range: (f64, f64),
    pub amplitude_step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Scope Viewer – Oscilloscope Traces".to_string(),
            inner_size: [1000.0, 700.0],
            min_inner_size: [600.0, 450.0],
            banner_path: Some(PathBuf::from("banner.png")),
            amplitude_range: (AMPLITUDE_MIN, AMPLITUDE_MAX),
            amplitude_step: AMPLITUDE_STEP,
        }
    }
}

impl ViewerConfig {
    /// Banner path, only if it points at an existing file.
    pub fn banner(&self) -> Option<&PathBuf> {
        self.banner_path.as_ref().filter(|p| p.is_file())
    }
}
