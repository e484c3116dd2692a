use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellRef – position of a cell in the source file
// ---------------------------------------------------------------------------

/// Zero-based position of a cell in the CSV grid (header rows included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        CellRef { row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Channel / ValidatedTrace – the parsed file
// ---------------------------------------------------------------------------

/// One voltage column of the file (one oscilloscope probe).
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Header label of the column ("1", "2", …).
    pub label: String,
    /// Voltage samples – same length as the trace's time axis.
    pub samples: Vec<f64>,
}

/// A trace whose header passed validation and whose body parsed as numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTrace {
    /// Time axis in seconds (column 0).
    pub time: Vec<f64>,
    /// Voltage channels in left-to-right column order.
    pub channels: Vec<Channel>,
}

impl ValidatedTrace {
    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the trace has no sample rows.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

// ---------------------------------------------------------------------------
// Per-channel view state
// ---------------------------------------------------------------------------

/// User-adjustable display parameters of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelViewState {
    /// Multiplicative scale on voltage.
    pub amplitude: f64,
    /// Additive shift on time.
    pub x_offset: f64,
    /// Additive shift on voltage.
    pub y_offset: f64,
}

impl Default for ChannelViewState {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

/// View state of every channel of one trace, keyed by channel label.
pub type ViewStates = BTreeMap<String, ChannelViewState>;

/// Fresh default view state for every channel of `trace`.
pub fn default_view_states(trace: &ValidatedTrace) -> ViewStates {
    trace
        .channels
        .iter()
        .map(|ch| (ch.label.clone(), ChannelViewState::default()))
        .collect()
}

// ---------------------------------------------------------------------------
// Curve – renderable coordinates of one channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Curve {
    /// Iterate the curve as `[x, y]` points.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| [x, y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_states_cover_every_channel() {
        let trace = ValidatedTrace {
            time: vec![0.0, 1.0],
            channels: vec![
                Channel { label: "1".into(), samples: vec![0.0, 0.0] },
                Channel { label: "2".into(), samples: vec![1.0, 1.0] },
            ],
        };
        let states = default_view_states(&trace);
        assert_eq!(states.len(), 2);
        assert_eq!(states["2"], ChannelViewState::default());
        assert_eq!(states["1"].amplitude, 1.0);
    }

    #[test]
    fn cell_ref_display() {
        assert_eq!(CellRef::new(1, 3).to_string(), "row 1, column 3");
    }
}
