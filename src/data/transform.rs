use thiserror::Error;

use super::model::{Channel, ChannelViewState, Curve, ValidatedTrace, ViewStates};

/// Smallest amplitude the slider offers.
pub const AMPLITUDE_MIN: f64 = 0.1;
/// Largest amplitude the slider offers.
pub const AMPLITUDE_MAX: f64 = 2.0;
/// Slider increment.
pub const AMPLITUDE_STEP: f64 = 0.1;

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("invalid offset: '{0}'")]
    InvalidOffset(String),
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Compute the display coordinates of every channel.
///
/// Channels without an entry in `states` are drawn with the defaults.
pub fn render(trace: &ValidatedTrace, states: &ViewStates) -> Vec<Curve> {
    trace
        .channels
        .iter()
        .map(|ch| {
            let state = states.get(&ch.label).copied().unwrap_or_default();
            render_channel(&trace.time, ch, &state)
        })
        .collect()
}

/// Compute one channel's curve from the source arrays:
/// `x = time + x_offset`, `y = amplitude * samples + y_offset`.
pub fn render_channel(time: &[f64], channel: &Channel, state: &ChannelViewState) -> Curve {
    Curve {
        label: channel.label.clone(),
        x: time.iter().map(|t| t + state.x_offset).collect(),
        y: channel
            .samples
            .iter()
            .map(|v| state.amplitude * v + state.y_offset)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// Replace the amplitude. Callers keep `value` inside the slider domain.
pub fn set_amplitude(state: &mut ChannelViewState, value: f64) {
    state.amplitude = value;
}

/// Clamp `value` to the slider domain and round it to the nearest step.
pub fn snap_amplitude(value: f64) -> f64 {
    if !value.is_finite() {
        return ChannelViewState::default().amplitude;
    }
    let clamped = value.clamp(AMPLITUDE_MIN, AMPLITUDE_MAX);
    (clamped / AMPLITUDE_STEP).round() * AMPLITUDE_STEP
}

/// Accumulate a time shift. Non-finite deltas leave `state` untouched.
pub fn add_x_offset(state: &mut ChannelViewState, delta: f64) -> Result<(), TransformError> {
    state.x_offset += finite(delta)?;
    Ok(())
}

/// Accumulate a voltage shift. Non-finite deltas leave `state` untouched.
pub fn add_y_offset(state: &mut ChannelViewState, delta: f64) -> Result<(), TransformError> {
    state.y_offset += finite(delta)?;
    Ok(())
}

/// Parse the raw text of an offset input box.
pub fn parse_offset(text: &str) -> Result<f64, TransformError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| TransformError::InvalidOffset(text.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TransformError::InvalidOffset(text.to_string()))
    }
}

fn finite(delta: f64) -> Result<f64, TransformError> {
    if delta.is_finite() {
        Ok(delta)
    } else {
        Err(TransformError::InvalidOffset(delta.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::default_view_states;

    fn scenario_trace() -> ValidatedTrace {
        ValidatedTrace {
            time: vec![0.0, 1.0, 2.0],
            channels: vec![Channel {
                label: "1".into(),
                samples: vec![1.0, -1.0, 0.5],
            }],
        }
    }

    fn two_channel_trace() -> ValidatedTrace {
        ValidatedTrace {
            time: vec![0.0, 0.001, 0.002, 0.003],
            channels: vec![
                Channel { label: "1".into(), samples: vec![0.3, 0.7, -0.2, 1.1] },
                Channel { label: "2".into(), samples: vec![-3.0, 2.5, 0.0, 0.125] },
            ],
        }
    }

    #[test]
    fn renders_scaled_and_shifted_scenario() {
        let trace = scenario_trace();
        let mut states = default_view_states(&trace);
        let state = states.get_mut("1").unwrap();
        set_amplitude(state, 2.0);
        add_x_offset(state, 1.0).unwrap();
        add_y_offset(state, 0.5).unwrap();

        let curves = render(&trace, &states);
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].label, "1");
        assert_eq!(curves[0].x, vec![1.0, 2.0, 3.0]);
        assert_eq!(curves[0].y, vec![2.5, -1.5, 1.5]);
    }

    #[test]
    fn defaults_render_the_source_arrays() {
        let trace = two_channel_trace();
        let curves = render(&trace, &ViewStates::new());
        for (curve, ch) in curves.iter().zip(&trace.channels) {
            assert_eq!(curve.x, trace.time);
            assert_eq!(curve.y, ch.samples);
        }
    }

    #[test]
    fn render_is_idempotent() {
        let trace = two_channel_trace();
        let mut states = default_view_states(&trace);
        let state = states.get_mut("2").unwrap();
        set_amplitude(state, 1.3);
        add_y_offset(state, -0.25).unwrap();

        assert_eq!(render(&trace, &states), render(&trace, &states));
    }

    #[test]
    fn offset_round_trip_restores_render() {
        let trace = two_channel_trace();
        let mut states = default_view_states(&trace);
        add_x_offset(states.get_mut("1").unwrap(), 0.3).unwrap();
        let before_state = states["1"];
        let before = render(&trace, &states);

        let d = 0.0017;
        add_x_offset(states.get_mut("1").unwrap(), d).unwrap();
        add_x_offset(states.get_mut("1").unwrap(), -d).unwrap();

        assert!((states["1"].x_offset - before_state.x_offset).abs() < 1e-12);
        let after = render(&trace, &states);
        for (a, b) in after[0].x.iter().zip(&before[0].x) {
            assert!((a - b).abs() < 1e-12);
        }
        assert_eq!(after[1], before[1]);
    }

    #[test]
    fn amplitude_scaling_is_linear() {
        let trace = two_channel_trace();
        let ch = &trace.channels[1];
        let a = 0.7;
        let single = render_channel(&trace.time, ch, &ChannelViewState { amplitude: a, ..Default::default() });
        let double = render_channel(&trace.time, ch, &ChannelViewState { amplitude: 2.0 * a, ..Default::default() });

        for (y1, y2) in single.y.iter().zip(&double.y) {
            assert_eq!(*y2, 2.0 * y1);
        }
    }

    #[test]
    fn edits_only_touch_the_given_channel() {
        let trace = two_channel_trace();
        let mut states = default_view_states(&trace);
        add_y_offset(states.get_mut("1").unwrap(), 1.0).unwrap();

        let curves = render(&trace, &states);
        assert!((curves[0].y[0] - 1.3).abs() < 1e-12);
        assert_eq!(curves[1].y, trace.channels[1].samples);
    }

    #[test]
    fn non_finite_offsets_leave_state_unchanged() {
        let mut state = ChannelViewState::default();
        add_x_offset(&mut state, 2.0).unwrap();

        assert!(matches!(add_x_offset(&mut state, f64::NAN), Err(TransformError::InvalidOffset(_))));
        assert!(add_y_offset(&mut state, f64::INFINITY).is_err());
        assert_eq!(state.x_offset, 2.0);
        assert_eq!(state.y_offset, 0.0);
    }

    #[test]
    fn parse_offset_accepts_plain_numbers() {
        assert_eq!(parse_offset("1.5").unwrap(), 1.5);
        assert_eq!(parse_offset("  -2e-3 ").unwrap(), -2e-3);
        assert_eq!(parse_offset("0").unwrap(), 0.0);
    }

    #[test]
    fn parse_offset_rejects_garbage() {
        for text in ["", "abc", "1,5", "inf", "NaN", "--1"] {
            assert_eq!(
                parse_offset(text),
                Err(TransformError::InvalidOffset(text.to_string())),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn snap_amplitude_stays_on_the_slider_grid() {
        assert!((snap_amplitude(0.0) - 0.1).abs() < 1e-12);
        assert!((snap_amplitude(5.0) - 2.0).abs() < 1e-12);
        assert!((snap_amplitude(1.04) - 1.0).abs() < 1e-12);
        assert!((snap_amplitude(1.26) - 1.3).abs() < 1e-12);
        assert_eq!(snap_amplitude(f64::NAN), 1.0);
    }
}
