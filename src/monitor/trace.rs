//! Synthetic ECG signal generation.
//!
//! Produces one vertical displacement per horizontal column: a single sine cycle
//! across the surface width with a sharp downward and upward spike overlaid at the
//! start of the cycle to mimic a heartbeat complex.

use std::f64::consts::TAU;

/// Logical surface width shared by both size presets.
pub const SURFACE_WIDTH: usize = 400;

/// Logical surface height in normal mode.
pub const NORMAL_HEIGHT: usize = 96;

/// Logical surface height in compact mode.
pub const COMPACT_HEIGHT: usize = 32;

const NORMAL_AMPLITUDE: f64 = 30.0;
const COMPACT_AMPLITUDE: f64 = 15.0;

/// Cycles per full surface width.
const FREQUENCY: f64 = 1.0;
const PHASE: f64 = 0.0;

/// End of the downward deflection window, in radians into the cycle.
const DIP_WINDOW: f64 = 0.2;
/// End of the dominant upward spike window.
const SPIKE_WINDOW: f64 = 0.3;

/// Size preset for a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceShape {
    pub compact: bool,
}

impl TraceShape {
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    /// Peak displacement of the base sinusoid.
    pub fn amplitude(self) -> f64 {
        if self.compact {
            COMPACT_AMPLITUDE
        } else {
            NORMAL_AMPLITUDE
        }
    }

    /// Logical surface height for this preset.
    pub fn height(self) -> usize {
        if self.compact {
            COMPACT_HEIGHT
        } else {
            NORMAL_HEIGHT
        }
    }
}

/// Computes the displacement for one column.
///
/// The spike overrides are mutually exclusive and checked in order: the dip
/// window first, the upward spike only when the dip window does not apply.
pub fn sample_at(x: usize, width: usize, amplitude: f64) -> f64 {
    let t = (x as f64 / width as f64) * TAU * FREQUENCY + PHASE;
    let cycle = t % TAU;

    if cycle < DIP_WINDOW {
        -amplitude * 2.0
    } else if cycle < SPIKE_WINDOW {
        amplitude * 3.0
    } else {
        t.sin() * amplitude
    }
}

/// Generates a full trace of exactly `width` samples.
pub fn generate_trace(width: usize, shape: TraceShape) -> Vec<f64> {
    let amplitude = shape.amplitude();
    (0..width).map(|x| sample_at(x, width, amplitude)).collect()
}
