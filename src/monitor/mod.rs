//! Real-time ECG waveform rendering.
//!
//! Provides the synthetic signal generator, the frame clock that drives animation
//! loops, drawing surfaces and the [`EcgMonitor`] component tying them together.

pub mod clock;
pub mod ecg;
pub mod severity;
pub mod surface;
pub mod trace;

pub use clock::FrameClock;
pub use ecg::{EcgMonitor, MonitorProps};
pub use severity::Severity;
pub use surface::{TraceCanvas, TraceView};
pub use trace::{generate_trace, TraceShape, SURFACE_WIDTH};
