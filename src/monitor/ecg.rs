//! Animated ECG waveform renderer.
//!
//! An [`EcgMonitor`] owns at most one animation loop. Starting the loop generates
//! the trace for the current props, draws the first frame and schedules the next
//! one on the [`FrameClock`]. Each fired frame redraws the trace shifted one column
//! further and schedules the following frame. Changing props restarts the loop and
//! unmounting stops it; both drop the outstanding frame request.

use super::clock::{FrameClock, FrameId, FrameRequest};
use super::severity::Severity;
use super::surface::{DrawingSurface, PathContext};
use super::trace::{generate_trace, TraceShape};

/// Stroke thickness of the trace, in logical units.
const LINE_WIDTH: f64 = 2.0;

/// Inputs that decide how the trace looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorProps {
    pub severity: Severity,
    pub compact: bool,
}

impl MonitorProps {
    pub fn new(severity: Severity, compact: bool) -> Self {
        Self { severity, compact }
    }
}

/// State of one running loop.
#[derive(Debug)]
struct Animation {
    trace: Vec<f64>,
    offset: usize,
    frames: u64,
    next_frame: FrameRequest,
}

/// A restartable ECG animation bound to one drawing surface.
#[derive(Debug)]
pub struct EcgMonitor {
    props: MonitorProps,
    clock: FrameClock,
    animation: Option<Animation>,
}

impl EcgMonitor {
    /// Creates an unmounted monitor. Nothing is drawn until [`EcgMonitor::mount`].
    pub fn new(props: MonitorProps, clock: FrameClock) -> Self {
        Self {
            props,
            clock,
            animation: None,
        }
    }

    pub fn props(&self) -> MonitorProps {
        self.props
    }

    /// Whether a loop is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    /// Scroll position of the running loop.
    #[cfg(test)]
    pub fn offset(&self) -> Option<usize> {
        self.animation.as_ref().map(|a| a.offset)
    }

    /// Frames drawn since the running loop started.
    pub fn frames_drawn(&self) -> Option<u64> {
        self.animation.as_ref().map(|a| a.frames)
    }

    /// Samples of the running loop's trace.
    #[cfg(test)]
    pub fn trace(&self) -> Option<&[f64]> {
        self.animation.as_ref().map(|a| a.trace.as_slice())
    }

    /// Starts the loop on `surface`.
    ///
    /// Silently does nothing when the surface has no drawing context.
    pub fn mount(&mut self, surface: &mut dyn DrawingSurface) {
        self.start(surface);
    }

    /// Applies new props, restarting the loop if they differ from the current ones.
    pub fn set_props(&mut self, props: MonitorProps, surface: &mut dyn DrawingSurface) {
        if props == self.props {
            return;
        }
        tracing::debug!(
            "ECG props changed: {}/{} -> {}/{}",
            self.props.severity,
            compact_label(self.props.compact),
            props.severity,
            compact_label(props.compact)
        );
        self.props = props;
        self.start(surface);
    }

    /// Stops the loop and releases its scheduled frame.
    pub fn unmount(&mut self) {
        if self.animation.take().is_some() {
            tracing::trace!("ECG loop stopped");
        }
    }

    /// Handles a clock tick. Draws and reschedules only if this loop's frame fired.
    pub fn on_frame(&mut self, due: &[FrameId], surface: &mut dyn DrawingSurface) {
        let fired = self
            .animation
            .as_ref()
            .is_some_and(|a| a.next_frame.is_due(due));
        if !fired {
            return;
        }

        if !self.render(surface) {
            tracing::debug!("Drawing context lost, stopping ECG loop");
            self.unmount();
        }
    }

    fn start(&mut self, surface: &mut dyn DrawingSurface) {
        // Release the previous loop before anything else so two never coexist.
        self.unmount();

        let width = surface.width();
        if surface.context().is_none() {
            tracing::debug!("Drawing surface unavailable, ECG loop not started");
            return;
        }

        let trace = generate_trace(width, TraceShape::new(self.props.compact));
        self.animation = Some(Animation {
            trace,
            offset: 0,
            frames: 0,
            next_frame: self.clock.request_frame(),
        });
        tracing::trace!(
            "ECG loop started: width={}, severity={}, {}",
            width,
            self.props.severity,
            compact_label(self.props.compact)
        );

        self.render(surface);
    }

    /// Draws one frame and schedules the next. Returns false if nothing could be drawn.
    fn render(&mut self, surface: &mut dyn DrawingSurface) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let width = surface.width();
        let height = surface.height();
        let Some(ctx) = surface.context() else {
            return false;
        };

        draw_frame(
            ctx,
            &animation.trace,
            animation.offset,
            width,
            height,
            self.props.severity,
        );

        animation.offset = (animation.offset + 1) % animation.trace.len().max(1);
        animation.frames += 1;
        animation.next_frame = self.clock.request_frame();
        true
    }
}

/// Paints the trace shifted right by `offset` columns.
///
/// Points are joined in trace order, so the line jumps back across the surface where
/// the shifted columns wrap past the right edge.
fn draw_frame(
    ctx: &mut dyn PathContext,
    trace: &[f64],
    offset: usize,
    width: usize,
    height: usize,
    severity: Severity,
) {
    ctx.clear();
    ctx.begin_path();
    ctx.set_stroke(severity.color(), LINE_WIDTH);

    let baseline = height as f64 / 2.0;
    for (i, &sample) in trace.iter().enumerate() {
        let draw_x = ((i + offset) % width) as f64;
        let draw_y = baseline + sample;
        if i == 0 {
            ctx.move_to(draw_x, draw_y);
        } else {
            ctx.line_to(draw_x, draw_y);
        }
    }

    ctx.stroke();
}

fn compact_label(compact: bool) -> &'static str {
    if compact {
        "compact"
    } else {
        "normal"
    }
}
