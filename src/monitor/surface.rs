//! Drawing surfaces for waveform traces.
//!
//! [`PathContext`] is a small canvas-style path API. [`TraceCanvas`] implements it in
//! memory, recording stroked polylines in logical coordinates, and [`TraceView`]
//! rasterizes a canvas into the terminal with braille dots.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::canvas::{Canvas, Line as CanvasLine},
};

/// Path drawing operations.
pub trait PathContext {
    /// Erases everything drawn so far.
    fn clear(&mut self);
    /// Starts a new, empty path.
    fn begin_path(&mut self);
    /// Sets the color and thickness used by the next `stroke`.
    fn set_stroke(&mut self, color: Color, line_width: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Paints the current path.
    fn stroke(&mut self);
}

/// A rectangular region that may or may not be ready for drawing.
pub trait DrawingSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Returns the drawing context, or `None` when the surface cannot be drawn on.
    fn context(&mut self) -> Option<&mut dyn PathContext>;
}

/// One painted polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub line_width: f64,
    pub points: Vec<(f64, f64)>,
}

/// In-memory surface holding the strokes of the most recent frame.
///
/// Coordinates are logical: x grows rightward from 0 to `width`, y grows downward
/// from 0 to `height`.
#[derive(Debug, Clone)]
pub struct TraceCanvas {
    width: usize,
    height: usize,
    color: Color,
    line_width: f64,
    path: Vec<(f64, f64)>,
    strokes: Vec<Stroke>,
}

impl TraceCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: Color::Reset,
            line_width: 1.0,
            path: Vec::new(),
            strokes: Vec::new(),
        }
    }

    /// Changes the logical size and erases the current contents.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.path.clear();
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }
}

impl DrawingSurface for TraceCanvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn context(&mut self) -> Option<&mut dyn PathContext> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(self)
    }
}

impl PathContext for TraceCanvas {
    fn clear(&mut self) {
        self.strokes.clear();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn set_stroke(&mut self, color: Color, line_width: f64) {
        self.color = color;
        self.line_width = line_width;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.clear();
        self.path.push((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push((x, y));
    }

    fn stroke(&mut self) {
        if self.path.len() < 2 {
            return;
        }
        self.strokes.push(Stroke {
            color: self.color,
            line_width: self.line_width,
            points: self.path.clone(),
        });
    }
}

/// Widget that rasterizes a [`TraceCanvas`] into a terminal area.
pub struct TraceView<'a> {
    canvas: &'a TraceCanvas,
    background: Color,
}

impl<'a> TraceView<'a> {
    pub fn new(canvas: &'a TraceCanvas) -> Self {
        Self {
            canvas,
            background: Color::Reset,
        }
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl Widget for TraceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.canvas.width as f64;
        let height = self.canvas.height as f64;

        // Terminal canvas y grows upward, logical y grows downward.
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.background)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for stroke in self.canvas.strokes() {
                    for pair in stroke.points.windows(2) {
                        // Segments leaving the bounds would be dropped whole.
                        let Some(((x1, y1), (x2, y2))) =
                            clip_segment(pair[0], pair[1], width, height)
                        else {
                            continue;
                        };
                        ctx.draw(&CanvasLine {
                            x1,
                            y1: height - y1,
                            x2,
                            y2: height - y2,
                            color: stroke.color,
                        });
                    }
                }
            })
            .render(area, buf);
    }
}

type Point = (f64, f64);

/// Clips the segment `a`-`b` to `[0, width] x [0, height]` (Liang-Barsky).
///
/// Returns `None` when no part of the segment lies inside.
fn clip_segment(a: Point, b: Point, width: f64, height: f64) -> Option<(Point, Point)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut enter = 0.0_f64;
    let mut exit = 1.0_f64;

    for (p, q) in [(-dx, a.0), (dx, width - a.0), (-dy, a.1), (dy, height - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > exit {
                return None;
            }
            enter = enter.max(r);
        } else {
            if r < enter {
                return None;
            }
            exit = exit.min(r);
        }
    }

    let at = |t: f64| {
        (
            (a.0 + t * dx).clamp(0.0, width),
            (a.1 + t * dy).clamp(0.0, height),
        )
    };
    Some((at(enter), at(exit)))
}
