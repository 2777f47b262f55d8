// filepath: src/render.rs
//! Smoothed variable-width curve rendering
//!
//! The curve renderer walks the point sequence produced by the stroke
//! pipeline and emits quadratic curve segments onto a [`DrawingSurface`].
//! Control points are placed adaptively: gentle turns get a rounded curve,
//! sharp corners a nearly straight one so they are not visually cut off.
//! Segment width follows instantaneous pointer speed, clamped so that
//! neither hairlines nor blobs can appear.

use crate::stroke::Sample;

/// RGBA color, 8 bits per channel.
pub type Color = [u8; 4];

/// Default smoothing weight for control-point placement.
const SMOOTHING_FACTOR: f64 = 0.2;

/// Smoothing weight past the sharp-corner threshold.
const SHARP_SMOOTHING_FACTOR: f64 = 0.05;

/// Turn angle above which a corner counts as sharp (60 degrees).
const SHARP_ANGLE_THRESHOLD: f64 = std::f64::consts::PI / 3.0;

/// Speed-to-width gain; speed is in surface units per millisecond.
const SPEED_FACTOR: f64 = 2.0;
const SPEED_SCALE: f64 = 0.0005;

/// Width clamp bounds as factors of the base width.
const MIN_WIDTH_FACTOR: f64 = 0.3;
const MAX_WIDTH_FACTOR: f64 = 2.5;

/// An explicit drawing-surface interface in the shape of a 2D path context.
///
/// The renderer and the stroke controller only ever talk to this trait;
/// the production implementation is [`crate::canvas::Pixmap`], tests use
/// recording stubs.
pub trait DrawingSurface {
    /// Discard the active path and its cursor.
    fn begin_path(&mut self);
    /// Start a new subpath at the given position.
    fn move_to(&mut self, x: f64, y: f64);
    /// Quadratic curve from the cursor through `(cx, cy)` to `(x, y)`.
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    /// Straight segment from the cursor to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);
    /// Stroke the active path with the given width and color. The path and
    /// cursor are left in place.
    fn stroke(&mut self, width: f64, color: Color);
    /// Wipe the whole surface to `color`.
    fn clear(&mut self, color: Color);
}

/// The pen settings read by the renderer at draw time.
///
/// Mutable at any time from the single event timeline (config reloads write
/// it, the renderer reads it); changes apply from the next rendered segment.
#[derive(Debug, Clone)]
pub struct PenStyle {
    color: Color,
    base_width: f64,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            base_width: 10.0,
        }
    }
}

impl PenStyle {
    pub fn new(color: Color, base_width: f64) -> Self {
        let mut style = Self {
            color,
            ..Self::default()
        };
        style.set_base_width(base_width);
        style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn base_width(&self) -> f64 {
        self.base_width
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Update the nominal stroke width. Non-positive or non-finite values
    /// are rejected and the previous width is kept.
    pub fn set_base_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.base_width = width;
        } else {
            log::warn!("Ignoring invalid pen width {width}; keeping {}", self.base_width);
        }
    }
}

/// Draw `points` as one continuous smoothed path.
///
/// Sequences shorter than 2 points are a no-op. The surface's path cursor
/// is left at the last point of the sequence.
pub fn draw_smoothed_path(surface: &mut dyn DrawingSurface, points: &[Sample], pen: &PenStyle) {
    if points.len() < 2 {
        return;
    }

    let color = pen.color();
    let base_width = pen.base_width();

    surface.begin_path();
    surface.move_to(points[0].x, points[0].y);

    let mut width = segment_width(&points[1], &points[0], base_width);
    for i in 1..points.len() - 1 {
        let p0 = &points[i - 1];
        let p1 = &points[i];
        let p2 = &points[i + 1];

        let factor = if turn_angle(p0, p1, p2) > SHARP_ANGLE_THRESHOLD {
            SHARP_SMOOTHING_FACTOR
        } else {
            SMOOTHING_FACTOR
        };

        let control_x = p1.x + (p0.x - p2.x) * factor;
        let control_y = p1.y + (p0.y - p2.y) * factor;
        let mid_x = (p1.x + p2.x) / 2.0;
        let mid_y = (p1.y + p2.y) / 2.0;

        width = segment_width(p1, p0, base_width);
        surface.quad_to(control_x, control_y, mid_x, mid_y);
        surface.stroke(width, color);
        surface.begin_path();
        surface.move_to(mid_x, mid_y);
    }

    // Close the path exactly at the real (or predicted) endpoint.
    let last = points[points.len() - 1];
    surface.line_to(last.x, last.y);
    surface.stroke(width, color);
}

/// Turn angle at `p1`, in radians.
///
/// A zero-length neighbor vector (stationary pointer) makes the angle
/// undefined; that case degrades to 0 so it gets no sharp-corner penalty.
fn turn_angle(p0: &Sample, p1: &Sample, p2: &Sample) -> f64 {
    let v01 = (p1.x - p0.x, p1.y - p0.y);
    let v12 = (p2.x - p1.x, p2.y - p1.y);
    let mag01 = (v01.0 * v01.0 + v01.1 * v01.1).sqrt();
    let mag12 = (v12.0 * v12.0 + v12.1 * v12.1).sqrt();
    if mag01 == 0.0 || mag12 == 0.0 {
        return 0.0;
    }
    let dot = v01.0 * v12.0 + v01.1 * v12.1;
    // floating-point error can push the cosine just past +/-1
    (dot / (mag01 * mag12)).clamp(-1.0, 1.0).acos()
}

/// Width of the segment ending at `p1`, from the instantaneous speed since
/// `prev`. Zero or negative elapsed time counts as zero speed.
fn segment_width(p1: &Sample, prev: &Sample, base_width: f64) -> f64 {
    let delta_time = p1.t - prev.t;
    let speed = if delta_time > 0.0 {
        p1.distance_to(prev) / delta_time
    } else {
        0.0
    };
    let width = base_width * (1.0 + speed * SPEED_FACTOR * SPEED_SCALE);
    width.clamp(base_width * MIN_WIDTH_FACTOR, base_width * MAX_WIDTH_FACTOR)
}
