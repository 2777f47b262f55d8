// filepath: src/stroke/controller.rs
//! Stroke lifecycle state machine
//!
//! Owns the point buffer for the stroke in progress and routes input events
//! through the pipeline: interpolated fill-in on every move, one predicted
//! look-ahead point for the redraw, and a clean reset at stroke end.

use log::debug;

use super::{interpolate, predict_next, Sample};
use crate::render::{draw_smoothed_path, DrawingSurface, PenStyle};

/// Input events as seen by the stroke controller, already normalized to
/// surface-local samples. Pointer and touch input both map onto these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeEvent {
    Down(Sample),
    Move(Sample),
    Up,
    Leave,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrokeState {
    Idle,
    Drawing,
}

/// Tracks exactly one stroke at a time. Pointer and touch share the single
/// buffer; overlapping gestures are not disambiguated.
#[derive(Debug)]
pub struct StrokeController {
    state: StrokeState,
    points: Vec<Sample>,
    last_real: Option<Sample>,
}

impl Default for StrokeController {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeController {
    pub fn new() -> Self {
        Self {
            state: StrokeState::Idle,
            points: Vec::new(),
            last_real: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.state == StrokeState::Drawing
    }

    /// The buffered samples of the in-progress stroke (real + interpolated).
    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    /// Feed one input event through the pipeline, drawing onto `surface`
    /// with the current pen settings.
    pub fn handle_event(
        &mut self,
        event: &StrokeEvent,
        surface: &mut dyn DrawingSurface,
        pen: &PenStyle,
    ) {
        match *event {
            StrokeEvent::Down(sample) => self.begin_stroke(sample),
            StrokeEvent::Move(sample) => self.extend_stroke(sample, surface, pen),
            StrokeEvent::Up | StrokeEvent::Leave | StrokeEvent::Cancel => self.end_stroke(surface),
        }
    }

    /// Abort the in-progress stroke, if any, without drawing. Used when the
    /// surface is cleared out from under the stroke.
    pub fn abort(&mut self, surface: &mut dyn DrawingSurface) {
        if self.state == StrokeState::Drawing {
            debug!("Aborting in-progress stroke ({} points)", self.points.len());
        }
        self.end_stroke(surface);
    }

    fn begin_stroke(&mut self, sample: Sample) {
        // A down while already drawing restarts the stroke.
        self.state = StrokeState::Drawing;
        self.points.clear();
        self.points.push(sample);
        self.last_real = Some(sample);
        debug!("Stroke started at ({:.2}, {:.2})", sample.x, sample.y);
    }

    fn extend_stroke(&mut self, sample: Sample, surface: &mut dyn DrawingSurface, pen: &PenStyle) {
        if self.state != StrokeState::Drawing {
            return;
        }
        // Interpolation always runs between real samples; the synthesized
        // fill-in goes into the buffer ahead of the new sample to keep
        // chronological order.
        if let Some(prev) = self.last_real {
            self.points.extend(interpolate(prev, sample));
        }
        self.points.push(sample);
        self.last_real = Some(sample);

        // The predicted point only ever extends the sequence handed to the
        // renderer for this redraw; it is recomputed from real samples on
        // the next move.
        let mut sequence = self.points.clone();
        if let Some(predicted) = predict_next(&self.points) {
            sequence.push(predicted);
        }
        draw_smoothed_path(surface, &sequence, pen);
    }

    fn end_stroke(&mut self, surface: &mut dyn DrawingSurface) {
        if self.state == StrokeState::Drawing {
            debug!("Stroke ended with {} buffered points", self.points.len());
        }
        self.state = StrokeState::Idle;
        self.points.clear();
        self.last_real = None;
        // Reset the active path cursor so the next stroke does not join
        // onto this one.
        surface.begin_path();
    }
}
