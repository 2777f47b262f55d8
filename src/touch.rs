// filepath: src/touch.rs
//! Touch event handling for inkpad
//!
//! Touch contacts drive the same stroke controller as the pointer; the
//! two modalities share the single point buffer and are not otherwise
//! disambiguated, so a second finger simply restarts the stroke.

use crate::app::AppData;
use crate::stroke::{Sample, StrokeEvent};
use log::debug;

pub fn handle_touch_down(app: &mut AppData, time: u32, position: (f64, f64)) {
    debug!(
        "Touch down at ({:.2}, {:.2})",
        position.0, position.1
    );
    app.handle_stroke_event(StrokeEvent::Down(Sample::new(
        position.0,
        position.1,
        f64::from(time),
    )));
}

pub fn handle_touch_motion(app: &mut AppData, time: u32, position: (f64, f64)) {
    if app.is_drawing() {
        app.handle_stroke_event(StrokeEvent::Move(Sample::new(
            position.0,
            position.1,
            f64::from(time),
        )));
    }
}

pub fn handle_touch_up(app: &mut AppData) {
    debug!("Touch up");
    app.handle_stroke_event(StrokeEvent::Up);
}

pub fn handle_touch_cancel(app: &mut AppData) {
    debug!("Touch cancelled");
    app.handle_stroke_event(StrokeEvent::Cancel);
}
