// filepath: src/pointer.rs
//! Pointer (mouse) event handling for inkpad

use crate::app::AppData;
use crate::stroke::{Sample, StrokeEvent};
use log::debug;
use smithay_client_toolkit::seat::pointer::{PointerEvent, PointerEventKind};

/// Linux evdev button codes delivered by wl_pointer.
const BTN_LEFT: u32 = 0x110;
const BTN_RIGHT: u32 = 0x111;

pub fn handle_pointer_events(events: &[PointerEvent], app: &mut AppData) {
    debug!("handle_pointer_events: {} events", events.len());
    for event in events {
        let (x, y) = event.position;
        match event.kind {
            PointerEventKind::Enter { .. } => {
                debug!("Pointer entered pad at ({:.2}, {:.2})", x, y);
            }
            PointerEventKind::Leave { .. } => {
                debug!("Pointer left pad");
                app.handle_stroke_event(StrokeEvent::Leave);
            }
            PointerEventKind::Motion { time } => {
                if app.is_drawing() {
                    app.handle_stroke_event(StrokeEvent::Move(Sample::new(x, y, f64::from(time))));
                }
            }
            PointerEventKind::Press { button, time, .. } => match button {
                BTN_LEFT => {
                    debug!("Stroke begins at ({:.2}, {:.2})", x, y);
                    app.handle_stroke_event(StrokeEvent::Down(Sample::new(x, y, f64::from(time))));
                }
                BTN_RIGHT => {
                    app.clear_surface();
                }
                _ => {}
            },
            PointerEventKind::Release { button, .. } => {
                if button == BTN_LEFT {
                    app.handle_stroke_event(StrokeEvent::Up);
                }
            }
            _ => {}
        }
    }
}
