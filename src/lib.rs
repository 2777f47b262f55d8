pub mod canvas;
pub mod config;
pub mod render;
pub mod stroke;

// Re-export the pipeline surface for embedders
pub use crate::canvas::Pixmap;
pub use crate::render::{draw_smoothed_path, Color, DrawingSurface, PenStyle};
pub use crate::stroke::{Sample, StrokeController, StrokeEvent};
