// filepath: src/canvas.rs
//! Software raster canvas for inkpad
//!
//! `Pixmap` is the persistent backing store for the drawn ink. Unlike the
//! transient wl_shm buffers (which are created per present and blitted
//! from here), the pixmap lives for the whole session so that finished
//! strokes stay visible without being retained as geometry.
//!
//! Pixels are stored in wl_shm `Argb8888` byte order: little-endian BGRA
//! with premultiplied alpha. Colors enter as plain RGBA.

use crate::render::{Color, DrawingSurface};

/// Maximum number of flattening steps for one quadratic curve segment.
const MAX_FLATTEN_STEPS: usize = 32;

/// A 2D position on the canvas, in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

/// Owning ARGB8888 pixel buffer implementing [`DrawingSurface`].
#[derive(Debug)]
pub struct Pixmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
    path: Vec<Point>,
    background: Color,
}

impl Pixmap {
    /// Allocate a pixmap of fixed dimensions, filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut pixmap = Self {
            data: vec![0; (width * height * 4) as usize],
            width,
            height,
            path: Vec::new(),
            background,
        };
        pixmap.fill(background);
        pixmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel bytes in wl_shm Argb8888 order, for the shm blit.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    fn fill(&mut self, color: Color) {
        let wire = to_wire(color);
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&wire);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, wire: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize * 4;
        self.data[idx..idx + 4].copy_from_slice(&wire);
    }

    /// Stamp a filled disc. Off-surface parts are clipped.
    fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, wire: [u8; 4]) {
        let r = radius.max(0.5);
        let x_min = (cx - r).floor() as i32;
        let x_max = (cx + r).ceil() as i32;
        let y_min = (cy - r).floor() as i32;
        let y_max = (cy + r).ceil() as i32;
        let r_sq = r * r;

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(x, y, wire);
                }
            }
        }
    }

    /// Draw a thick segment with round caps by stamping discs along it.
    fn stroke_segment(&mut self, from: Point, to: Point, radius: f64, wire: [u8; 4]) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        // Sub-radius spacing keeps the pass solid with no scalloping.
        let step = (radius * 0.5).max(0.25);
        let steps = (length / step).ceil() as usize;

        self.fill_disc(from.x, from.y, radius, wire);
        for i in 1..=steps {
            let t = i as f64 / steps.max(1) as f64;
            self.fill_disc(from.x + dx * t, from.y + dy * t, radius, wire);
        }
    }

    fn cursor(&self) -> Option<Point> {
        self.path.last().copied()
    }
}

impl DrawingSurface for Pixmap {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.clear();
        self.path.push(Point { x, y });
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let Some(start) = self.cursor() else {
            // No subpath yet; treat the curve start as a move.
            self.path.push(Point { x, y });
            return;
        };
        // Flatten by arc-length estimate: one step per ~2 surface units.
        let estimate = ((cx - start.x).hypot(cy - start.y) + (x - cx).hypot(y - cy)).max(1.0);
        let steps = ((estimate / 2.0).ceil() as usize).clamp(4, MAX_FLATTEN_STEPS);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let px = u * u * start.x + 2.0 * u * t * cx + t * t * x;
            let py = u * u * start.y + 2.0 * u * t * cy + t * t * y;
            self.path.push(Point { x: px, y: py });
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(Point { x, y });
    }

    fn stroke(&mut self, width: f64, color: Color) {
        if self.path.len() < 2 {
            return;
        }
        let wire = to_wire(color);
        let radius = (width / 2.0).max(0.5);
        let segments: Vec<(Point, Point)> = self
            .path
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        for (from, to) in segments {
            self.stroke_segment(from, to, radius, wire);
        }
    }

    fn clear(&mut self, color: Color) {
        self.fill(color);
    }
}

/// Convert RGBA to the wl_shm Argb8888 wire order (little-endian BGRA),
/// premultiplying by alpha as the protocol expects.
fn to_wire(color: Color) -> [u8; 4] {
    let [r, g, b, a] = color;
    let mul = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    [mul(b), mul(g), mul(r), a]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = [255, 255, 255, 255];
    const BLACK: Color = [0, 0, 0, 255];

    fn ink_count(pixmap: &Pixmap) -> usize {
        let bg = to_wire(pixmap.background());
        pixmap
            .bytes()
            .chunks_exact(4)
            .filter(|px| *px != bg)
            .count()
    }

    #[test]
    fn new_pixmap_is_filled_with_background() {
        let pixmap = Pixmap::new(4, 3, WHITE);
        assert_eq!(pixmap.bytes().len(), 4 * 3 * 4);
        assert_eq!(ink_count(&pixmap), 0);
    }

    #[test]
    fn rgba_converts_to_premultiplied_bgra() {
        assert_eq!(to_wire([255, 0, 0, 255]), [0, 0, 255, 255]);
        assert_eq!(to_wire([0, 255, 0, 255]), [0, 255, 0, 255]);
        // half-transparent red premultiplies the color channels
        assert_eq!(to_wire([255, 0, 0, 128]), [0, 0, 128, 128]);
        assert_eq!(to_wire([0, 0, 0, 0]), [0, 0, 0, 0]);
    }

    #[test]
    fn stroke_marks_pixels_along_the_segment() {
        let mut pixmap = Pixmap::new(64, 64, WHITE);
        pixmap.move_to(8.0, 32.0);
        pixmap.line_to(56.0, 32.0);
        pixmap.stroke(4.0, BLACK);

        assert!(ink_count(&pixmap) > 0);
        let wire_black = to_wire(BLACK);
        for x in [10u32, 32, 54] {
            let idx = (32 * 64 + x) as usize * 4;
            assert_eq!(&pixmap.bytes()[idx..idx + 4], &wire_black);
        }
        // well away from the line stays background
        let idx = (8 * 64 + 32) as usize * 4;
        assert_eq!(&pixmap.bytes()[idx..idx + 4], &to_wire(WHITE));
    }

    #[test]
    fn stroke_without_a_path_is_a_no_op() {
        let mut pixmap = Pixmap::new(16, 16, WHITE);
        pixmap.stroke(4.0, BLACK);
        pixmap.move_to(8.0, 8.0);
        pixmap.stroke(4.0, BLACK);
        assert_eq!(ink_count(&pixmap), 0);
    }

    #[test]
    fn off_surface_geometry_is_clipped_without_panicking() {
        let mut pixmap = Pixmap::new(32, 32, WHITE);
        pixmap.move_to(-100.0, -100.0);
        pixmap.line_to(200.0, 200.0);
        pixmap.stroke(10.0, BLACK);
        // the visible diagonal got ink, the rest was clipped
        assert!(ink_count(&pixmap) > 0);
    }

    #[test]
    fn clear_wipes_all_ink() {
        let mut pixmap = Pixmap::new(32, 32, WHITE);
        pixmap.move_to(4.0, 4.0);
        pixmap.line_to(28.0, 28.0);
        pixmap.stroke(6.0, BLACK);
        assert!(ink_count(&pixmap) > 0);

        pixmap.clear(WHITE);
        assert_eq!(ink_count(&pixmap), 0);
    }

    #[test]
    fn quad_to_lands_on_its_endpoint() {
        let mut pixmap = Pixmap::new(64, 64, WHITE);
        pixmap.move_to(10.0, 50.0);
        pixmap.quad_to(32.0, 0.0, 54.0, 50.0);
        let end = pixmap.cursor().unwrap();
        assert!((end.x - 54.0).abs() < 1e-9);
        assert!((end.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn begin_path_resets_the_cursor() {
        let mut pixmap = Pixmap::new(16, 16, WHITE);
        pixmap.move_to(8.0, 8.0);
        assert!(pixmap.cursor().is_some());
        pixmap.begin_path();
        assert!(pixmap.cursor().is_none());
    }

    #[test]
    fn overdraw_is_idempotent() {
        let mut pixmap = Pixmap::new(48, 48, WHITE);
        for _ in 0..3 {
            pixmap.move_to(4.0, 24.0);
            pixmap.line_to(44.0, 24.0);
            pixmap.stroke(5.0, BLACK);
        }
        let first = pixmap.bytes().to_vec();
        pixmap.move_to(4.0, 24.0);
        pixmap.line_to(44.0, 24.0);
        pixmap.stroke(5.0, BLACK);
        assert_eq!(pixmap.bytes(), &first[..]);
    }
}
