// filepath: src/stroke/predict.rs
//! Short-horizon motion prediction
//!
//! Rendering always trails physical pointer motion by at least one
//! input-to-present cycle. To hide that lag the renderer is handed one
//! synthetic look-ahead sample extrapolated from the recent motion of the
//! stroke. The prediction is recomputed from real samples on every move
//! event and never written back into the point buffer.

use super::Sample;

/// Number of trailing points considered when extrapolating.
const WINDOW: usize = 5;

/// How far past the mean displacement the prediction reaches.
const LOOKAHEAD_GAIN: f64 = 1.2;

/// Nominal frame interval used when the last two samples share a timestamp.
const FALLBACK_FRAME_MS: f64 = 1000.0 / 60.0;

/// Extrapolate one sample ahead of `points`.
///
/// Returns `None` when fewer than 3 points are buffered; motion direction
/// is not stable enough before that to be worth rendering ahead of.
pub fn predict_next(points: &[Sample]) -> Option<Sample> {
    if points.len() < 3 {
        return None;
    }

    let window = &points[points.len().saturating_sub(WINDOW)..];
    let len = window.len() as f64;

    let mut avg_x = 0.0;
    let mut avg_y = 0.0;
    let mut avg_dx = 0.0;
    let mut avg_dy = 0.0;
    for (i, p) in window.iter().enumerate() {
        avg_x += p.x;
        avg_y += p.y;
        if i > 0 {
            avg_dx += p.x - window[i - 1].x;
            avg_dy += p.y - window[i - 1].y;
        }
    }
    avg_x /= len;
    avg_y /= len;
    // window.len() >= 3 here, but keep the guard against a single-step window
    let steps = (window.len() - 1).max(1) as f64;
    avg_dx /= steps;
    avg_dy /= steps;

    let last = window[window.len() - 1];
    let prev = window[window.len() - 2];
    let delta_time = if last.t != prev.t {
        last.t - prev.t
    } else {
        FALLBACK_FRAME_MS
    };

    Some(Sample::new(
        avg_x + avg_dx * LOOKAHEAD_GAIN,
        avg_y + avg_dy * LOOKAHEAD_GAIN,
        last.t + delta_time,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(count: usize, spacing: f64, dt: f64) -> Vec<Sample> {
        (0..count)
            .map(|i| Sample::new(i as f64 * spacing, 0.0, i as f64 * dt))
            .collect()
    }

    #[test]
    fn too_few_points_yield_no_prediction() {
        assert!(predict_next(&[]).is_none());
        assert!(predict_next(&line(1, 5.0, 10.0)).is_none());
        assert!(predict_next(&line(2, 5.0, 10.0)).is_none());
        assert!(predict_next(&line(3, 5.0, 10.0)).is_some());
    }

    #[test]
    fn straight_line_prediction_matches_window_math() {
        // x = 0, 5, .., 45; window covers x = 25..45, mean 35, mean step 5
        let points = line(10, 5.0, 10.0);
        let p = predict_next(&points).unwrap();
        assert_relative_eq!(p.x, 35.0 + 5.0 * LOOKAHEAD_GAIN);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.t, 90.0 + 10.0);
    }

    #[test]
    fn short_window_uses_all_points() {
        // 3 points at x = 0, 5, 10: mean 5, two steps of 5
        let points = line(3, 5.0, 10.0);
        let p = predict_next(&points).unwrap();
        assert_relative_eq!(p.x, 5.0 + 5.0 * LOOKAHEAD_GAIN);
        assert_relative_eq!(p.t, 20.0 + 10.0);
    }

    #[test]
    fn zero_time_gap_falls_back_to_frame_interval() {
        let mut points = line(4, 5.0, 10.0);
        let last = points[3];
        points.push(Sample::new(last.x + 5.0, 0.0, last.t));
        points.push(Sample::new(last.x + 10.0, 0.0, last.t));
        let p = predict_next(&points).unwrap();
        assert_relative_eq!(p.t, last.t + FALLBACK_FRAME_MS);
    }

    #[test]
    fn stationary_input_predicts_in_place() {
        let points = vec![Sample::new(4.0, 9.0, 0.0); 5];
        let p = predict_next(&points).unwrap();
        assert_relative_eq!(p.x, 4.0);
        assert_relative_eq!(p.y, 9.0);
        // identical timestamps, so the fallback interval advances time
        assert_relative_eq!(p.t, FALLBACK_FRAME_MS);
    }

    #[test]
    fn prediction_follows_vertical_motion() {
        let points: Vec<_> = (0..6)
            .map(|i| Sample::new(0.0, i as f64 * 4.0, i as f64 * 8.0))
            .collect();
        let p = predict_next(&points).unwrap();
        assert_relative_eq!(p.x, 0.0);
        // window y = 4..20, mean 12, mean step 4
        assert_relative_eq!(p.y, 12.0 + 4.0 * LOOKAHEAD_GAIN);
    }
}
