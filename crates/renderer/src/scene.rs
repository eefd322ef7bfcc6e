//! Fixed visual parameters and the animation math that drives them.
//!
//! Everything here is pure data and pure functions; the GPU layer reads
//! these values into its uniform blocks each frame.

use std::f32::consts::TAU;
use std::time::Duration;

/// One full animation cycle; elapsed time wraps modulo this.
pub const CYCLE: Duration = Duration::from_millis(10_000);

/// Background gradient colors, innermost to outermost.
pub const BACKGROUND_INNER: [f32; 4] = [1.0, 0.95, 0.6, 1.0];
pub const BACKGROUND_CENTER: [f32; 4] = [0.7, 0.5, 0.2, 1.0];
pub const BACKGROUND_OUTER: [f32; 4] = [0.4, 0.65, 1.0, 1.0];

/// Rings are drawn in plain white.
pub const RING_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Number of ring instances drawn per frame.
pub const RING_INSTANCES: usize = 5;

/// Maps elapsed render time onto the looping animation angle in [0, 2π).
pub fn cycle_angle(elapsed_seconds: f32) -> f32 {
    let cycle = CYCLE.as_secs_f32();
    TAU * (elapsed_seconds.rem_euclid(cycle) / cycle)
}

/// Per-instance clip-space offsets for the five rings.
///
/// Hand-tuned trajectories, kept exactly as authored rather than folded
/// into a common parametric form.
pub fn ring_offsets(angle: f32) -> [[f32; 2]; RING_INSTANCES] {
    let (s, c) = angle.sin_cos();
    [
        [0.5 * s, 0.5 * c],
        [s, c],
        [c, 0.7 * s],
        [c, 0.5 * s - c],
        [s + 0.5 * c, c],
    ]
}

/// Aspect-correction factors for the circle program.
///
/// X is left untouched and y is scaled by width/height, which equalizes the
/// physical extents of a ring so it stays circular on non-square surfaces.
pub fn aspect_ratio(width: u32, height: u32) -> [f32; 2] {
    [1.0, width as f32 / height.max(1) as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn cycle_starts_at_zero_and_reaches_pi_halfway() {
        assert_eq!(cycle_angle(0.0), 0.0);
        assert!((cycle_angle(5.0) - PI).abs() < EPSILON);
    }

    #[test]
    fn cycle_wraps_every_ten_seconds() {
        assert!(cycle_angle(10.0).abs() < EPSILON);
        assert!((cycle_angle(12.5) - FRAC_PI_2).abs() < EPSILON);
        assert!((cycle_angle(25.0) - cycle_angle(5.0)).abs() < EPSILON);
    }

    #[test]
    fn offsets_at_cycle_start_match_closed_forms() {
        let offsets = ring_offsets(cycle_angle(0.0));
        // sin = 0, cos = 1.
        assert_eq!(offsets[0], [0.0, 0.5]);
        assert_eq!(offsets[1], [0.0, 1.0]);
        assert_eq!(offsets[2], [1.0, 0.0]);
        assert_eq!(offsets[3], [1.0, -1.0]);
        assert_eq!(offsets[4], [0.5, 1.0]);
    }

    #[test]
    fn offsets_at_half_cycle_match_closed_forms() {
        let offsets = ring_offsets(cycle_angle(5.0));
        // sin ≈ 0, cos ≈ -1.
        assert!(offsets[1][0].abs() < EPSILON);
        assert!((offsets[1][1] + 1.0).abs() < EPSILON);
        assert!((offsets[0][1] + 0.5).abs() < EPSILON);
        assert!((offsets[3][0] + 1.0).abs() < EPSILON);
        assert!((offsets[3][1] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn aspect_ratio_scales_y_by_width_over_height() {
        assert_eq!(aspect_ratio(200, 100), [1.0, 2.0]);
        assert_eq!(aspect_ratio(100, 100), [1.0, 1.0]);
        assert_eq!(aspect_ratio(720, 1280), [1.0, 0.5625]);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let [x, y] = aspect_ratio(100, 0);
        assert_eq!(x, 1.0);
        assert!(y.is_finite());
    }
}
