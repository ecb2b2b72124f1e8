use glam::Vec2;
use std::f32::consts::TAU;

/// Resting angle of strand `index` around the anchor, in radians.
///
/// Strands are spread evenly: `2π·index / strand_count`. A zero
/// `strand_count` yields `0.0` instead of dividing by zero.
#[inline]
pub fn strand_angle(index: usize, strand_count: usize) -> f32 {
    if strand_count == 0 {
        return 0.0;
    }
    TAU / (strand_count as f32) * (index as f32)
}

/// Point at `distance` from `center` in the direction of `angle`.
#[inline]
pub fn polar(center: Vec2, distance: f32, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle) * distance
}

/// Unit direction and length of `to - from`.
///
/// Returns `None` when the two points coincide (or the difference is not
/// finite), so callers can skip the pair instead of dividing by zero.
#[inline]
pub fn direction_and_distance(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let diff = to - from;
    let dist = diff.length();
    if dist > 0.0 && dist.is_finite() {
        Some((diff / dist, dist))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strand_angles_are_evenly_spaced() {
        assert_eq!(strand_angle(0, 4), 0.0);
        assert!((strand_angle(1, 4) - TAU / 4.0).abs() < 1e-6);
        assert!((strand_angle(3, 4) - 3.0 * TAU / 4.0).abs() < 1e-6);
    }

    #[test]
    fn zero_strand_count_does_not_divide_by_zero() {
        assert_eq!(strand_angle(3, 0), 0.0);
    }

    #[test]
    fn polar_places_point_on_circle() {
        let p = polar(Vec2::new(500.0, 500.0), 50.0, 0.0);
        assert!((p - Vec2::new(550.0, 500.0)).length() < 1e-4);

        let q = polar(Vec2::ZERO, 2.0, TAU / 4.0);
        assert!((q - Vec2::new(0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn coincident_points_have_no_direction() {
        let p = Vec2::new(3.0, 4.0);
        assert!(direction_and_distance(p, p).is_none());

        let (dir, dist) = direction_and_distance(Vec2::ZERO, p).unwrap();
        assert!((dist - 5.0).abs() < 1e-6);
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }
}
