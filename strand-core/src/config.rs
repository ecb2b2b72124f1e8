use glam::Vec2;
use thiserror::Error;

/// Segments in every strand unless overridden.
pub const DEFAULT_SEGMENTS_PER_STRAND: usize = 10;
/// Velocity multiplier applied once per frame.
pub const DEFAULT_DAMPING: f32 = 0.95;
/// Spring pull toward the previous segment, per unit of stretch.
pub const DEFAULT_STIFFNESS: f32 = 0.1;
/// Fraction denominator of the anchor's approach toward the pointer.
pub const DEFAULT_DRAG_SPEED: f32 = 3.0;

/// Global simulation parameters.
///
/// Read (never mutated) by the simulation step. Changing `strand_count`
/// or `rest_length` requires a rebuild of the strand bundle, which
/// [`crate::sim::Simulation`] does on reconfiguration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub strand_count: usize,
    pub segments_per_strand: usize,
    pub rest_length: f32,
    pub gravity: f32,
    pub damping: f32,
    pub stiffness: f32,
    pub anchor_position: Vec2,
    pub anchor_radius: f32,
    pub drag_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            strand_count: 1,
            segments_per_strand: DEFAULT_SEGMENTS_PER_STRAND,
            rest_length: 20.0,
            gravity: 5000.0,
            damping: DEFAULT_DAMPING,
            stiffness: DEFAULT_STIFFNESS,
            anchor_position: Vec2::new(500.0, 500.0),
            anchor_radius: 50.0,
            drag_speed: DEFAULT_DRAG_SPEED,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("strand count must be at least 1")]
    NoStrands,
    #[error("segments per strand must be at least 1")]
    NoSegments,
    #[error("rest length must be positive and finite, got {0}")]
    RestLength(f32),
    #[error("anchor radius must be positive and finite, got {0}")]
    AnchorRadius(f32),
    #[error("damping must lie in (0, 1], got {0}")]
    Damping(f32),
    #[error("stiffness must be non-negative and finite, got {0}")]
    Stiffness(f32),
    #[error("gravity must be finite, got {0}")]
    Gravity(f32),
    #[error("drag speed must be at least 1, got {0}")]
    DragSpeed(f32),
    #[error("anchor position must be finite, got {0}")]
    AnchorPosition(Vec2),
    #[error("{strands} strands of {segments} segments do not fit in memory")]
    TooManySegments { strands: usize, segments: usize },
}

impl SimConfig {
    /// Checks every parameter the step and layout code relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strand_count == 0 {
            return Err(ConfigError::NoStrands);
        }
        if self.segments_per_strand == 0 {
            return Err(ConfigError::NoSegments);
        }
        if self.total_segments().is_none() {
            return Err(ConfigError::TooManySegments {
                strands: self.strand_count,
                segments: self.segments_per_strand,
            });
        }
        if !(self.rest_length > 0.0 && self.rest_length.is_finite()) {
            return Err(ConfigError::RestLength(self.rest_length));
        }
        if !(self.anchor_radius > 0.0 && self.anchor_radius.is_finite()) {
            return Err(ConfigError::AnchorRadius(self.anchor_radius));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(self.stiffness >= 0.0 && self.stiffness.is_finite()) {
            return Err(ConfigError::Stiffness(self.stiffness));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if !(self.drag_speed >= 1.0 && self.drag_speed.is_finite()) {
            return Err(ConfigError::DragSpeed(self.drag_speed));
        }
        if !self.anchor_position.is_finite() {
            return Err(ConfigError::AnchorPosition(self.anchor_position));
        }
        Ok(())
    }

    /// Total number of simulated points across all strands.
    ///
    /// ### Returns
    /// - `Some(n)` when `n` points fit in a single position buffer.
    /// - `None` when the product overflows or the buffer would exceed
    ///   `isize::MAX` bytes.
    pub fn total_segments(&self) -> Option<usize> {
        let max_points = isize::MAX as usize / size_of::<Vec2>();
        self.strand_count
            .checked_mul(self.segments_per_strand)
            .filter(|&n| n <= max_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.total_segments(), Some(10));
    }

    #[test]
    fn rejects_empty_bundles() {
        let mut cfg = SimConfig::default();
        cfg.strand_count = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::NoStrands));

        let mut cfg = SimConfig::default();
        cfg.segments_per_strand = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::NoSegments));
    }

    #[test]
    fn rejects_segment_counts_that_overflow() {
        let mut cfg = SimConfig::default();
        cfg.strand_count = 1000;
        cfg.segments_per_strand = usize::MAX / 100;
        assert_eq!(cfg.total_segments(), None);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::TooManySegments {
                strands: 1000,
                segments: usize::MAX / 100,
            })
        );

        // Fits in `usize` but not in one allocation.
        cfg.strand_count = 1;
        cfg.segments_per_strand = usize::MAX / 2;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooManySegments { .. })
        ));
    }

    #[test]
    fn rejects_bad_scalars() {
        let mut cfg = SimConfig::default();
        cfg.rest_length = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::RestLength(0.0)));

        let mut cfg = SimConfig::default();
        cfg.damping = 1.5;
        assert_eq!(cfg.validate(), Err(ConfigError::Damping(1.5)));

        let mut cfg = SimConfig::default();
        cfg.drag_speed = 0.5;
        assert_eq!(cfg.validate(), Err(ConfigError::DragSpeed(0.5)));

        let mut cfg = SimConfig::default();
        cfg.anchor_radius = f32::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::AnchorRadius(_))));
    }

    #[test]
    fn zero_gravity_and_stiffness_are_allowed() {
        let mut cfg = SimConfig::default();
        cfg.gravity = 0.0;
        cfg.stiffness = 0.0;
        assert_eq!(cfg.validate(), Ok(()));
    }
}
