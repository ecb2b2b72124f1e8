use crate::presets::GravityPreset;
use std::fmt;

/// Human-readable summary of the running simulation, shown in the window
/// title. Not meant to be parsed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Status {
    pub gravity_mode: Option<GravityPreset>,
    pub gravity: f32,
    pub strand_count: usize,
    pub segments_per_strand: usize,
    pub fps: f32,
}

impl Status {
    pub fn total_segments(&self) -> usize {
        self.strand_count * self.segments_per_strand
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gravity_mode {
            Some(mode) => write!(f, "Gravity Mode: {}", mode.mode())?,
            None => write!(f, "Gravity Mode: custom")?,
        }
        write!(
            f,
            " : Gravity Value - {} || Strands = {}, segments per strand = {} ({}) || FPS: {:.0}",
            self.gravity,
            self.strand_count,
            self.segments_per_strand,
            self.total_segments(),
            self.fps,
        )
    }
}
