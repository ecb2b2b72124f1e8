//! One frame of strand physics.
//!
//! Every free segment goes through the same sequence each frame:
//! 1. gravity is added to its velocity,
//! 2. a spring pulls it toward the previous segment,
//! 3. its velocity is damped,
//! 4. its position is integrated,
//! 5. a single positional correction moves it back toward rest length.
//!
//! The correction is one pass, not a converged solve: under fast motion
//! strands visibly stretch.

use crate::{
    anchor::Anchor,
    bundle::StrandBundle,
    config::SimConfig,
    geometry::{direction_and_distance, polar, strand_angle},
    types::StrandId,
};
use glam::Vec2;
use std::ops::Range;

/// Read-only inputs shared by every shard of a frame.
///
/// This is a snapshot: the anchor is copied in before any worker starts,
/// so later input handling cannot race with the step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    pub dt: f32,
    pub gravity: f32,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub anchor_pos: Vec2,
    pub anchor_radius: f32,
}

impl StepParams {
    pub fn new(cfg: &SimConfig, anchor: &Anchor, dt: f32) -> Self {
        Self {
            dt,
            gravity: cfg.gravity,
            rest_length: cfg.rest_length,
            stiffness: cfg.stiffness,
            damping: cfg.damping,
            anchor_pos: anchor.pos,
            anchor_radius: anchor.radius,
        }
    }
}

/// Mutable view over a contiguous run of strands.
///
/// Created by [`StrandBundle::shards_mut`]. Shards never overlap, so each
/// one can be stepped on its own thread.
#[derive(Debug)]
pub struct Shard<'a> {
    first: StrandId,
    strand_count: usize,
    segments_per_strand: usize,
    positions: &'a mut [Vec2],
    velocities: &'a mut [Vec2],
}

impl<'a> Shard<'a> {
    pub(crate) fn new(
        first: StrandId,
        strand_count: usize,
        segments_per_strand: usize,
        positions: &'a mut [Vec2],
        velocities: &'a mut [Vec2],
    ) -> Self {
        Self {
            first,
            strand_count,
            segments_per_strand,
            positions,
            velocities,
        }
    }

    /// Index of the first strand in this shard.
    pub fn first_strand(&self) -> StrandId {
        self.first
    }

    /// Number of strands in this shard.
    pub fn len(&self) -> usize {
        self.positions
            .len()
            .checked_div(self.segments_per_strand)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances every strand of the shard by one frame.
    pub fn step(&mut self, params: &StepParams) {
        if self.segments_per_strand == 0 {
            return;
        }
        let n = self.segments_per_strand;
        let strands = self
            .positions
            .chunks_exact_mut(n)
            .zip(self.velocities.chunks_exact_mut(n));

        for (k, (positions, velocities)) in strands.enumerate() {
            let angle = strand_angle(self.first + k, self.strand_count);
            step_strand(angle, positions, velocities, params);
        }
    }
}

/// Advances a single strand by one frame.
///
/// The root is pinned to the anchor boundary at `angle`; segments
/// `1..len` are then updated in order, each one reading the already
/// updated position of its predecessor.
///
/// ### Parameters
/// - `angle` - Resting angle of the strand around the anchor.
/// - `positions` - Segment positions, root first.
/// - `velocities` - Segment velocities, same length as `positions`.
///   The root's velocity is never read or written.
/// - `params` - Frame snapshot (time step, forces, anchor).
pub fn step_strand(angle: f32, positions: &mut [Vec2], velocities: &mut [Vec2], params: &StepParams) {
    let Some(root) = positions.first_mut() else {
        return;
    };
    *root = polar(params.anchor_pos, params.anchor_radius, angle);

    let dt = params.dt;
    let len = positions.len().min(velocities.len());
    for j in 1..len {
        let mut v = velocities[j];
        v.y += params.gravity * dt;

        if let Some((dir, dist)) = direction_and_distance(positions[j], positions[j - 1]) {
            v += dir * ((dist - params.rest_length) * params.stiffness);
        }

        v *= params.damping;
        positions[j] += v * dt;
        velocities[j] = v;

        if let Some((dir, dist)) = direction_and_distance(positions[j], positions[j - 1]) {
            positions[j] += dir * (dist - params.rest_length);
        }
    }
}

/// Steps the strands in `range` on the calling thread.
///
/// Indices past the live strand count are ignored.
pub fn step_range(bundle: &mut StrandBundle, range: Range<StrandId>, params: &StepParams) {
    for mut shard in bundle.shards_mut(&[range]) {
        shard.step(params);
    }
}
