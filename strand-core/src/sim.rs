//! The simulation as seen by a frontend.
//!
//! [`Simulation`] owns the configuration, strand bundle, anchor and
//! dispatcher. A frontend drives it once per frame:
//! 1. [`Simulation::apply`] for each control event (key press),
//! 2. [`Simulation::advance`] with the frame's pointer state and time step,
//! 3. [`Simulation::lines`] / [`Simulation::anchor_outline`] to draw,
//!    and [`Simulation::status`] for the status line.
//!
//! All of these take `&self` or `&mut self` on one thread, so
//! reconfiguration can never overlap a dispatched frame and the anchor
//! update always happens before the workers read it.

use crate::{
    anchor::{Anchor, DragController},
    bundle::StrandBundle,
    config::{ConfigError, SimConfig},
    dispatch::Dispatcher,
    presets::{GravityPreset, RestLengthPreset, StrandCountPreset},
    render::{self, Circle, Line},
    status::Status,
    step::StepParams,
};
use glam::Vec2;
use tracing::{debug, info};

/// Discrete control events a frontend can send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    ToggleAnchor,
    CycleStrandCount,
    CycleRestLength,
    ToggleDebugLines,
    SelectGravity(GravityPreset),
}

/// Per-frame input state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Elapsed time since the previous frame, in seconds.
    pub dt: f32,
    /// Pointer position in simulation coordinates, if the pointer is known.
    pub pointer: Option<Vec2>,
    pub primary_down: bool,
}

/// Everything a frontend needs to run and draw the strands.
///
/// ### Fields
/// - `cfg` - Live parameters; reconfiguration and gravity selection edit it.
/// - `bundle` - Strand state, rebuilt on reconfiguration.
/// - `anchor`, `drag` - Body and its pointer latch.
/// - `dispatcher` - Runs the per-frame step across workers.
/// - `strand_preset`, `rest_preset`, `gravity_preset` - Current position
///   in each control cycle.
/// - `debug_lines` - Whether joint ticks are emitted.
#[derive(Debug)]
pub struct Simulation {
    cfg: SimConfig,
    bundle: StrandBundle,
    anchor: Anchor,
    drag: DragController,
    dispatcher: Dispatcher,

    // `None` when the configured value is not one of the presets; the next
    // cycle event then starts over at the first preset.
    strand_preset: Option<StrandCountPreset>,
    rest_preset: Option<RestLengthPreset>,
    gravity_preset: Option<GravityPreset>,

    debug_lines: bool,
}

impl Simulation {
    /// Validates `cfg` and lays out the initial bundle around
    /// `cfg.anchor_position`.
    pub fn new(cfg: SimConfig, dispatcher: Dispatcher) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let anchor = Anchor::new(cfg.anchor_position, cfg.anchor_radius);
        let bundle = StrandBundle::new(
            cfg.strand_count,
            cfg.segments_per_strand,
            cfg.rest_length,
            &anchor,
        );

        Ok(Self {
            cfg,
            bundle,
            anchor,
            drag: DragController::new(cfg.drag_speed),
            dispatcher,
            strand_preset: StrandCountPreset::from_value(cfg.strand_count),
            rest_preset: RestLengthPreset::from_value(cfg.rest_length),
            gravity_preset: GravityPreset::from_value(cfg.gravity),
            debug_lines: false,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn bundle(&self) -> &StrandBundle {
        &self.bundle
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_engaged()
    }

    /// Handles one control event.
    pub fn apply(&mut self, control: Control) {
        match control {
            Control::ToggleAnchor => self.anchor.toggle_visible(),
            Control::ToggleDebugLines => self.debug_lines = !self.debug_lines,
            Control::CycleStrandCount => {
                // The first press moves past the current preset rather than re-applying it.
                let next = self
                    .strand_preset
                    .map_or(StrandCountPreset::One, StrandCountPreset::next);
                self.strand_preset = Some(next);
                self.rebuild(next.value(), self.cfg.rest_length);
            }
            Control::CycleRestLength => {
                // Same as above: 20 goes to 50 on the first press.
                let next = self
                    .rest_preset
                    .map_or(RestLengthPreset::Short, RestLengthPreset::next);
                self.rest_preset = Some(next);
                self.rebuild(self.cfg.strand_count, next.value());
            }
            Control::SelectGravity(preset) => {
                self.gravity_preset = Some(preset);
                self.cfg.gravity = preset.value();
                info!(mode = preset.mode(), gravity = preset.value(), "gravity changed");
            }
        }
    }

    /// Rebuilds every strand with new parameters around the anchor's
    /// current position. Velocities start from zero.
    pub fn reconfigure(&mut self, strand_count: usize, rest_length: f32) -> Result<(), ConfigError> {
        let mut cfg = self.cfg;
        cfg.strand_count = strand_count;
        cfg.rest_length = rest_length;
        cfg.validate()?;

        self.strand_preset = StrandCountPreset::from_value(strand_count);
        self.rest_preset = RestLengthPreset::from_value(rest_length);
        self.rebuild(strand_count, rest_length);
        Ok(())
    }

    fn rebuild(&mut self, strand_count: usize, rest_length: f32) {
        self.cfg.strand_count = strand_count;
        self.cfg.rest_length = rest_length;
        self.bundle.initialize(
            strand_count,
            self.cfg.segments_per_strand,
            rest_length,
            self.anchor.pos,
            self.anchor.radius,
        );
        debug!(
            strand_count,
            rest_length,
            segments = self.bundle.total_segments(),
            "strands rebuilt"
        );
    }

    /// Runs one frame: drag the anchor, then step every strand.
    pub fn advance(&mut self, input: &FrameInput) {
        self.drag
            .update(&mut self.anchor, input.pointer, input.primary_down);

        let params = StepParams::new(&self.cfg, &self.anchor, input.dt);
        self.dispatcher.run(&mut self.bundle, &params);
    }

    /// Lines to draw for the current frame.
    pub fn lines(&self) -> Vec<Line> {
        let mut out = Vec::new();
        render::strand_lines(&self.bundle, self.debug_lines, &mut out);
        out
    }

    pub fn anchor_outline(&self) -> Option<Circle> {
        render::anchor_outline(&self.anchor)
    }

    pub fn status(&self, fps: f32) -> Status {
        Status {
            gravity_mode: self.gravity_preset,
            gravity: self.cfg.gravity,
            strand_count: self.bundle.strand_count(),
            segments_per_strand: self.bundle.segments_per_strand(),
            fps,
        }
    }
}
