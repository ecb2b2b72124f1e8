use crate::{anchor::Anchor, bundle::StrandBundle};
use glam::Vec2;

/// Length of the perpendicular tick drawn at each joint in debug mode.
pub const JOINT_TICK_LENGTH: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Strand,
    JointTick,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: Vec2,
    pub b: Vec2,
    pub kind: LineKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Perpendicular tick of [`JOINT_TICK_LENGTH`] centred on `joint`.
///
/// `None` when `joint` and `prev` coincide, since the strand has no
/// direction there.
pub fn joint_tick(prev: Vec2, joint: Vec2) -> Option<Line> {
    let normal = (joint - prev).perp().try_normalize()?;
    let half = normal * (JOINT_TICK_LENGTH * 0.5);
    Some(Line {
        a: joint - half,
        b: joint + half,
        kind: LineKind::JointTick,
    })
}

/// Appends the drawable lines of every strand to `out`.
///
/// One `Strand` line per adjacent segment pair, plus a `JointTick` at every
/// non-root segment when `joint_ticks` is set.
pub fn strand_lines(bundle: &StrandBundle, joint_ticks: bool, out: &mut Vec<Line>) {
    let pairs = bundle.strand_count() * bundle.segments_per_strand().saturating_sub(1);
    out.reserve(if joint_ticks { pairs * 2 } else { pairs });

    for strand in bundle.strands() {
        for pair in strand.windows(2) {
            out.push(Line {
                a: pair[0],
                b: pair[1],
                kind: LineKind::Strand,
            });
            if joint_ticks && let Some(tick) = joint_tick(pair[0], pair[1]) {
                out.push(tick);
            }
        }
    }
}

/// Outline of the anchor, or `None` while it is hidden.
pub fn anchor_outline(anchor: &Anchor) -> Option<Circle> {
    anchor.visible.then_some(Circle {
        center: anchor.pos,
        radius: anchor.radius,
    })
}
