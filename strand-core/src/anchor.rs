use glam::Vec2;
use tracing::trace;

/// The circular body every strand hangs from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub pos: Vec2,
    pub radius: f32,
    pub visible: bool,
}

impl Anchor {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            visible: true,
        }
    }

    /// Whether `p` lies inside or on the anchor's boundary.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.pos).length_squared() <= self.radius * self.radius
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }
}

/// Pointer-driven drag of the anchor.
///
/// A single latch models one pointer. Pressing the primary button while
/// over the anchor engages it; releasing the button disengages it. While
/// engaged the anchor closes `1/speed` of the remaining gap to the pointer
/// each frame, so it approaches but never lands exactly on the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragController {
    engaged: bool,
    speed: f32,
}

impl DragController {
    pub fn new(speed: f32) -> Self {
        Self {
            engaged: false,
            speed,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Advances the drag by one frame.
    ///
    /// Pressing inside the anchor engages the latch. While engaged the
    /// anchor covers `1 / speed` of the remaining distance each frame.
    ///
    /// ### Parameters
    /// - `anchor` - Body to move.
    /// - `pointer` - Pointer position, or `None` when it is outside the
    ///   window. The latch is kept but the anchor does not move.
    /// - `primary_down` - Whether the primary button is held. Releasing it
    ///   disengages the latch.
    ///
    /// ### Returns
    /// `true` if the anchor moved this frame.
    pub fn update(&mut self, anchor: &mut Anchor, pointer: Option<Vec2>, primary_down: bool) -> bool {
        if !primary_down {
            self.engaged = false;
            return false;
        }
        let Some(pointer) = pointer else {
            return false;
        };

        if anchor.contains(pointer) {
            if !self.engaged {
                trace!(x = pointer.x, y = pointer.y, "anchor grabbed");
            }
            self.engaged = true;
        }
        if !self.engaged {
            return false;
        }

        anchor.pos += (pointer - anchor.pos) / self.speed;
        true
    }
}
