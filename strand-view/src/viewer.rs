//! Interactive strand physics viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`Simulation`] and
//! implements [`eframe::App`] to feed it input and draw its output.

use eframe::App;
use glam::Vec2;
use strand_core::{
    presets::GravityPreset,
    render::LineKind,
    sim::{Control, FrameInput, Simulation},
};

/// Longest time step handed to the simulation. Stalls (window drags,
/// first frame) would otherwise launch the strands.
const MAX_FRAME_DT: f32 = 0.1;

/// How often the frame rate shown in the title is refreshed.
const FPS_WINDOW: f32 = 0.5;

const HELP_LINES: [&str; 7] = [
    "Q - toggle body visibility",
    "W - change strand count",
    "E - change segment length",
    "R - toggle joint ticks",
    "1 - gravity = 5000",
    "2 - gravity = 250",
    "3 - gravity = 100",
];

const KEY_BINDINGS: [(egui::Key, Control); 7] = [
    (egui::Key::Q, Control::ToggleAnchor),
    (egui::Key::W, Control::CycleStrandCount),
    (egui::Key::E, Control::CycleRestLength),
    (egui::Key::R, Control::ToggleDebugLines),
    (egui::Key::Num1, Control::SelectGravity(GravityPreset::Heavy)),
    (egui::Key::Num2, Control::SelectGravity(GravityPreset::Medium)),
    (egui::Key::Num3, Control::SelectGravity(GravityPreset::Light)),
];

/// The control bound to `key`, if any.
fn control_for_key(key: egui::Key) -> Option<Control> {
    KEY_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, control)| control)
}

/// Frame rate averaged over [`FPS_WINDOW`] seconds.
#[derive(Debug, Default)]
struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    /// Records one frame; returns `true` when the reported value changed.
    fn tick(&mut self, dt: f32) -> bool {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed < FPS_WINDOW {
            return false;
        }
        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        true
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}

/// Main application state for the interactive viewer.
///
/// The per-frame update is:
/// 1. Translate key presses into [`Control`] events.
/// 2. Advance the simulation with the pointer state and elapsed time.
/// 3. Draw strands, the body outline and the help text.
/// 4. Refresh the window title with the status line.
pub struct Viewer {
    sim: Simulation,
    fps: FpsCounter,
    title: String,
}

impl Viewer {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            fps: FpsCounter::default(),
            title: String::new(),
        }
    }

    /// Converts a simulation position to screen-space.
    ///
    /// Simulation coordinates match the canvas: origin at the top-left
    /// corner, y pointing down (so positive gravity pulls strands down).
    fn world_to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        Vec2::new(p.x - rect.min.x, p.y - rect.min.y)
    }

    /// Applies the controls for every key pressed this frame.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed: Vec<Control> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => control_for_key(*key),
                    _ => None,
                })
                .collect()
        });
        for control in pressed {
            self.sim.apply(control);
        }
    }

    fn frame_input(ctx: &egui::Context, rect: egui::Rect) -> FrameInput {
        ctx.input(|i| FrameInput {
            dt: i.unstable_dt.min(MAX_FRAME_DT),
            pointer: i.pointer.latest_pos().map(|p| Self::screen_to_world(p, rect)),
            primary_down: i.pointer.primary_down(),
        })
    }

    fn draw(&self, painter: &egui::Painter, rect: egui::Rect) {
        let strand = egui::Stroke::new(1.0, egui::Color32::WHITE);
        let tick = egui::Stroke::new(1.0, egui::Color32::YELLOW);

        for line in self.sim.lines() {
            let stroke = match line.kind {
                LineKind::Strand => strand,
                LineKind::JointTick => tick,
            };
            painter.line_segment(
                [
                    Self::world_to_screen(line.a, rect),
                    Self::world_to_screen(line.b, rect),
                ],
                stroke,
            );
        }

        if let Some(circle) = self.sim.anchor_outline() {
            painter.circle_stroke(
                Self::world_to_screen(circle.center, rect),
                circle.radius,
                egui::Stroke::new(1.0, egui::Color32::GREEN),
            );
        }

        for (row, text) in HELP_LINES.iter().enumerate() {
            painter.text(
                rect.min + egui::vec2(5.0, row as f32 * 30.0),
                egui::Align2::LEFT_TOP,
                *text,
                egui::FontId::proportional(20.0),
                egui::Color32::RED,
            );
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let title = self.sim.status(self.fps.fps()).to_string();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

impl App for Viewer {
    /// eframe callback run once per frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::drag());
                let rect = response.rect;

                let input = Self::frame_input(ctx, rect);
                self.sim.advance(&input);
                self.fps.tick(input.dt);

                self.draw(&painter, rect);
            });

        self.update_title(ctx);
        ctx.request_repaint();
    }
}
