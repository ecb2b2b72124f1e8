//! Core multi-strand physics library.
//!
//! Main components:
//! - [`geometry`]: angle and polar helpers on top of `glam::Vec2`.
//! - [`config`]: global simulation parameters and their validation.
//! - [`anchor`]: the draggable body strands hang from.
//! - [`bundle`]: flat per-segment position and velocity buffers.
//! - [`step`]: one frame of integration and distance correction.
//! - [`dispatch`]: fork-join execution of the step over strand shards.
//! - [`presets`]: cyclic control presets for strand count, rest length and gravity.
//! - [`render`]: drawable lines and circles produced each frame.
//! - [`status`]: the human-readable status line.
//! - [`sim`]: ties everything together for a frontend.
//! - [`types`]: shared type aliases and IDs.

pub mod anchor;
pub mod bundle;
pub mod config;
pub mod dispatch;
pub mod geometry;
pub mod presets;
pub mod render;
pub mod sim;
pub mod status;
pub mod step;
pub mod types;
