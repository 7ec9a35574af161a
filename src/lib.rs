//! Wavefill is a procedural liquid-progress rendering engine.
//!
//! Given a progress fraction, it renders an animated liquid surface (a moving
//! sinusoidal boundary built from quadratic curve segments) and composites it
//! through an alpha mask so the wave only appears inside a silhouette shape,
//! with a centered text label on top.
//!
//! # Pipeline overview
//!
//! 1. **Advance**: [`AnimationState::advance`] eases the fill level toward the
//!    target derived from progress and scrolls the wave phase.
//! 2. **Generate**: [`wave_fill_path`] emits the closed wave boundary path for
//!    the current phase/level.
//! 3. **Composite**: [`Compositor`] fills the path, gates it through the mask
//!    silhouette (Porter-Duff DstAtop) and overlays the label, producing one
//!    [`FrameRgba`].
//! 4. **Schedule**: [`AnimationScheduler`] drives periodic re-render ticks
//!    while active and cancels synchronously on deactivation.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end: frames carry premultiplied pixels.
//! - **Single render thread**: one cooperative timer loop, no worker pool.
//! - **Eager validation**: invalid configuration fails at the call site,
//!   never by silent clamping inside the render loop.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod engine;
mod foundation;
mod geometry;
mod render;
mod scheduler;

pub use animation::level::{AnimationState, target_level};
pub use assets::mask::MaskImage;
pub use engine::{ConfigSnapshot, TextStyle, WaveEngine, WaveParams, TICK_INTERVAL};
pub use foundation::core::{Canvas, Rgba8, Rgba8Premul};
pub use foundation::error::{WaveFillError, WaveFillResult};
pub use geometry::wave::{wave_count, wave_fill_path, wave_period};
pub use render::composite::{PremulRgba8, dst_atop, dst_atop_in_place, over, over_in_place};
pub use render::compositor::{Compositor, FrameRgba, LabelSpec};
pub use render::text::{TextBrushRgba8, TextLayoutEngine};
pub use scheduler::AnimationScheduler;
