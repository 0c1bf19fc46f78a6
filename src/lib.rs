//! Signed distance field ray marcher for a single noise-displaced sphere.
//!
//! The crate renders into an in-memory [`FrameBuffer`] of normalized RGB
//! colors. Encoding to PNG and terminal previews live in [`output`] and
//! [`preview`] and only ever consume a finished frame, so the renderer itself
//! stays free of I/O and easy to test headless.

pub mod math;
pub mod noise;
pub mod output;
pub mod preview;
pub mod render;
pub mod scene;

pub use math::{Vec3, VectorExt};
pub use noise::{fractal_noise, hash, value_noise};
pub use output::{save_png, to_rgb8, OutputError};
pub use preview::{render_preview, PreviewMode};
pub use render::{render, render_with_stats, sphere_trace, FrameBuffer, RenderStats};
pub use scene::{Camera, Light, RenderConfig, Scene, SurfaceParams};
