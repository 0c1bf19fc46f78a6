pub mod field;
pub mod frame;
pub mod march;
pub mod shade;

pub use field::{normal, signed_distance};
pub use frame::{
    ray_direction, render, render_pixel, render_with_stats, FrameBuffer, FrameSizeError,
    RenderStats,
};
pub use march::sphere_trace;
pub use shade::{fire_color, shade, BACKGROUND};
