use std::time::{Duration, Instant};

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::{Vec3, VectorExt};
use crate::scene::{RenderConfig, Scene};

use super::march::sphere_trace;
use super::shade::shade;

/// Row-major grid of colors with every channel in `[0, 1]`.
///
/// Deserialization goes through [`FrameBuffer::from_pixels`], so a decoded
/// frame is clamped and sized like a rendered one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

#[derive(Deserialize)]
struct RawFrame {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

#[derive(Debug, Error)]
#[error("frame has {actual} pixels, expected {width}x{height}")]
pub struct FrameSizeError {
    pub width: u32,
    pub height: u32,
    pub actual: usize,
}

impl TryFrom<RawFrame> for FrameBuffer {
    type Error = FrameSizeError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        let actual = raw.pixels.len();
        Self::from_pixels(raw.width, raw.height, raw.pixels).ok_or(FrameSizeError {
            width: raw.width,
            height: raw.height,
            actual,
        })
    }
}

impl FrameBuffer {
    /// Wraps existing colors, clamping every channel. Returns `None` when
    /// `pixels` does not hold exactly `width * height` entries.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Vec3>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        let pixels = pixels
            .into_iter()
            .map(|color| color.clamp_scalar(0.0, 1.0))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    /// Color at column `x`, row `y`, or `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<Vec3> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Vec3]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    pub fn into_pixels(self) -> Vec<Vec3> {
        self.pixels
    }
}

/// Camera-space direction through the center of pixel (`row`, `column`).
pub fn ray_direction(config: &RenderConfig, row: u32, column: u32) -> Vec3 {
    let width = config.width as f64;
    let height = config.height as f64;
    let x = (column as f64 + 0.5) - width / 2.0;
    let y = -(row as f64 + 0.5) + height / 2.0;
    let z = -height / (2.0 * (config.fov / 2.0).tan());
    Vec3::new(x, y, z).normalize()
}

/// Traces and shades a single pixel.
pub fn render_pixel(scene: &Scene, row: u32, column: u32) -> Vec3 {
    trace_pixel(scene, row, column).0
}

/// Color of one pixel and whether its ray hit the surface.
fn trace_pixel(scene: &Scene, row: u32, column: u32) -> (Vec3, bool) {
    let dir = ray_direction(&scene.render, row, column);
    let hit = sphere_trace(&scene.surface, scene.camera.position, dir);
    (shade(scene, hit).clamp_scalar(0.0, 1.0), hit.is_some())
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Pixels whose ray hit the surface.
    pub hits: usize,
    pub elapsed: Duration,
}

/// Renders the whole frame. Rows are traced in parallel.
pub fn render(scene: &Scene) -> FrameBuffer {
    render_with_stats(scene).0
}

/// Like [`render`], also reporting how many rays hit and how long it took.
pub fn render_with_stats(scene: &Scene) -> (FrameBuffer, RenderStats) {
    let RenderConfig { width, height, .. } = scene.render;
    let started = Instant::now();

    let mut pixels = vec![Vec3::ZERO; width as usize * height as usize];
    let hits = if width > 0 {
        pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .map(|(row, slots)| {
                let mut row_hits = 0;
                for (column, slot) in slots.iter_mut().enumerate() {
                    let (color, hit) = trace_pixel(scene, row as u32, column as u32);
                    *slot = color;
                    row_hits += usize::from(hit);
                }
                row_hits
            })
            .sum::<usize>()
    } else {
        0
    };

    let stats = RenderStats {
        hits,
        elapsed: started.elapsed(),
    };
    debug!(
        "rendered {width}x{height} frame, {} of {} rays hit, in {:.2?}",
        stats.hits,
        pixels.len(),
        stats.elapsed
    );

    let frame = FrameBuffer {
        width,
        height,
        pixels,
    };
    (frame, stats)
}
