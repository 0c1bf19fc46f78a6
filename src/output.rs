use std::io;
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;
use thiserror::Error;

use crate::math::Vec3;
use crate::render::FrameBuffer;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to encode image")]
    Encode(#[from] image::ImageError),
    #[error("failed to write image")]
    Io(#[from] io::Error),
}

/// Converts a normalized channel to a byte, rounding to nearest.
#[inline]
pub fn channel_to_u8(channel: f64) -> u8 {
    (channel.min(1.0).max(0.0) * 255.0).round() as u8
}

fn pixel_to_rgb(color: Vec3) -> Rgb<u8> {
    Rgb([
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ])
}

/// Packs the frame into an 8-bit RGB raster.
pub fn to_rgb8(frame: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(frame.width(), frame.height(), |x, y| {
        frame.get(x, y).map(pixel_to_rgb).unwrap_or(Rgb([0, 0, 0]))
    })
}

/// Encodes the frame as PNG at `path`.
pub fn save_png<P: AsRef<Path>>(frame: &FrameBuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let raster = to_rgb8(frame);
    raster.save_with_format(path, image::ImageFormat::Png)?;
    info!(
        "wrote {}x{} image to {}",
        frame.width(),
        frame.height(),
        path.display()
    );
    Ok(())
}
