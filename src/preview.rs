//! Terminal previews of a rendered frame.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::math::Vec3;
use crate::render::FrameBuffer;

/// Characters from darkest to brightest.
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

const BRAILLE_BASE: u32 = 0x2800;
/// Dot bit for each (column, row) inside a 2x4 braille cell.
const BRAILLE_DOTS: [[u32; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];
const BRAILLE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    #[default]
    Braille,
    Ascii,
    None,
}

#[derive(Debug, Error)]
#[error("unknown preview mode {0:?}, expected braille, ascii or none")]
pub struct ParsePreviewModeError(String);

impl FromStr for PreviewMode {
    type Err = ParsePreviewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "braille" => Ok(Self::Braille),
            "ascii" => Ok(Self::Ascii),
            "none" | "off" => Ok(Self::None),
            _ => Err(ParsePreviewModeError(s.to_string())),
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Braille => "braille",
            Self::Ascii => "ascii",
            Self::None => "none",
        })
    }
}

/// Renders the preview for `mode`, or `None` when previews are off.
pub fn render_preview(frame: &FrameBuffer, mode: PreviewMode, columns: u32) -> Option<String> {
    match mode {
        PreviewMode::Braille => Some(braille(frame)),
        PreviewMode::Ascii => Some(ascii(frame, columns)),
        PreviewMode::None => None,
    }
}

/// Rec. 601 luma of a color.
pub fn luminance(color: Vec3) -> f64 {
    0.299 * color.x + 0.587 * color.y + 0.114 * color.z
}

/// One braille character per 2x4 pixel block; bright pixels raise a dot.
///
/// Blocks that hang over the right or bottom edge treat the missing pixels
/// as dark.
pub fn braille(frame: &FrameBuffer) -> String {
    let cell_columns = frame.width().div_ceil(2);
    let cell_rows = frame.height().div_ceil(4);
    let mut out = String::with_capacity(((cell_columns + 1) * cell_rows * 3) as usize);

    for cell_row in 0..cell_rows {
        for cell_column in 0..cell_columns {
            let mut bits = 0;
            for (dx, column_dots) in BRAILLE_DOTS.iter().enumerate() {
                for (dy, dot) in column_dots.iter().enumerate() {
                    let x = cell_column * 2 + dx as u32;
                    let y = cell_row * 4 + dy as u32;
                    let lit = frame
                        .get(x, y)
                        .is_some_and(|color| luminance(color) >= BRAILLE_THRESHOLD);
                    if lit {
                        bits |= dot;
                    }
                }
            }
            out.push(char::from_u32(BRAILLE_BASE + bits).unwrap_or(' '));
        }
        out.push('\n');
    }
    out
}

/// Downsamples to `columns` characters per line and maps mean luminance onto
/// [`ASCII_RAMP`]. Each character spans twice as many rows as columns.
pub fn ascii(frame: &FrameBuffer, columns: u32) -> String {
    let width = frame.width();
    let height = frame.height();
    if width == 0 || height == 0 {
        return String::new();
    }

    let columns = columns.clamp(1, width);
    let step_x = width as f64 / columns as f64;
    let step_y = step_x * 2.0;
    let rows = (height as f64 / step_y).ceil().max(1.0) as u32;
    let mut out = String::with_capacity(((columns + 1) * rows) as usize);

    for row in 0..rows {
        let y0 = (row as f64 * step_y) as u32;
        let y1 = (((row + 1) as f64 * step_y) as u32).clamp(y0 + 1, height);
        for column in 0..columns {
            let x0 = (column as f64 * step_x) as u32;
            let x1 = (((column + 1) as f64 * step_x) as u32).clamp(x0 + 1, width);
            let mut total = 0.0;
            let mut count = 0u32;
            for y in y0..y1 {
                for x in x0..x1 {
                    if let Some(color) = frame.get(x, y) {
                        total += luminance(color);
                        count += 1;
                    }
                }
            }
            let mean = if count == 0 { 0.0 } else { total / count as f64 };
            out.push(ramp_char(mean));
        }
        out.push('\n');
    }
    out
}

fn ramp_char(level: f64) -> char {
    let last = ASCII_RAMP.len() - 1;
    let index = (level.min(1.0).max(0.0) * last as f64).round() as usize;
    ASCII_RAMP[index.min(last)] as char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: u32, height: u32, color: Vec3) -> FrameBuffer {
        FrameBuffer::from_pixels(width, height, vec![color; (width * height) as usize]).unwrap()
    }

    #[test]
    fn parses_modes() {
        assert_eq!("braille".parse::<PreviewMode>().unwrap(), PreviewMode::Braille);
        assert_eq!("ASCII".parse::<PreviewMode>().unwrap(), PreviewMode::Ascii);
        assert_eq!("none".parse::<PreviewMode>().unwrap(), PreviewMode::None);
        assert!("sixel".parse::<PreviewMode>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mode in [PreviewMode::Braille, PreviewMode::Ascii, PreviewMode::None] {
            assert_eq!(mode.to_string().parse::<PreviewMode>().unwrap(), mode);
        }
    }

    #[test]
    fn white_block_is_full_braille_cell() {
        let frame = flat(2, 4, Vec3::ONE);
        assert_eq!(braille(&frame), "\u{28FF}\n");
    }

    #[test]
    fn black_block_is_blank_braille_cell() {
        let frame = flat(2, 4, Vec3::ZERO);
        assert_eq!(braille(&frame), "\u{2800}\n");
    }

    #[test]
    fn partial_braille_cells_are_padded_dark() {
        let frame = flat(3, 5, Vec3::ONE);
        let preview = braille(&frame);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "\u{28FF}\u{2847}");
        assert_eq!(lines[1], "\u{2809}\u{2801}");
    }

    #[test]
    fn single_lit_pixel_sets_matching_dot() {
        let mut pixels = vec![Vec3::ZERO; 8];
        pixels[3 * 2 + 1] = Vec3::ONE;
        let frame = FrameBuffer::from_pixels(2, 4, pixels).unwrap();
        assert_eq!(braille(&frame), "\u{2880}\n");
    }

    #[test]
    fn ascii_maps_brightness_to_ramp() {
        assert_eq!(ascii(&flat(4, 4, Vec3::ONE), 2), "@@\n");
        assert_eq!(ascii(&flat(4, 4, Vec3::ZERO), 2), "  \n");
    }

    #[test]
    fn ascii_never_exceeds_frame_width() {
        let preview = ascii(&flat(3, 6, Vec3::splat(0.5)), 80);
        let first = preview.lines().next().unwrap();
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn preview_none_is_empty() {
        assert!(render_preview(&flat(2, 2, Vec3::ONE), PreviewMode::None, 10).is_none());
    }
}
