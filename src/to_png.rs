#![cfg(feature = "host")]
//! PNG previews of the LED matrix for documentation and tests.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};
use smart_leds::RGB8;

use crate::dimension::GRID_SIZE;
use crate::grid::Grid;
use crate::serpentine::Frame;

/// The palette is dim (0..32); previews brighten it so the colors are visible.
const PREVIEW_GAIN: f32 = 255.0 / 32.0;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Writes the matrix as lit `frame` would show it, one disc per LED, top row first.
///
/// The image is at most `target_max_dimension` pixels on its longer side.
pub fn write_frame_png(
    frame: &Frame,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(target_max_dimension);
    let (side, pixels) = panel_pixels(frame, cell_size);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), side, side);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_source_gamma(ScaledFloat::new(1.0 / PREVIEW_INVERSE_GAMMA));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    Ok(())
}

/// Writes the LED preview of `grid`.
pub fn write_grid_png(
    grid: &Grid,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    write_frame_png(&Frame::from_grid(grid), output_path, target_max_dimension)
}

fn select_cell_size(target_max_dimension: u32) -> u32 {
    assert!(
        target_max_dimension >= GRID_SIZE as u32 * 4,
        "target_max_dimension is too small for a 5x5 preview"
    );
    target_max_dimension / GRID_SIZE as u32
}

fn panel_pixels(frame: &Frame, cell_size: u32) -> (u32, Vec<u8>) {
    let side = cell_size * GRID_SIZE as u32;
    let mut bytes = vec![0_u8; (side * side * 3) as usize];
    let margin = (cell_size / 8).max(1);
    let radius = (cell_size - margin * 2) as f32 / 2.0;
    let center = (cell_size as f32 - 1.0) / 2.0;

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let color = preview_color(frame.at_cell(row, col));
            let origin_x = col as u32 * cell_size;
            let origin_y = row as u32 * cell_size;
            for local_y in 0..cell_size {
                for local_x in 0..cell_size {
                    let delta_x = local_x as f32 - center;
                    let delta_y = local_y as f32 - center;
                    if delta_x.hypot(delta_y) > radius {
                        continue;
                    }
                    let x = origin_x + local_x;
                    let y = origin_y + local_y;
                    let index = ((y * side + x) * 3) as usize;
                    if let Some(pixel) = bytes.get_mut(index..index + 3) {
                        pixel.copy_from_slice(&[color.r, color.g, color.b]);
                    }
                }
            }
        }
    }
    (side, bytes)
}

fn preview_color(color: RGB8) -> RGB8 {
    let boost = |channel: u8| (f32::from(channel) * PREVIEW_GAIN).round().min(255.0) as u8;
    RGB8::new(boost(color.r), boost(color.g), boost(color.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lit_led_is_boosted_and_free_led_is_black() {
        assert_eq!(preview_color(RGB8::new(32, 0, 16)), RGB8::new(255, 0, 128));
        assert_eq!(preview_color(RGB8::default()), RGB8::default());
    }

    #[test]
    fn cell_size_fits_target() {
        assert_eq!(select_cell_size(200), 40);
        assert_eq!(select_cell_size(203), 40);
    }

    #[test]
    fn disc_fills_the_cell_center_and_leaves_corners_black() {
        let mut grid = Grid::new();
        let red = RGB8::new(32, 0, 0);
        let _ = grid.place(crate::dimension::Candidate::from_sides(1, 1).expect("valid"), red);
        let frame = Frame::from_grid(&grid);

        let (side, bytes) = panel_pixels(&frame, 20);
        assert_eq!(side, 100);
        assert_eq!(bytes.len(), 100 * 100 * 3);
        let center = (10 * 100 + 10) * 3;
        assert_eq!(&bytes[center..center + 3], &[255, 0, 0]);
        assert_eq!(&bytes[0..3], &[0, 0, 0]);
        let last = bytes.len() - 3;
        assert_eq!(&bytes[last..], &[0, 0, 0]);
    }
}
