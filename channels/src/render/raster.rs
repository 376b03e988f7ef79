use crate::grid::TrackGrid;
use crate::segment::Orientation;
use image::{ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

const TRACK_COLORS: [Rgb<u8>; 6] = [
    Rgb([0, 110, 255]),
    Rgb([255, 20, 80]),
    Rgb([0, 255, 100]),
    Rgb([255, 215, 0]),
    Rgb([180, 50, 255]),
    Rgb([0, 240, 255]),
];

/// Renders a packed grid to an image. Each cell is split into one lane per
/// track; segments are drawn in their lane, coloured by track index.
pub fn draw_channels(grid: &TrackGrid, width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([20, 20, 20]));

    let size = grid.size();
    if size.width == 0 || size.height == 0 || width == 0 || height == 0 {
        return img;
    }

    let cell_w = width as f32 / size.width as f32;
    let cell_h = height as f32 / size.height as f32;
    let lanes = (grid.max_tracks() + 1) as f32;

    let outline = Rgb([60, 60, 60]);
    for y in 0..size.height {
        for x in 0..size.width {
            let rect = ImageRect::at((x as f32 * cell_w) as i32, (y as f32 * cell_h) as i32)
                .of_size((cell_w as u32).max(1), (cell_h as u32).max(1));
            draw_hollow_rect_mut(&mut img, rect, outline);
        }
    }

    for seg in grid.segments() {
        let Some(track) = seg.index() else { continue };
        let color = TRACK_COLORS[track % TRACK_COLORS.len()];
        let (common, lo, hi) = grid.extent(seg);
        let lane = (track + 1) as f32 / lanes;

        let (x1, y1, x2, y2) = match grid.orientation() {
            Orientation::Row => {
                let y = (common as f32 + lane) * cell_h;
                ((lo as f32 + 0.5) * cell_w, y, (hi as f32 + 0.5) * cell_w, y)
            }
            Orientation::Column => {
                let x = (common as f32 + lane) * cell_w;
                (x, (lo as f32 + 0.5) * cell_h, x, (hi as f32 + 0.5) * cell_h)
            }
        };
        if lo == hi {
            let rect = ImageRect::at(x1 as i32 - 1, y1 as i32 - 1).of_size(3, 3);
            draw_filled_rect_mut(&mut img, rect, color);
        } else {
            draw_line_segment_mut(&mut img, (x1, y1), (x2, y2), color);
        }
    }

    img
}

pub fn save_channels(grid: &TrackGrid, filename: &str, width: u32, height: u32) -> ImageResult<()> {
    draw_channels(grid, width, height).save(Path::new(filename))
}
