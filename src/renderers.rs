use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::errors::*;
use crate::grid::IndexType;
use crate::grid_traits::{Colour, BLACK};
use crate::grids::GridKind;

const BYTES_PER_PIXEL: usize = 4;

/// Width and height in pixels of a grid drawn with square cells of `cell_size` pixels.
pub fn pixel_dimensions<GridIndexType>(grid_kind: &GridKind<GridIndexType>,
                                       cell_size: u32)
                                       -> (u32, u32)
    where GridIndexType: IndexType
{
    let grid = grid_kind.grid();
    (cell_size * grid.columns().0 as u32, cell_size * grid.rows().0 as u32)
}

/// RGBA8 raster of the maze, row-major from the top left pixel.
///
/// Every cell rectangle is first filled with its background colour, then walls are drawn in
/// black: the north and west sides only on the grid boundary, the east and south sides wherever
/// a neighbour exists that is not linked. The outer east and south edges stay unpainted.
pub fn to_pixels<GridIndexType>(grid_kind: &GridKind<GridIndexType>, cell_size: u32) -> Vec<u8>
    where GridIndexType: IndexType
{
    let (img_width, img_height) = pixel_dimensions(grid_kind, cell_size);
    let mut canvas = Canvas::new(img_width, img_height);
    let grid = grid_kind.grid();

    for cell in grid.iter() {
        let (x1, y1, x2, y2) = cell_bounds(cell.x, cell.y, cell_size);
        canvas.draw_rect(x1, y1, x2, y2, grid_kind.background_colour_for(cell));
    }

    for cell in grid.iter() {
        let (x1, y1, x2, y2) = cell_bounds(cell.x, cell.y, cell_size);

        if grid.north(cell).is_none() {
            canvas.draw_line(x1, y1, x2, y1, BLACK);
        }
        if grid.west(cell).is_none() {
            canvas.draw_line(x1, y1, x1, y2, BLACK);
        }
        if let Some(east) = grid.east(cell) {
            if !grid.is_linked(cell, east) {
                canvas.draw_line(x2, y1, x2, y2, BLACK);
            }
        }
        if let Some(south) = grid.south(cell) {
            if !grid.is_linked(cell, south) {
                canvas.draw_line(x1, y2, x2, y2, BLACK);
            }
        }
    }

    canvas.pixels
}

/// Write an RGBA8 buffer produced by `to_pixels` as a PNG file.
pub fn save_png<P: AsRef<Path>>(pixels: Vec<u8>, width: u32, height: u32, path: P) -> Result<()> {
    let image = RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| Error::from(ErrorKind::PixelBufferSize(width, height)))?;
    image.save_with_format(path.as_ref(), ImageFormat::Png)?;
    info!("wrote {}x{} png to {}", width, height, path.as_ref().display());
    Ok(())
}

#[inline]
fn cell_bounds(column: u32, row: u32, cell_size: u32) -> (u32, u32, u32, u32) {
    (column * cell_size, row * cell_size, (column + 1) * cell_size, (row + 1) * cell_size)
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Canvas {
        // white, fully opaque
        let bytes = width as usize * height as usize * BYTES_PER_PIXEL;
        Canvas {
            width,
            height,
            pixels: vec![0xFF; bytes],
        }
    }

    // Ranges are half open, [x1, x2) and [y1, y2).
    fn draw_rect(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, colour: Colour) {
        for y in y1..y2 {
            for x in x1..x2 {
                self.put(x, y, colour);
            }
        }
    }

    fn draw_line(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, colour: Colour) {
        if x1 == x2 {
            for y in y1..y2 {
                self.put(x1, y, colour);
            }
        } else if y1 == y2 {
            for x in x1..x2 {
                self.put(x, y1, colour);
            }
        }
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, colour: Colour) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.pixels[index..index + BYTES_PER_PIXEL].copy_from_slice(&colour.to_be_bytes());
    }
}
