use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{Grid, IndexType};
use crate::grid_traits::{Colour, GridDisplay};
use crate::pathing::{Distances, MaxDistance};
use crate::utils::FnvHashSet;


const CORNER: char = '+';
const WALL_UD: char = '|';
const WALL_LR_3: &str = "---";
const OPEN_SIDE: char = ' ';
const OPEN_FLOOR: &str = "   ";
const DEFAULT_CELL_BODY: &str = "   ";

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Uppercase base 36 digits of `n`.
pub fn base36(mut n: u64) -> String {
    if n == 0 {
        return String::from("0");
    }
    let mut digits = Vec::with_capacity(13);
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        match self.distance_from_start_to(coord).and_then(|d| d.to_u64()) {
            Some(d) => {
                let digits = base36(d);
                // three glyphs wide, keep the least significant digits if there are more
                let digits = &digits[digits.len().saturating_sub(3)..];
                format!("{:^3}", digits)
            }
            None => String::from(DEFAULT_CELL_BODY),
        }
    }

    fn background_colour(&self, coord: Cartesian2DCoordinate) -> Option<Colour> {
        let distance = self.distance_from_start_to(coord)?.to_f32()?;
        let max = self.max().to_f32()?;

        let intensity = if max > 0.0 { (max - distance) / max } else { 1.0 };
        let dark = (255.0 * intensity) as u32;
        let bright = 128 + (127.0 * intensity) as u32;

        Some((dark << 24) | (bright << 16) | (dark << 8) | 0xFF)
    }
}


/// Marks the cells of a path with a dot.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from(DEFAULT_CELL_BODY)
        }
    }
}


/// ASCII diagram of the grid.
///
/// ```text
/// +---+---+
/// |       |
/// +   +---+
/// |       |
/// +---+---+
/// ```
///
/// Each cell reuses the southern wall of the cell above as its northern wall, so only the body,
/// the eastern side and the southern side are drawn per cell. A grid without cells renders as an
/// empty string.
pub fn render_text<GridIndexType>(grid: &Grid<GridIndexType>,
                                  grid_display: Option<&dyn GridDisplay>)
                                  -> String
    where GridIndexType: IndexType
{
    if grid.is_empty() {
        return String::new();
    }

    let columns_count = grid.columns().0;
    let line_length = 1 + 4 * columns_count + 1;
    let mut output = String::with_capacity(line_length * (1 + 2 * grid.rows().0));

    output.push(CORNER);
    for _ in 0..columns_count {
        output.push_str(WALL_LR_3);
        output.push(CORNER);
    }
    output.push('\n');

    for row in grid.iter_row() {

        let mut row_middle_section_render = String::with_capacity(line_length);
        let mut row_bottom_section_render = String::with_capacity(line_length);
        row_middle_section_render.push(WALL_UD);
        row_bottom_section_render.push(CORNER);

        for cell_coord in row {

            match grid_display {
                Some(displayer) => {
                    row_middle_section_render.push_str(&displayer.render_cell_body(cell_coord))
                }
                None => row_middle_section_render.push_str(DEFAULT_CELL_BODY),
            }

            if grid.is_neighbour_linked(cell_coord, CompassPrimary::East) {
                row_middle_section_render.push(OPEN_SIDE);
            } else {
                row_middle_section_render.push(WALL_UD);
            }

            if grid.is_neighbour_linked(cell_coord, CompassPrimary::South) {
                row_bottom_section_render.push_str(OPEN_FLOOR);
            } else {
                row_bottom_section_render.push_str(WALL_LR_3);
            }
            row_bottom_section_render.push(CORNER);
        }

        output.push_str(&row_middle_section_render);
        output.push('\n');
        output.push_str(&row_bottom_section_render);
        output.push('\n');
    }

    output
}

impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, None))
    }
}
