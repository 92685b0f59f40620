use crate::cells::Cartesian2DCoordinate;

/// RGBA colour packed as `0xRRGGBBAA`.
pub type Colour = u32;

pub const WHITE: Colour = 0xFFFF_FFFF;
pub const BLACK: Colour = 0x0000_00FF;

/// Decorates the cells of a grid when it is turned into text or pixels.
pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }

    /// Fill colour of a cell, None leaves the renderer's default.
    fn background_colour(&self, _: Cartesian2DCoordinate) -> Option<Colour> {
        None
    }
}
