use std::convert::From;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;

/// A cell position on the grid: `x` is the column, `y` is the row.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// All directions, in the order neighbours are visited when flood filling.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> Cartesian2DCoordinate {
        let ColumnsCount(width) = columns;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    #[inline]
    pub fn row(&self) -> RowIndex {
        RowIndex(self.y as usize)
    }

    #[inline]
    pub fn column(&self) -> ColumnIndex {
        ColumnIndex(self.x as usize)
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable; it may still lie outside a grid.
    pub fn offset(&self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|north_y| Cartesian2DCoordinate::new(x, north_y)),
            CompassPrimary::South => y.checked_add(1).map(|south_y| Cartesian2DCoordinate::new(x, south_y)),
            CompassPrimary::East => x.checked_add(1).map(|east_x| Cartesian2DCoordinate::new(east_x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|west_x| Cartesian2DCoordinate::new(west_x, y)),
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::u32;

    #[test]
    fn offsets() {
        let c = Cartesian2DCoordinate::new(1, 1);
        assert_eq!(c.offset(CompassPrimary::North), Some(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(c.offset(CompassPrimary::South), Some(Cartesian2DCoordinate::new(1, 2)));
        assert_eq!(c.offset(CompassPrimary::East), Some(Cartesian2DCoordinate::new(2, 1)));
        assert_eq!(c.offset(CompassPrimary::West), Some(Cartesian2DCoordinate::new(0, 1)));
    }

    #[test]
    fn offsets_at_representable_limits() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);

        let far = Cartesian2DCoordinate::new(u32::MAX, u32::MAX);
        assert_eq!(far.offset(CompassPrimary::South), None);
        assert_eq!(far.offset(CompassPrimary::East), None);
    }

    #[test]
    fn row_major_index_conversion() {
        let columns = ColumnsCount(3);
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(0, columns),
                   Cartesian2DCoordinate::new(0, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(2, columns),
                   Cartesian2DCoordinate::new(2, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(4, columns),
                   Cartesian2DCoordinate::new(1, 1));
    }

    #[test]
    fn opposite_directions() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(*dir, dir.opposite());
            assert_eq!(*dir, dir.opposite().opposite());
        }
    }
}
