use crate::cells::Cartesian2DCoordinate;
use crate::grid::{Grid, IndexType};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_traits::{Colour, GridDisplay, WHITE};
use crate::pathing::Distances;
use crate::units::{ColumnsCount, EdgesCount, LevelsCount, NodesCount, RowsCount};

pub type SmallRectangularGrid = Grid<u8>;
pub type MediumRectangularGrid = Grid<u16>;
pub type LargeRectangularGrid = Grid<u32>;

/// A grid for `dimensions`, None if the cells, or the passages of a fully linked grid, do not
/// fit the index type.
pub fn rect_grid<GridIndexType: IndexType>(dimensions: RectGridDimensions)
                                           -> Option<Grid<GridIndexType>> {
    let max_index = <GridIndexType as IndexType>::max().index();
    let nodes_fit = dimensions.checked_size().map_or(false, |NodesCount(n)| n <= max_index);
    let edges_fit = dimensions.checked_neighbour_pairs()
        .map_or(false, |EdgesCount(e)| e <= max_index);

    if nodes_fit && edges_fit {
        Some(Grid::new(dimensions))
    } else {
        None
    }
}

pub fn small_rect_grid(rows: RowsCount, columns: ColumnsCount) -> Option<SmallRectangularGrid> {
    rect_grid(RectGridDimensions::new(rows, columns, LevelsCount(1)))
}

pub fn medium_rect_grid(rows: RowsCount, columns: ColumnsCount) -> Option<MediumRectangularGrid> {
    rect_grid(RectGridDimensions::new(rows, columns, LevelsCount(1)))
}

pub fn large_rect_grid(rows: RowsCount, columns: ColumnsCount) -> Option<LargeRectangularGrid> {
    rect_grid(RectGridDimensions::new(rows, columns, LevelsCount(1)))
}


/// A grid that remembers how far every cell is from the north west corner, so it can shade
/// cells by distance and print the distance in each cell.
#[derive(Debug, Clone)]
pub struct ColouredGrid<GridIndexType: IndexType = u32> {
    grid: Grid<GridIndexType>,
    distances: Option<Distances<u32>>,
}

impl<GridIndexType: IndexType> ColouredGrid<GridIndexType> {
    pub fn new(grid: Grid<GridIndexType>) -> ColouredGrid<GridIndexType> {
        ColouredGrid { grid, distances: None }
    }

    #[inline]
    pub fn grid(&self) -> &Grid<GridIndexType> {
        &self.grid
    }

    /// Mutating the passages drops any distances computed so far.
    pub fn grid_mut(&mut self) -> &mut Grid<GridIndexType> {
        self.distances = None;
        &mut self.grid
    }

    /// Flood fill from the root cell `(0, 0)`. No-op on an empty grid.
    pub fn calc_distances(&mut self) {
        self.distances = Distances::new(&self.grid, Cartesian2DCoordinate::new(0, 0));
    }

    #[inline]
    pub fn distances(&self) -> Option<&Distances<u32>> {
        self.distances.as_ref()
    }

    /// Shade of the cell: a green gradient from the root, white if unreached.
    pub fn background_colour_for(&self, coord: Cartesian2DCoordinate) -> Colour {
        self.distances
            .as_ref()
            .and_then(|d| d.background_colour(coord))
            .unwrap_or(WHITE)
    }

    /// Three glyph cell body: the base 36 distance from the root, or blank.
    pub fn contents_of(&self, coord: Cartesian2DCoordinate) -> String {
        match self.distances {
            Some(ref d) => d.render_cell_body(coord),
            None => String::from("   "),
        }
    }
}


/// The grid a maze owns: plain, or coloured by distance.
#[derive(Debug, Clone)]
pub enum GridKind<GridIndexType: IndexType = u32> {
    Plain(Grid<GridIndexType>),
    Coloured(ColouredGrid<GridIndexType>),
}

impl<GridIndexType: IndexType> GridKind<GridIndexType> {
    pub fn new(grid: Grid<GridIndexType>, with_distances: bool) -> GridKind<GridIndexType> {
        if with_distances {
            GridKind::Coloured(ColouredGrid::new(grid))
        } else {
            GridKind::Plain(grid)
        }
    }

    pub fn grid(&self) -> &Grid<GridIndexType> {
        match *self {
            GridKind::Plain(ref g) => g,
            GridKind::Coloured(ref cg) => cg.grid(),
        }
    }

    pub fn grid_mut(&mut self) -> &mut Grid<GridIndexType> {
        match *self {
            GridKind::Plain(ref mut g) => g,
            GridKind::Coloured(ref mut cg) => cg.grid_mut(),
        }
    }

    pub fn is_coloured(&self) -> bool {
        match *self {
            GridKind::Plain(_) => false,
            GridKind::Coloured(_) => true,
        }
    }

    /// Computes distances for a coloured grid, nothing for a plain one.
    pub fn calc_distances(&mut self) {
        if let GridKind::Coloured(ref mut cg) = *self {
            cg.calc_distances();
        }
    }

    pub fn background_colour_for(&self, coord: Cartesian2DCoordinate) -> Colour {
        match *self {
            GridKind::Plain(_) => WHITE,
            GridKind::Coloured(ref cg) => cg.background_colour_for(coord),
        }
    }

    /// Cell decoration used for the text diagram.
    pub fn grid_display(&self) -> Option<&dyn GridDisplay> {
        match *self {
            GridKind::Plain(_) => None,
            GridKind::Coloured(ref cg) => cg.distances().map(|d| d as &dyn GridDisplay),
        }
    }
}

impl<GridIndexType: IndexType> Default for GridKind<GridIndexType> {
    fn default() -> Self {
        GridKind::Plain(Grid::new(RectGridDimensions::default()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators;
    use crate::randomizer::Randomizer;
    use quickcheck::{quickcheck, TestResult};

    #[test]
    fn sized_constructors_respect_index_limits() {
        // 241 neighbour pairs fit a u8 edge index, 264 do not
        assert!(small_rect_grid(RowsCount(11), ColumnsCount(12)).is_some());
        assert!(small_rect_grid(RowsCount(12), ColumnsCount(12)).is_none());
        // 255 cells fit but 478 neighbour pairs do not
        assert!(small_rect_grid(RowsCount(15), ColumnsCount(17)).is_none());
        assert!(small_rect_grid(RowsCount(1), ColumnsCount(255)).is_some());
        assert!(small_rect_grid(RowsCount(1), ColumnsCount(256)).is_none());
        assert!(medium_rect_grid(RowsCount(181), ColumnsCount(181)).is_some());
        assert!(medium_rect_grid(RowsCount(182), ColumnsCount(182)).is_none());
        assert!(large_rect_grid(RowsCount(1000), ColumnsCount(1000)).is_some());
        assert!(large_rect_grid(RowsCount(usize::MAX), ColumnsCount(2)).is_none());
    }

    #[test]
    fn accepted_grids_hold_every_passage() {
        fn p(rows: u8, columns: u8) -> TestResult {
            let (rows, columns) = (rows as usize % 20, columns as usize % 20);
            let mut g = match small_rect_grid(RowsCount(rows), ColumnsCount(columns)) {
                Some(g) => g,
                None => return TestResult::discard(),
            };
            for coord in g.iter() {
                for neighbour in g.east(coord).into_iter().chain(g.south(coord)) {
                    if g.link(coord, neighbour).is_err() {
                        return TestResult::failed();
                    }
                }
            }
            let expected = g.dimensions().checked_neighbour_pairs().map(|EdgesCount(e)| e);
            TestResult::from_bool(Some(g.links_count()) == expected)
        }
        quickcheck(p as fn(u8, u8) -> TestResult);
    }

    #[test]
    fn fully_linked_largest_small_grid() {
        let mut g = small_rect_grid(RowsCount(11), ColumnsCount(12)).unwrap();
        for coord in g.iter() {
            for neighbour in g.east(coord).into_iter().chain(g.south(coord)) {
                g.link(coord, neighbour).expect("link failed");
            }
        }
        assert_eq!(g.links_count(), 241);
    }

    #[test]
    fn plain_grids_are_white() {
        let kind = GridKind::new(small_rect_grid(RowsCount(2), ColumnsCount(2)).unwrap(), false);
        assert!(!kind.is_coloured());
        assert!(kind.grid_display().is_none());
        assert_eq!(kind.background_colour_for(Cartesian2DCoordinate::new(1, 1)), WHITE);
    }

    #[test]
    fn coloured_grid_shades_from_the_root() {
        let mut kind = GridKind::new(small_rect_grid(RowsCount(4), ColumnsCount(4)).unwrap(),
                                     true);
        let mut rng = Randomizer::new(1);
        generators::binary_tree(kind.grid_mut(), &mut rng).unwrap();
        kind.calc_distances();

        assert!(kind.is_coloured());
        assert!(kind.grid_display().is_some());
        assert_eq!(kind.background_colour_for(Cartesian2DCoordinate::new(0, 0)), WHITE);
        let shaded = kind.grid().iter().any(|c| kind.background_colour_for(c) != WHITE);
        assert!(shaded);

        if let GridKind::Coloured(ref cg) = kind {
            assert_eq!(cg.contents_of(Cartesian2DCoordinate::new(0, 0)), " 0 ");
        }
    }

    #[test]
    fn mutating_a_coloured_grid_drops_stale_distances() {
        let mut cg = ColouredGrid::new(small_rect_grid(RowsCount(2), ColumnsCount(2)).unwrap());
        cg.calc_distances();
        assert!(cg.distances().is_some());
        let _ = cg.grid_mut();
        assert!(cg.distances().is_none());
        assert_eq!(cg.contents_of(Cartesian2DCoordinate::new(0, 0)), "   ");
    }

    #[test]
    fn empty_coloured_grid_has_no_distances() {
        let mut cg = ColouredGrid::new(small_rect_grid(RowsCount(0), ColumnsCount(0)).unwrap());
        cg.calc_distances();
        assert!(cg.distances().is_none());
    }
}
