use std::fmt;
use std::slice;

use petgraph::{Graph, Undirected};
use petgraph::graph;
pub use petgraph::graph::IndexType;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateOptionSmallVec,
                   CoordinateSmallVec};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::randomizer::Randomizer;
use crate::units::{ColumnsCount, EdgesCount, LevelsCount, NodesCount, RowsCount};


/// Rectangular grid of cells. Every cell is a node of an undirected graph, indexed row-major,
/// and every passage carved between two neighbouring cells is an edge.
#[derive(Clone)]
pub struct Grid<GridIndexType: IndexType = u32> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    dimensions: RectGridDimensions,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbours,
}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: graph: {:?}, rows: {:?}, columns: {:?}, levels: {:?}",
               self.graph,
               self.rows(),
               self.columns(),
               self.levels())
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    /// A grid with every cell present and no passages.
    ///
    /// The caller is responsible for the cell count fitting `GridIndexType`,
    /// see the sized constructors in `grids`.
    pub fn new(dimensions: RectGridDimensions) -> Grid<GridIndexType> {

        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();

        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges),
            dimensions,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }
        debug!("new grid: {} rows, {} columns, {} cells",
               dimensions.rows().0,
               dimensions.columns().0,
               nodes);

        grid
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn levels(&self) -> LevelsCount {
        self.dimensions.levels()
    }

    /// Uniformly chosen cell, None for an empty grid.
    pub fn random_cell(&self, rng: &mut Randomizer) -> Option<Cartesian2DCoordinate> {
        if self.is_empty() {
            None
        } else {
            let index = rng.get_int(0, self.size() - 1);
            Some(Cartesian2DCoordinate::from_row_major_index(index, self.columns()))
        }
    }

    /// Link two neighbouring cells with a passage.
    /// Linking cells that are already linked keeps the single existing passage.
    pub fn link(&mut self,
                a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }

        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        match (a_index_opt, b_index_opt) {
            (Some(a_index), Some(b_index)) => {
                if !self.is_neighbour(a, b) {
                    return Err(CellLinkError::NotNeighbours);
                }
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Unlink two cells, if the grid coordinates are valid and a link exists between them.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);

        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // Invalidates the last edge index, nothing holds on to edge indices.
                self.graph.remove_edge(edge_index);
                return true;
            }
        }

        false
    }

    /// Cells joined to `coord` by a passage. None if `coord` is not on the grid.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {

        let graph_node_index = self.grid_coordinate_graph_index(coord)?;
        let columns = self.columns();
        let linked_cells = self.graph
            .neighbors(graph_node_index)
            .map(|node_index| Cartesian2DCoordinate::from_row_major_index(node_index.index(), columns))
            .collect();
        Some(linked_cells)
    }

    /// Cells to the North, South, East or West of `coord`, linked or not.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction)
            .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    #[inline]
    pub fn north(&self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        self.neighbour_at_direction(coord, CompassPrimary::North)
    }

    #[inline]
    pub fn south(&self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        self.neighbour_at_direction(coord, CompassPrimary::South)
    }

    #[inline]
    pub fn east(&self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        self.neighbour_at_direction(coord, CompassPrimary::East)
    }

    #[inline]
    pub fn west(&self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        self.neighbour_at_direction(coord, CompassPrimary::West)
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self,
                               coord: Cartesian2DCoordinate,
                               direction: CompassPrimary)
                               -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Appends every cell coordinate, row by row.
    pub fn populate_vec(&self, cells: &mut Vec<Cartesian2DCoordinate>) {
        cells.reserve(self.size());
        cells.extend(self.iter());
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let ColumnsCount(width) = self.columns();
            Some((coord.y as usize * width) + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(&self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(&self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(&self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            columns: self.columns(),
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows(), self.columns());
        (coord.x as usize) < columns && (coord.y as usize) < rows
    }

    fn is_neighbour(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        self.neighbours(a).iter().any(|&coord| coord == b)
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: Cartesian2DCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        let grid_index_raw_opt = self.grid_coordinate_to_index(coord);
        grid_index_raw_opt.map(graph::NodeIndex::<GridIndexType>::new)
    }
}

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    columns: ColumnsCount,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let columns = self.columns;
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.source().index(),
                                                                             columns);
            let dst_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.target().index(),
                                                                             columns);
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {} // default impl using size_hint()

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}
