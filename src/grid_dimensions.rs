use crate::units::{ColumnsCount, EdgesCount, LevelsCount, NodesCount, RowsCount};


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
    levels: LevelsCount,
}

impl RectGridDimensions {
    pub fn new(rows: RowsCount, columns: ColumnsCount, levels: LevelsCount) -> RectGridDimensions {
        RectGridDimensions {
            rows,
            columns,
            levels,
        }
    }

    /// The number of cells on one level. Levels share the same topology.
    /// Saturates at `usize::MAX`, see `checked_size`.
    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0.saturating_mul(self.columns.0))
    }

    /// The number of cells on one level, None if it does not fit a usize.
    pub fn checked_size(&self) -> Option<NodesCount> {
        self.rows.0.checked_mul(self.columns.0).map(NodesCount)
    }

    /// Passages of a level where every pair of neighbouring cells is linked.
    pub fn checked_neighbour_pairs(&self) -> Option<EdgesCount> {
        let (rows, columns) = (self.rows.0, self.columns.0);
        let east_west = rows.checked_mul(columns.saturating_sub(1))?;
        let north_south = columns.checked_mul(rows.saturating_sub(1))?;
        east_west.checked_add(north_south).map(EdgesCount)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline(always)]
    pub fn levels(&self) -> LevelsCount {
        self.levels
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.size().0 == 0
    }

    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let edges_count_hint = self.checked_neighbour_pairs().map_or(0, |EdgesCount(e)| e);
        (self.size(), EdgesCount(edges_count_hint))
    }
}

impl Default for RectGridDimensions {
    fn default() -> Self {
        RectGridDimensions::new(RowsCount(0), ColumnsCount(0), LevelsCount(0))
    }
}
