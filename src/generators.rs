use bit_set::BitSet;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::{CellLinkError, Grid, IndexType};
use crate::randomizer::Randomizer;


/// Apply the binary tree maze generation algorithm to a grid.
/// Every cell carves a passage either north or east, picked at random among the neighbours that
/// exist. The north east corner has neither, so it carves nothing; the northern row and the
/// eastern column end up as two long corridors.
pub fn binary_tree<GridIndexType>(grid: &mut Grid<GridIndexType>,
                                  rng: &mut Randomizer)
                                  -> Result<()>
    where GridIndexType: IndexType
{
    let neighbours_to_check = [CompassPrimary::North, CompassPrimary::East];

    for cell_coord in grid.iter() {

        let neighbours = grid.neighbours_at_directions(cell_coord, &neighbours_to_check)
            .into_iter()
            .flatten()
            .collect::<SmallVec<[Cartesian2DCoordinate; 2]>>();

        if !neighbours.is_empty() {
            let link_coord = neighbours[rng.get_int(0, neighbours.len() - 1)];
            grid.link(cell_coord, link_coord)?;
        }
    }

    Ok(())
}

/// Apply the sidewinder maze generation algorithm to the grid.
/// Rows are visited west to east. A run of cells is carved eastwards until it is closed out,
/// always at the eastern boundary and otherwise on a coin flip, then one random member of the
/// run carves north. The northern row can never close out north so it is a single corridor.
pub fn sidewinder<GridIndexType>(grid: &mut Grid<GridIndexType>,
                                 rng: &mut Randomizer)
                                 -> Result<()>
    where GridIndexType: IndexType
{
    let next_in_run_direction = CompassPrimary::East;
    let run_close_out_direction = CompassPrimary::North;

    for coordinates_line in grid.iter_row() {
        let mut run: SmallVec<[Cartesian2DCoordinate; 16]> = SmallVec::new();

        for coord in coordinates_line {
            run.push(coord);

            let next_in_run_cell = grid.neighbour_at_direction(coord, next_in_run_direction);
            let at_close_out_direction_boundary =
                grid.neighbour_at_direction(coord, run_close_out_direction).is_none();

            let should_close_out = match next_in_run_cell {
                None => true,
                Some(_) => !at_close_out_direction_boundary && rng.coin_flip(),
            };

            if should_close_out {
                let run_member = run[rng.get_int(0, run.len() - 1)];
                if let Some(close_out_coord) =
                    grid.neighbour_at_direction(run_member, run_close_out_direction) {
                    grid.link(run_member, close_out_coord)?;
                }
                run.clear();
            } else if let Some(next_cell) = next_in_run_cell {
                grid.link(coord, next_cell)?;
            }
        }
    }

    Ok(())
}

/// Depth first search, the recursive backtracker, with an explicit stack.
/// Walks from the north west corner into random unvisited neighbours, backing up when boxed in.
/// Every cell is visited once, so the result is a perfect maze with long winding corridors.
pub fn recursive_backtracker<GridIndexType>(grid: &mut Grid<GridIndexType>,
                                            rng: &mut Randomizer)
                                            -> Result<()>
    where GridIndexType: IndexType
{
    if grid.is_empty() {
        return Ok(());
    }

    let start = Cartesian2DCoordinate::new(0, 0);
    let mut visited = BitSet::with_capacity(grid.size());
    let start_index = grid.grid_coordinate_to_index(start)
        .ok_or(CellLinkError::InvalidGridCoordinate)?;
    visited.insert(start_index);

    let mut stack = vec![start];

    while let Some(&current) = stack.last() {

        let unvisited_neighbours = grid.neighbours(current)
            .into_iter()
            .filter(|coord| {
                grid.grid_coordinate_to_index(*coord).map_or(false, |i| !visited.contains(i))
            })
            .collect::<SmallVec<[Cartesian2DCoordinate; 4]>>();

        if unvisited_neighbours.is_empty() {
            stack.pop();
        } else {
            let next = unvisited_neighbours[rng.get_int(0, unvisited_neighbours.len() - 1)];
            grid.link(current, next)?;
            let next_index = grid.grid_coordinate_to_index(next)
                .ok_or(CellLinkError::InvalidGridCoordinate)?;
            visited.insert(next_index);
            stack.push(next);
        }
    }

    Ok(())
}
