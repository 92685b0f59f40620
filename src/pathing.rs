use std::fmt::{Debug, Display};

use num::traits::{Bounded, CheckedAdd, One, ToPrimitive, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{Grid, IndexType};
use crate::units::{ColumnIndex, RowIndex};
use crate::utils;
use crate::utils::FnvHashMap;


// Generic parameter alias, `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + CheckedAdd + ToPrimitive + Debug + Clone + Copy + Display + Ord
    {
}
impl<T> MaxDistance for T
    where T: Zero + One + Bounded + Unsigned + CheckedAdd + ToPrimitive + Debug + Clone + Copy + Display + Ord
{
}


/// Steps from a start cell to every cell reachable through passages.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT: MaxDistance> Distances<MaxDistanceT> {
    /// Breadth first flood fill from `start_coordinate`.
    ///
    /// Linked neighbours are expanded North, South, East then West. Returns None when the start
    /// is not on the grid, or when a distance does not fit in `MaxDistanceT`.
    pub fn new<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                         start_coordinate: Cartesian2DCoordinate)
                                         -> Option<Distances<MaxDistanceT>> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max: MaxDistanceT = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        // Unweighted links, so the first distance written for a cell is already the shortest
        // and the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for dir in CompassPrimary::ALL.iter() {
                    let linked_neighbour = grid.neighbour_at_direction(*cell_coord, *dir)
                        .filter(|neighbour| grid.is_linked(*cell_coord, *neighbour));

                    if let Some(link_coordinate) = linked_neighbour {
                        if !distances.contains_key(&link_coordinate) {
                            let step = distance_to_cell.checked_add(&One::one())?;
                            distances.insert(link_coordinate, step);
                            new_frontier.push(link_coordinate);
                        }
                    }
                }
            }
            frontier = new_frontier;
        }

        debug!("distances from {:?}: {} cells reached, max {}",
               start_coordinate,
               distances.len(),
               max);

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// None if `coord` cannot be reached from the start.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Every cell at the maximum distance, row-major.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();

        let mut furthest: SmallVec<[Cartesian2DCoordinate; 8]> = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect();
        furthest.sort_by_key(|c| (c.y, c.x));
        furthest
    }

    pub fn furthest_point(&self) -> Cartesian2DCoordinate {
        // The start is always at distance zero so the map is never empty.
        self.furthest_points_on_grid()
            .first()
            .cloned()
            .unwrap_or(self.start_coordinate)
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a linked
/// neighbour one step closer. The returned path runs start to end.
pub fn shortest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>,
                                                  distances_from_start: &Distances<MaxDistanceT>,
                                                  end_point: Cartesian2DCoordinate)
                                                  -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    // Unreachable end point.
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .min_by_key(|&(coord, distance)| (distance, coord.y, coord.x));

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // No progress towards the start, the distances do not belong to this grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Longest path of a perfect maze: the furthest cell from the north west corner is one end, the
/// furthest cell from that end is the other. On a maze with loops this is just a long path.
pub fn dijkstra_longest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>)
                                                          -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    let arbitrary_start_point = Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(0),
                                                                               RowIndex(0));
    let first_distances = Distances::<MaxDistanceT>::new(grid, arbitrary_start_point)?;
    let long_path_start_coordinate = first_distances.furthest_point();

    let distances_from_start = Distances::<MaxDistanceT>::new(grid, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_point();

    shortest_path(grid, &distances_from_start, end_point)
}
