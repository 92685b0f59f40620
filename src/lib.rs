//! **mazebuilder** generates seeded mazes on rectangular grids and exports them as text, base64,
//! Wavefront OBJ, RGBA pixels and JSON.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod cells;
pub mod codecs;
pub mod errors;
pub mod factory;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod grids;
pub mod maze;
pub mod pathing;
pub mod randomizer;
pub mod renderers;
pub mod units;
mod utils;

pub use crate::factory::Algorithm;
pub use crate::maze::{Maze, MazeConfig, MazeState};
