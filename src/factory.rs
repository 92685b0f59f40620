use std::fmt;
use std::str::FromStr;

use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::randomizer::Randomizer;
use crate::utils::{self, FnvHashMap};


#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BinaryTree = 0,
    Sidewinder = 1,
    Dfs = 2,
    /// Never has an implementation, carving with it always fails.
    InvalidAlgo,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::BinaryTree, Algorithm::Sidewinder, Algorithm::Dfs];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BinaryTree => "binary_tree",
            Algorithm::Sidewinder => "sidewinder",
            Algorithm::Dfs => "dfs",
            Algorithm::InvalidAlgo => "invalid_algo",
        }
    }

    /// Numeric id, unknown ids map to `InvalidAlgo`.
    pub fn from_id(id: u32) -> Algorithm {
        match id {
            0 => Algorithm::BinaryTree,
            1 => Algorithm::Sidewinder,
            2 => Algorithm::Dfs,
            _ => Algorithm::InvalidAlgo,
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::BinaryTree
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        Algorithm::ALL
            .iter()
            .cloned()
            .chain(Some(Algorithm::InvalidAlgo))
            .find(|algo| algo.name() == s)
            .ok_or_else(|| ErrorKind::InvalidAlgorithm(s.to_string()).into())
    }
}


/// A maze carving strategy: links the cells of a fresh, unlinked grid.
pub trait MazeAlgorithm {
    fn carve(&self, grid: &mut Grid, rng: &mut Randomizer) -> Result<()>;
}

#[derive(Debug)]
struct BinaryTreeAlgorithm;
impl MazeAlgorithm for BinaryTreeAlgorithm {
    fn carve(&self, grid: &mut Grid, rng: &mut Randomizer) -> Result<()> {
        generators::binary_tree(grid, rng)
    }
}

#[derive(Debug)]
struct SidewinderAlgorithm;
impl MazeAlgorithm for SidewinderAlgorithm {
    fn carve(&self, grid: &mut Grid, rng: &mut Randomizer) -> Result<()> {
        generators::sidewinder(grid, rng)
    }
}

#[derive(Debug)]
struct RecursiveBacktrackerAlgorithm;
impl MazeAlgorithm for RecursiveBacktrackerAlgorithm {
    fn carve(&self, grid: &mut Grid, rng: &mut Randomizer) -> Result<()> {
        generators::recursive_backtracker(grid, rng)
    }
}

type AlgorithmRegistry = FnvHashMap<Algorithm, Box<dyn MazeAlgorithm + Send + Sync>>;

lazy_static! {
    static ref ALGORITHMS: AlgorithmRegistry = {
        let mut registry: AlgorithmRegistry = utils::fnv_hashmap(Algorithm::ALL.len());
        registry.insert(Algorithm::BinaryTree, Box::new(BinaryTreeAlgorithm));
        registry.insert(Algorithm::Sidewinder, Box::new(SidewinderAlgorithm));
        registry.insert(Algorithm::Dfs, Box::new(RecursiveBacktrackerAlgorithm));
        registry
    };
}

pub fn is_registered(algorithm: Algorithm) -> bool {
    ALGORITHMS.contains_key(&algorithm)
}

/// Carve `grid` with the registered implementation of `algorithm`.
/// An empty grid or an unregistered algorithm is an error and leaves the grid untouched.
pub fn gen(algorithm: Algorithm, grid: &mut Grid, rng: &mut Randomizer) -> Result<()> {
    if grid.is_empty() {
        bail!(ErrorKind::EmptyGrid);
    }

    let implementation = ALGORITHMS.get(&algorithm)
        .ok_or_else(|| Error::from(ErrorKind::InvalidAlgorithm(algorithm.to_string())))?;

    debug!("carving {}x{} grid with {}",
           grid.rows().0,
           grid.columns().0,
           algorithm);
    implementation.carve(grid, rng)
        .chain_err(|| format!("{} failed to carve the grid", algorithm))
}

/// `gen` reduced to success or failure, failures are logged.
pub fn gen_maze(algorithm: Algorithm, grid: &mut Grid, rng: &mut Randomizer) -> bool {
    match gen(algorithm, grid, rng) {
        Ok(()) => true,
        Err(e) => {
            warn!("maze generation failed: {}", e);
            false
        }
    }
}
