use std::cell::OnceCell;
use std::path::Path;

use crate::codecs::{Base64Codec, JsonCodec, SerdeJsonCodec, TextCodec};
use crate::errors::*;
use crate::factory::{self, Algorithm};
use crate::geometry::{Block, Face, Geometry, Vertex};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_displays::{render_text, PathDisplay};
use crate::grid_traits::GridDisplay;
use crate::grids::{self, GridKind};
use crate::pathing;
use crate::randomizer::Randomizer;
use crate::renderers;
use crate::units::{ColumnsCount, LevelsCount, RowsCount};


/// Everything `Maze::init` needs to rebuild a maze. Missing fields deserialize to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub rows: usize,
    pub columns: usize,
    pub height: usize,
    pub seed: u64,
    pub algorithm: Algorithm,
    pub distances: bool,
    pub block_id: i32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            rows: 10,
            columns: 10,
            height: 1,
            seed: 0,
            algorithm: Algorithm::BinaryTree,
            distances: false,
            block_id: 1,
        }
    }
}

impl MazeConfig {
    /// No cells at all, what a default `Maze` holds.
    pub fn empty() -> MazeConfig {
        MazeConfig::default().rows(0).columns(0).height(0)
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn distances(mut self, distances: bool) -> Self {
        self.distances = distances;
        self
    }

    pub fn block_id(mut self, block_id: i32) -> Self {
        self.block_id = block_id;
        self
    }

    pub fn dimensions(&self) -> RectGridDimensions {
        RectGridDimensions::new(RowsCount(self.rows),
                                ColumnsCount(self.columns),
                                LevelsCount(self.height))
    }
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MazeState {
    Unconstructed,
    Constructed,
}

/// The JSON document describing one maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeJson {
    pub str64: String,
    pub obj64: String,
    pub num_cols: usize,
    pub num_rows: usize,
    pub height: usize,
    pub algo: Algorithm,
    pub seed: u64,
    pub v: String,
}


/// A seeded maze and all of its exports.
///
/// Built by `init`; afterwards the passages never change and every export is derived from the
/// same grid.
#[derive(Debug)]
pub struct Maze {
    config: MazeConfig,
    grid: GridKind,
    state: MazeState,
    generated: bool,
    geometry: OnceCell<Geometry>,
}

impl Default for Maze {
    fn default() -> Self {
        Maze::new(MazeConfig::empty())
    }
}

impl Maze {
    /// An unconstructed maze, `init` builds it from `config`.
    pub fn new(config: MazeConfig) -> Maze {
        Maze {
            config,
            grid: GridKind::default(),
            state: MazeState::Unconstructed,
            generated: false,
            geometry: OnceCell::new(),
        }
    }

    /// Builds the grid, carves it with the configured algorithm and seed, then computes distances
    /// when they were asked for.
    ///
    /// The maze is Constructed afterwards whatever the outcome. A failure is logged, returned
    /// and remembered by `is_generated`; the exports of a failed maze show the uncarved grid.
    pub fn init(&mut self) -> Result<()> {
        self.geometry = OnceCell::new();
        let result = self.build();

        self.state = MazeState::Constructed;
        self.generated = result.is_ok();
        match result {
            Ok(()) => {
                debug!("maze {}x{} seed {} built with {}",
                       self.config.rows,
                       self.config.columns,
                       self.config.seed,
                       self.config.algorithm)
            }
            Err(ref e) => warn!("maze generation failed: {}", e),
        }
        result
    }

    fn build(&mut self) -> Result<()> {
        let dimensions = self.config.dimensions();
        let grid = match grids::rect_grid(dimensions) {
            Some(grid) => grid,
            None => {
                self.grid = GridKind::default();
                bail!(ErrorKind::GridTooLarge(self.config.rows, self.config.columns));
            }
        };
        self.grid = GridKind::new(grid, self.config.distances);

        let mut rng = Randomizer::new(self.config.seed);
        factory::gen(self.config.algorithm, self.grid.grid_mut(), &mut rng)?;

        self.grid.calc_distances();
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> MazeState {
        self.state
    }

    /// Did the last `init` carve the maze successfully.
    #[inline]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    #[inline]
    pub fn grid(&self) -> &GridKind {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.grid().rows().0
    }

    pub fn columns(&self) -> usize {
        self.grid.grid().columns().0
    }

    pub fn height(&self) -> usize {
        self.grid.grid().levels().0
    }

    /// ASCII wall diagram, cells show their base 36 distance on a coloured maze.
    pub fn to_str(&self) -> String {
        render_text(self.grid.grid(), self.grid.grid_display())
    }

    pub fn to_str64(&self) -> String {
        self.to_str64_with(&Base64Codec)
    }

    pub fn to_str64_with<T: TextCodec>(&self, codec: &T) -> String {
        codec.encode(self.to_str().as_bytes())
    }

    /// Text diagram with the longest path through the maze marked by dots.
    pub fn to_path_str(&self) -> String {
        let grid = self.grid.grid();
        match pathing::dijkstra_longest_path::<_, u32>(grid) {
            Some(path) => render_text(grid, Some(&PathDisplay::new(&path) as &dyn GridDisplay)),
            None => render_text(grid, None),
        }
    }

    fn geometry(&self) -> &Geometry {
        self.geometry.get_or_init(|| {
            Geometry::from_text(&self.to_str(), self.grid.grid().levels(), self.config.block_id)
        })
    }

    /// Wavefront OBJ of the block mesh, empty when there is nothing to draw.
    pub fn to_wavefront_obj_str(&self) -> String {
        let geometry = self.geometry();
        if geometry.is_empty() {
            String::new()
        } else {
            geometry.to_wavefront_obj_str()
        }
    }

    pub fn to_wavefront_obj_str64(&self) -> String {
        self.to_wavefront_obj_str64_with(&Base64Codec)
    }

    pub fn to_wavefront_obj_str64_with<T: TextCodec>(&self, codec: &T) -> String {
        codec.encode(self.to_wavefront_obj_str().as_bytes())
    }

    /// `(x, y, z, w)` of the block at text row `p` and column `q`.
    pub fn find_block(&self, p: i32, q: i32) -> Option<Block> {
        self.geometry().find_block(p, q)
    }

    pub fn render_vertices(&self) -> Vec<Vertex> {
        self.geometry().render_vertices()
    }

    pub fn writable_vertices(&self) -> &[Vertex] {
        self.geometry().writable_vertices()
    }

    pub fn faces(&self) -> &[Face] {
        self.geometry().faces()
    }

    /// RGBA8 raster, `4 * cell_size² * rows * columns` bytes.
    pub fn to_pixels(&self, cell_size: u32) -> Vec<u8> {
        renderers::to_pixels(&self.grid, cell_size)
    }

    pub fn pixel_dimensions(&self, cell_size: u32) -> (u32, u32) {
        renderers::pixel_dimensions(&self.grid, cell_size)
    }

    pub fn save_png<P: AsRef<Path>>(&self, cell_size: u32, path: P) -> Result<()> {
        let (width, height) = self.pixel_dimensions(cell_size);
        renderers::save_png(self.to_pixels(cell_size), width, height, path)
    }

    pub fn to_json(&self) -> MazeJson {
        self.to_json_with(&Base64Codec)
    }

    pub fn to_json_with<T: TextCodec>(&self, codec: &T) -> MazeJson {
        MazeJson {
            str64: self.to_str64_with(codec),
            obj64: self.to_wavefront_obj_str64_with(codec),
            num_cols: self.columns(),
            num_rows: self.rows(),
            height: self.height(),
            algo: self.config.algorithm,
            seed: self.config.seed,
            v: String::from(env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn to_json_str(&self, pretty_spaces: usize) -> Result<String> {
        self.to_json_str_with(&Base64Codec, &SerdeJsonCodec, pretty_spaces)
    }

    pub fn to_json_str_with<T, J>(&self, text_codec: &T, json_codec: &J, pretty_spaces: usize)
                                  -> Result<String>
        where T: TextCodec,
              J: JsonCodec
    {
        json_codec.dump(&self.to_json_with(text_codec), pretty_spaces)
    }
}

/// One JSON array holding the document of every maze, in order.
pub fn to_json_array_str(mazes: &[Maze], pretty_spaces: usize) -> Result<String> {
    let documents: Vec<MazeJson> = mazes.iter().map(Maze::to_json).collect();
    SerdeJsonCodec.dump(&documents, pretty_spaces)
}

/// Parse a JSON array of configurations, as used for batches.
pub fn parse_configs(input: &str) -> Result<Vec<MazeConfig>> {
    SerdeJsonCodec.parse(input)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
    use crate::pathing::Distances;
    use quickcheck::{quickcheck, TestResult};
    use serde_json::Value;

    fn built(config: MazeConfig) -> Maze {
        let mut maze = Maze::new(config);
        maze.init().expect("maze generation failed");
        maze
    }

    fn small_config(rows: u8, columns: u8, seed: u64, algo: u8) -> MazeConfig {
        MazeConfig::default()
            .rows(rows as usize % 9 + 1)
            .columns(columns as usize % 9 + 1)
            .seed(seed)
            .algorithm(Algorithm::from_id(algo as u32 % 3))
    }

    #[test]
    fn default_maze_is_empty_and_unconstructed() {
        let maze = Maze::default();
        assert_eq!(maze.state(), MazeState::Unconstructed);
        assert!(!maze.is_generated());
        assert_eq!((maze.rows(), maze.columns(), maze.height()), (0, 0, 0));
        assert_eq!(maze.to_str(), "");
        assert_eq!(maze.to_str64(), "");
        assert_eq!(maze.to_wavefront_obj_str(), "");
        assert_eq!(maze.to_path_str(), "");
        assert!(maze.to_pixels(8).is_empty());
        assert!(maze.render_vertices().is_empty());
        assert_eq!(maze.find_block(0, 0), None);

        let json: Value = serde_json::from_str(&maze.to_json_str(0).unwrap()).unwrap();
        assert_eq!(json["num_rows"], 0);
    }

    #[test]
    fn config_defaults_and_setters() {
        let config = MazeConfig::default();
        assert_eq!((config.rows, config.columns, config.height), (10, 10, 1));
        assert_eq!(config.algorithm, Algorithm::BinaryTree);
        assert_eq!(config.block_id, 1);
        assert!(!config.distances);

        let config = config.rows(3).columns(4).height(2).seed(5).distances(true).block_id(9)
            .algorithm(Algorithm::Dfs);
        assert_eq!(config,
                   MazeConfig {
                       rows: 3,
                       columns: 4,
                       height: 2,
                       seed: 5,
                       algorithm: Algorithm::Dfs,
                       distances: true,
                       block_id: 9,
                   });
    }

    #[test]
    fn batch_configs_fill_in_defaults() {
        let configs = parse_configs(r#"[{"rows": 3, "algorithm": "sidewinder"}, {}]"#).unwrap();
        assert_eq!(configs[0], MazeConfig::default().rows(3).algorithm(Algorithm::Sidewinder));
        assert_eq!(configs[1], MazeConfig::default());
        assert!(parse_configs(r#"[{"algorithm": "prims"}]"#).is_err());
    }

    #[test]
    fn minimal_binary_tree_maze() {
        let maze = built(MazeConfig::default().rows(2).columns(2).seed(42));
        assert_eq!(maze.state(), MazeState::Constructed);
        assert!(maze.is_generated());

        let grid = maze.grid().grid();
        let linked_cells = grid.iter()
            .filter(|c| !grid.links(*c).unwrap().is_empty())
            .count();
        assert!(linked_cells >= 3);

        let distances = Distances::<u32>::new(grid, Cartesian2DCoordinate::new(0, 0)).unwrap();
        assert_eq!(distances.reachable_count(), 4);

        let text = maze.to_str();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().all(|line| line.len() == 9));
    }

    #[test]
    fn distance_gradient_json() {
        let maze = built(MazeConfig::default().rows(5).columns(5).seed(7).distances(true));
        let json: Value = serde_json::from_str(&maze.to_json_str(2).unwrap()).unwrap();

        for key in &["str64", "obj64", "num_cols", "num_rows", "height", "algo", "seed", "v"] {
            assert!(json.get(*key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["num_rows"], 5);
        assert_eq!(json["num_cols"], 5);
        assert_eq!(json["algo"], "binary_tree");
        assert_eq!(json["seed"], 7);

        let str64 = json["str64"].as_str().unwrap();
        assert_eq!(Base64Codec.decode_string(str64).unwrap(), maze.to_str());
        // the root cell shows distance zero
        assert_eq!(&maze.to_str().lines().nth(1).unwrap()[1..4], " 0 ");
    }

    #[test]
    fn json_keys_are_in_document_order() {
        let maze = built(MazeConfig::default().rows(1).columns(1));
        let compact = maze.to_json_str(0).unwrap();
        let positions: Vec<usize> = ["\"str64\"", "\"obj64\"", "\"num_cols\"", "\"num_rows\"",
                                     "\"height\"", "\"algo\"", "\"seed\"", "\"v\""]
            .iter()
            .map(|key| compact.find(key).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn json_array_of_mazes() {
        let mazes = vec![built(MazeConfig::default().rows(2).columns(3)),
                         built(MazeConfig::default().algorithm(Algorithm::Dfs))];
        let json: Value = serde_json::from_str(&to_json_array_str(&mazes, 4).unwrap()).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["num_cols"], 3);
        assert_eq!(array[1]["algo"], "dfs");
    }

    #[test]
    fn failed_generation_is_reported() {
        let mut maze = Maze::new(MazeConfig::default().rows(3).columns(3)
            .algorithm(Algorithm::InvalidAlgo));
        assert!(maze.init().is_err());
        assert_eq!(maze.state(), MazeState::Constructed);
        assert!(!maze.is_generated());
        // exports still work, on the uncarved grid
        assert_eq!(maze.grid().grid().links_count(), 0);
        assert_eq!(maze.to_str().lines().count(), 7);

        let mut empty = Maze::new(MazeConfig::empty());
        match empty.init() {
            Err(Error(ErrorKind::EmptyGrid, _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(empty.to_str(), "");
    }

    #[test]
    fn too_many_cells_is_an_error() {
        let mut maze = Maze::new(MazeConfig::default().rows(1 << 17).columns(1 << 16));
        match maze.init() {
            Err(Error(ErrorKind::GridTooLarge(..), _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(maze.state(), MazeState::Constructed);
        assert_eq!(maze.rows(), 0);
    }

    #[test]
    fn overflowing_cell_count_is_too_large() {
        let mut maze = Maze::new(MazeConfig::default().rows(1 << 32).columns(1 << 32));
        match maze.init() {
            Err(Error(ErrorKind::GridTooLarge(rows, columns), _)) => {
                assert_eq!((rows, columns), (1 << 32, 1 << 32));
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(!maze.is_generated());
        assert_eq!((maze.rows(), maze.columns()), (0, 0));
        assert_eq!(maze.to_str(), "");
    }

    #[test]
    fn batch_config_with_huge_dimensions_fails_cleanly() {
        let configs = parse_configs(r#"[{"rows": 4294967296, "columns": 4294967296}]"#).unwrap();
        let mut maze = Maze::new(configs[0].clone());
        assert!(maze.init().is_err());
        assert_eq!(maze.state(), MazeState::Constructed);
    }

    #[test]
    fn wavefront_obj_matches_geometry() {
        let maze = built(MazeConfig::default().rows(3).columns(4).height(2).block_id(5));
        let obj = maze.to_wavefront_obj_str();
        let vertex_lines = obj.lines().filter(|l| l.starts_with("v ")).count();
        let face_lines = obj.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(vertex_lines, maze.writable_vertices().len());
        assert_eq!(face_lines, maze.faces().len());
        assert_eq!(maze.render_vertices().len() * 8, vertex_lines);

        assert_eq!(maze.find_block(0, 0), Some((0, 1, 0, 5)));
        // a cell body is never a wall
        assert_eq!(maze.find_block(1, 2), None);
        assert_eq!(Base64Codec.decode_string(&maze.to_wavefront_obj_str64()).unwrap(), obj);
    }

    #[test]
    fn longest_path_is_marked() {
        let maze = built(MazeConfig::default().rows(6).columns(6).algorithm(Algorithm::Dfs));
        let path_text = maze.to_path_str();
        assert!(path_text.contains(" . "));
        let plain = maze.to_str();
        assert_eq!(path_text.replace(" . ", "   "), plain);
    }

    #[test]
    fn init_twice_is_identical() {
        let mut maze = Maze::new(MazeConfig::default().rows(7).columns(5).seed(3)
            .algorithm(Algorithm::Sidewinder));
        maze.init().unwrap();
        let first = (maze.to_str(), maze.to_wavefront_obj_str());
        maze.init().unwrap();
        assert_eq!(first, (maze.to_str(), maze.to_wavefront_obj_str()));
    }

    #[test]
    fn determinism() {
        fn p(rows: u8, columns: u8, seed: u64, algo: u8) -> TestResult {
            let a = built(small_config(rows, columns, seed, algo));
            let b = built(small_config(rows, columns, seed, algo));
            TestResult::from_bool(a.to_str() == b.to_str())
        }
        quickcheck(p as fn(u8, u8, u64, u8) -> TestResult);
    }

    #[test]
    fn topology_is_independent_of_carving() {
        fn p(rows: u8, columns: u8, seed: u64, algo: u8) -> TestResult {
            let config = small_config(rows, columns, seed, algo);
            let maze = built(config.clone());
            let grid = maze.grid().grid();
            let ok = grid.iter().all(|c| {
                let (x, y) = (c.x as usize, c.y as usize);
                (grid.north(c).is_some() == (y > 0)) &&
                (grid.west(c).is_some() == (x > 0)) &&
                (grid.south(c).is_some() == (y + 1 < config.rows)) &&
                (grid.east(c).is_some() == (x + 1 < config.columns)) &&
                CompassPrimary::ALL.iter().all(|dir| {
                    grid.neighbour_at_direction(c, *dir).map_or(true, |n| {
                        grid.is_linked(c, n) == grid.is_linked(n, c)
                    })
                })
            });
            TestResult::from_bool(ok)
        }
        quickcheck(p as fn(u8, u8, u64, u8) -> TestResult);
    }

    #[test]
    fn pixel_buffer_size() {
        fn p(rows: u8, columns: u8, seed: u64, cell_size: u8) -> TestResult {
            let config = small_config(rows, columns, seed, 0);
            let maze = built(config.clone());
            let cell_size = cell_size as u32 % 16;
            let expected = 4 * (cell_size * cell_size) as usize * config.rows * config.columns;
            TestResult::from_bool(maze.to_pixels(cell_size).len() == expected)
        }
        quickcheck(p as fn(u8, u8, u64, u8) -> TestResult);
    }

    #[test]
    fn walls_in_pixels_follow_links() {
        fn p(rows: u8, columns: u8, seed: u64, algo: u8) -> TestResult {
            let cell_size = 6u32;
            let maze = built(small_config(rows, columns, seed, algo));
            let pixels = maze.to_pixels(cell_size);
            let (width, _) = maze.pixel_dimensions(cell_size);
            let is_black = |x: u32, y: u32| {
                let i = (y as usize * width as usize + x as usize) * 4;
                pixels[i..i + 4] == [0, 0, 0, 0xFF]
            };

            let grid = maze.grid().grid();
            let ok = grid.iter().all(|c| {
                let east_ok = grid.east(c).map_or(true, |e| {
                    let wall_x = (c.x + 1) * cell_size;
                    let mid_y = c.y * cell_size + cell_size / 2;
                    is_black(wall_x, mid_y) != grid.is_linked(c, e)
                });
                let south_ok = grid.south(c).map_or(true, |s| {
                    let wall_y = (c.y + 1) * cell_size;
                    let mid_x = c.x * cell_size + cell_size / 2;
                    is_black(mid_x, wall_y) != grid.is_linked(c, s)
                });
                east_ok && south_ok
            });
            TestResult::from_bool(ok)
        }
        quickcheck(p as fn(u8, u8, u64, u8) -> TestResult);
    }

    #[test]
    fn str64_round_trip() {
        fn p(rows: u8, columns: u8, seed: u64, algo: u8) -> TestResult {
            let maze = built(small_config(rows, columns, seed, algo).distances(seed % 2 == 0));
            let decoded = Base64Codec.decode_string(&maze.to_str64());
            TestResult::from_bool(decoded.ok() == Some(maze.to_str()))
        }
        quickcheck(p as fn(u8, u8, u64, u8) -> TestResult);
    }
}
