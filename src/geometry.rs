use std::fmt;

use crate::units::LevelsCount;
use crate::utils::{self, FnvHashMap};

/// `(x, y, z, w)`, a position plus the block type `w`.
pub type Vertex = (i32, i32, i32, i32);
/// A unit cube keyed by its origin vertex.
pub type Block = (i32, i32, i32, i32);
/// Triangle of 1-based vertex indices, as Wavefront OBJ counts them.
pub type Face = [u32; 3];

const CUBE_CORNERS: [(i32, i32, i32); 8] = [(0, 0, 0),
                                            (1, 0, 0),
                                            (1, 1, 0),
                                            (0, 1, 0),
                                            (0, 0, 1),
                                            (1, 0, 1),
                                            (1, 1, 1),
                                            (0, 1, 1)];

// Two triangles per side: front, back, left, right, top, bottom.
const CUBE_TRIANGLES: [[u32; 3]; 12] = [[0, 1, 2],
                                        [0, 2, 3],
                                        [4, 6, 5],
                                        [4, 7, 6],
                                        [0, 3, 7],
                                        [0, 7, 4],
                                        [1, 5, 6],
                                        [1, 6, 2],
                                        [3, 2, 6],
                                        [3, 6, 7],
                                        [0, 4, 5],
                                        [0, 5, 1]];

const VERTICES_PER_BLOCK: usize = 8;

fn is_wall_glyph(c: char) -> bool {
    c == '+' || c == '-' || c == '|'
}

/// Block mesh extruded from the text diagram of a maze.
///
/// The glyph at text row `x` and text column `z` becomes a stack of cubes at `(x, h, z)` for
/// every level `h`, so corridors are the gaps between walls.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    blocks: FnvHashMap<(i32, i32), Block>,
}

impl Geometry {
    pub fn from_text(text: &str, levels: LevelsCount, block_id: i32) -> Geometry {
        let LevelsCount(height) = levels;
        let glyphs = text.chars().filter(|c| is_wall_glyph(*c)).count();
        let mut geometry = Geometry {
            vertices: Vec::with_capacity(glyphs * height * VERTICES_PER_BLOCK),
            faces: Vec::with_capacity(glyphs * height * CUBE_TRIANGLES.len()),
            blocks: utils::fnv_hashmap(glyphs),
        };

        for (row_x, line) in text.lines().enumerate() {
            for (col_z, glyph) in line.chars().enumerate() {
                if is_wall_glyph(glyph) {
                    for h in 0..height {
                        geometry.add_block(row_x as i32, h as i32, col_z as i32, block_id);
                    }
                }
            }
        }

        debug!("geometry: {} blocks, {} vertices, {} faces",
               geometry.blocks.len(),
               geometry.vertices.len(),
               geometry.faces.len());
        geometry
    }

    /// Adds the 8 corners and 12 triangles of the unit cube at `(x, y, z)`.
    /// The `(x, z)` lookup keeps the most recently placed block.
    pub fn add_block(&mut self, x: i32, y: i32, z: i32, w: i32) {
        let base_index = self.vertices.len() as u32 + 1;

        self.vertices.extend(CUBE_CORNERS.iter().map(|&(dx, dy, dz)| (x + dx, y + dy, z + dz, w)));
        self.faces.extend(CUBE_TRIANGLES.iter().map(|triangle| {
            [base_index + triangle[0], base_index + triangle[1], base_index + triangle[2]]
        }));
        self.blocks.insert((x, z), (x, y, z, w));
    }

    /// The block placed at text row `p` and text column `q`, None for a corridor.
    #[inline]
    pub fn find_block(&self, p: i32, q: i32) -> Option<Block> {
        self.blocks.get(&(p, q)).cloned()
    }

    #[inline]
    pub fn writable_vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The origin corner of every block.
    pub fn render_vertices(&self) -> Vec<Vertex> {
        self.vertices.iter().step_by(VERTICES_PER_BLOCK).cloned().collect()
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn wavefront_obj(&self) -> WavefrontObj {
        WavefrontObj { geometry: self }
    }

    pub fn to_wavefront_obj_str(&self) -> String {
        self.wavefront_obj().to_string()
    }
}

/// Displays a geometry as a Wavefront OBJ document.
#[derive(Debug)]
pub struct WavefrontObj<'a> {
    geometry: &'a Geometry,
}

impl<'a> fmt::Display for WavefrontObj<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "# mazebuilder {}", env!("CARGO_PKG_VERSION"))?;
        for &(x, y, z, _) in self.geometry.writable_vertices() {
            writeln!(f, "v {} {} {}", x, y, z)?;
        }
        for face in self.geometry.faces() {
            writeln!(f, "f {} {} {}", face[0], face[1], face[2])?;
        }
        Ok(())
    }
}
