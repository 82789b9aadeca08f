// Square toroidal grid of letter codes with 8-neighbour wraparound adjacency

use std::hash::{Hash, Hasher};

use chakra_core::LetterClass;
use serde::{Deserialize, Serialize};

/// Index of a vertex in row-major order.
pub type VertexId = usize;

/// Errors for malformed grid input. These are fatal for the run that
/// supplied the input.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid input is empty")]
    Empty,

    #[error("grid has {count} cells, which is not a perfect square")]
    NotPerfectSquare { count: usize },

    #[error("grid is not square: {rows} rows but row {row} has {cols} columns")]
    NotSquare { rows: usize, row: usize, cols: usize },

    #[error("token {position} is not a positive integer: {token:?}")]
    InvalidToken { position: usize, token: String },

    #[error("cell {position} has value 0; letter codes are 1-based")]
    ZeroValue { position: usize },
}

// ---------------------------------------------------------------------------
// Vertex
// ---------------------------------------------------------------------------

/// A grid cell. Identity is the coordinate pair; `value` is payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub row: usize,
    pub col: usize,
    /// 1-based letter code.
    pub value: u32,
}

impl Vertex {
    pub fn class(&self) -> LetterClass {
        LetterClass::of(self.value)
    }

    pub fn is_vowel(&self) -> bool {
        self.class().is_vowel()
    }

    pub fn is_consonant(&self) -> bool {
        self.class().is_consonant()
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Neighbour offsets as (row delta, column delta), clockwise from north.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Immutable square grid with toroidal adjacency.
///
/// Built once and then shared read-only between search workers.
#[derive(Debug, Clone)]
pub struct ToroidalGrid {
    side: usize,
    vertices: Vec<Vertex>,
    adjacency: Vec<Vec<VertexId>>,
}

impl ToroidalGrid {
    /// Build from a 2D array of codes. Every row must have as many
    /// columns as there are rows.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::Empty);
        }
        let side = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != side {
                return Err(GridError::NotSquare {
                    rows: side,
                    row,
                    cols: cells.len(),
                });
            }
        }
        let flat: Vec<u32> = rows.iter().flatten().copied().collect();
        Self::build(side, &flat)
    }

    /// Build from a row-major list of codes whose length is a perfect
    /// square.
    pub fn from_flat(values: &[u32]) -> Result<Self, GridError> {
        if values.is_empty() {
            return Err(GridError::Empty);
        }
        let side = values.len().isqrt();
        if side * side != values.len() {
            return Err(GridError::NotPerfectSquare {
                count: values.len(),
            });
        }
        Self::build(side, values)
    }

    /// Parse delimited text: positive integers separated by commas,
    /// spaces, tabs or line breaks.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let values = text
            .split(['\r', '\n', ',', ' ', '\t'])
            .filter(|token| !token.is_empty())
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<u32>()
                    .map_err(|_| GridError::InvalidToken {
                        position,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_flat(&values)
    }

    fn build(side: usize, values: &[u32]) -> Result<Self, GridError> {
        if let Some(position) = values.iter().position(|&v| v == 0) {
            return Err(GridError::ZeroValue { position });
        }
        let vertices = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Vertex {
                row: i / side,
                col: i % side,
                value,
            })
            .collect();

        let mut adjacency = Vec::with_capacity(side * side);
        for id in 0..side * side {
            let (row, col) = (id / side, id % side);
            let mut neighbors = Vec::with_capacity(DIRECTIONS.len());
            for (dr, dc) in DIRECTIONS {
                let r = wrap(row, dr, side);
                let c = wrap(col, dc, side);
                let n = r * side + c;
                // Small grids fold several offsets onto the same cell.
                if n != id && !neighbors.contains(&n) {
                    neighbors.push(n);
                }
            }
            adjacency.push(neighbors);
        }

        Ok(Self {
            side,
            vertices,
            adjacency,
        })
    }

    /// Number of rows (and columns).
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn class(&self, id: VertexId) -> LetterClass {
        self.vertices[id].class()
    }

    pub fn index_of(&self, row: usize, col: usize) -> VertexId {
        (row % self.side) * self.side + col % self.side
    }

    pub fn vertex_at(&self, row: usize, col: usize) -> &Vertex {
        &self.vertices[self.index_of(row, col)]
    }

    /// Distinct toroidal neighbours in clockwise order from north.
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        &self.adjacency[id]
    }

    /// True iff the wrapped row and column distances are both at most 1
    /// and the vertices differ.
    pub fn is_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        let (va, vb) = (&self.vertices[a], &self.vertices[b]);
        let dr = wrapped_distance(va.row, vb.row, self.side);
        let dc = wrapped_distance(va.col, vb.col, self.side);
        dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
    }

    /// Letter codes along a path.
    pub fn values(&self, path: &[VertexId]) -> Vec<u32> {
        path.iter().map(|&id| self.vertices[id].value).collect()
    }

    /// Anti-diagonal readout: for `i, j` in row-major order, the cell at
    /// row `(n - (i + j) % n) % n` and column `(j + offset) % n`.
    pub fn diagonal_readout(&self, offset: usize) -> Vec<VertexId> {
        let n = self.side;
        let mut out = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let row = (n - (i + j) % n) % n;
                let col = (j + offset) % n;
                out.push(row * n + col);
            }
        }
        out
    }
}

fn wrap(index: usize, delta: isize, side: usize) -> usize {
    let side = side as isize;
    ((index as isize + delta).rem_euclid(side)) as usize
}

fn wrapped_distance(a: usize, b: usize, side: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(side - d)
}
