//! Pieces module - shape matrices for the seven kinds
//!
//! Each kind has one canonical spawn matrix. A matrix stores the kind id in occupied
//! cells and `EMPTY` elsewhere. Rotation always produces a fresh matrix (or writes into
//! a caller-provided scratch matrix); the catalog shapes are never mutated.
//!
//! Matrices are at most 4x4 and live inline, so rotating never touches the heap.

use arrayvec::ArrayVec;

use crate::error::ShapeError;
use crate::types::{Cell, PieceKind, EMPTY};

/// Largest side of any piece matrix
pub const MAX_SHAPE_DIM: usize = 4;

const MAX_SHAPE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Row-major piece matrix, up to 4x4.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: u8,
    cols: u8,
    cells: ArrayVec<Cell, MAX_SHAPE_CELLS>,
}

impl Matrix {
    /// Build a matrix from rows of cell values.
    pub fn from_rows(rows: &[&[Cell]]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return Err(ShapeError::TooLarge {
                rows: height,
                cols: width,
            });
        }

        let mut cells = ArrayVec::new();
        for row in rows {
            if row.len() != width {
                return Err(ShapeError::Ragged);
            }
            for &cell in row.iter() {
                if cell != EMPTY && PieceKind::from_id(cell).is_none() {
                    return Err(ShapeError::InvalidCell(cell));
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    /// Catalog shapes are fixed and valid; build them without the checks.
    fn from_table<const R: usize, const C: usize>(table: &[[Cell; C]; R]) -> Self {
        let mut cells = ArrayVec::new();
        for row in table {
            cells.extend(row.iter().copied());
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    /// Number of rows (height)
    pub fn rows(&self) -> i16 {
        self.rows as i16
    }

    /// Number of columns (width)
    pub fn cols(&self) -> i16 {
        self.cols as i16
    }

    /// Cell at column `x`, row `y`; `EMPTY` outside the matrix.
    pub fn get(&self, x: i16, y: i16) -> Cell {
        if x < 0 || y < 0 || x >= self.cols() || y >= self.rows() {
            return EMPTY;
        }
        self.cells[(y as usize) * (self.cols as usize) + (x as usize)]
    }

    /// Iterate occupied cells as `(x, y, value)` in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (i16, i16, Cell)> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != EMPTY)
            .map(move |(i, &cell)| ((i % cols) as i16, (i / cols) as i16, cell))
    }

    /// Rotate 90 degrees clockwise into `out`.
    ///
    /// Source cell `(x, y)` lands at `(rows - 1 - y, x)`; width and height swap.
    pub fn rotate_cw_into(&self, out: &mut Matrix) {
        out.rows = self.cols;
        out.cols = self.rows;
        out.cells.clear();
        let rows = self.rows();
        for ny in 0..out.rows() {
            for nx in 0..out.cols() {
                out.cells.push(self.get(ny, rows - 1 - nx));
            }
        }
    }

    /// Clockwise rotation as a new matrix.
    pub fn rotated_cw(&self) -> Matrix {
        let mut out = Matrix::default();
        self.rotate_cw_into(&mut out);
        out
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: ArrayVec::new(),
        }
    }
}

const I_SHAPE: [[Cell; 4]; 4] = [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]];
const L_SHAPE: [[Cell; 3]; 3] = [[0, 2, 0], [0, 2, 0], [0, 2, 2]];
const J_SHAPE: [[Cell; 3]; 3] = [[0, 3, 0], [0, 3, 0], [3, 3, 0]];
const O_SHAPE: [[Cell; 2]; 2] = [[4, 4], [4, 4]];
const Z_SHAPE: [[Cell; 3]; 3] = [[5, 5, 0], [0, 5, 5], [0, 0, 0]];
const S_SHAPE: [[Cell; 3]; 3] = [[0, 6, 6], [6, 6, 0], [0, 0, 0]];
const T_SHAPE: [[Cell; 3]; 3] = [[0, 7, 0], [7, 7, 7], [0, 0, 0]];

/// Spawn-orientation matrix for a kind
pub fn spawn_matrix(kind: PieceKind) -> Matrix {
    match kind {
        PieceKind::I => Matrix::from_table(&I_SHAPE),
        PieceKind::L => Matrix::from_table(&L_SHAPE),
        PieceKind::J => Matrix::from_table(&J_SHAPE),
        PieceKind::O => Matrix::from_table(&O_SHAPE),
        PieceKind::Z => Matrix::from_table(&Z_SHAPE),
        PieceKind::S => Matrix::from_table(&S_SHAPE),
        PieceKind::T => Matrix::from_table(&T_SHAPE),
    }
}

/// A falling piece: its kind and current orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    matrix: Matrix,
}

impl Piece {
    /// New piece in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            matrix: spawn_matrix(kind),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Display color of the kind
    pub fn color(&self) -> (u8, u8, u8) {
        self.kind.color()
    }

    /// Commit a new orientation by swapping it with `other`.
    ///
    /// `other` receives the previous matrix so it can be reused as scratch.
    pub fn swap_matrix(&mut self, other: &mut Matrix) {
        std::mem::swap(&mut self.matrix, other);
    }
}
