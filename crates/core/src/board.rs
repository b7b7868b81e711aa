//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (12x24 by default) stored as one flat,
//! row-major buffer. Coordinates are `(x, y)` with the origin at the top-left and
//! y growing downward.
//!
//! Rows above the grid (y < 0) are open air: a piece poking out of the top only
//! collides with the side walls, which lets pieces spawn partially hidden.

use crate::error::BoardError;
use crate::pieces::Matrix;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Smallest board side (a 4-wide piece must fit)
pub const MIN_BOARD_DIM: u8 = 4;

/// Largest board side
pub const MAX_BOARD_DIM: u8 = 64;

/// The playfield grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        let valid = MIN_BOARD_DIM..=MAX_BOARD_DIM;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(BoardError::InvalidDimensions {
                width: width as u16,
                height: height as u16,
                min: MIN_BOARD_DIM,
                max: MAX_BOARD_DIM,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        })
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width() || y < 0 || y >= self.height() {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> i16 {
        self.width as i16
    }

    pub fn height(&self) -> i16 {
        self.height as i16
    }

    /// Cell at (x, y), `None` when off the grid
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y).
    ///
    /// Returns false, leaving the board untouched, if (x, y) is off the grid or
    /// `cell` is neither `EMPTY` nor a piece kind id.
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        if !is_cell_value(cell) {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Would `matrix` placed with its top-left at `(x, y)` hit a wall, the floor,
    /// or a filled cell?
    ///
    /// Cells above the grid only test the side walls.
    pub fn collides(&self, matrix: &Matrix, x: i16, y: i16) -> bool {
        matrix.occupied().any(|(mx, my, _)| {
            let bx = x + mx;
            let by = y + my;
            if bx < 0 || bx >= self.width() || by >= self.height() {
                return true;
            }
            by >= 0 && self.cells[(by as usize) * (self.width as usize) + (bx as usize)] != EMPTY
        })
    }

    /// Write the occupied cells of `matrix` into the grid.
    ///
    /// Cells that would land above the grid are dropped. The caller is expected to
    /// have checked [`Board::collides`] for this position.
    pub fn merge_piece(&mut self, matrix: &Matrix, x: i16, y: i16) {
        for (mx, my, cell) in matrix.occupied() {
            if let Some(idx) = self.index(x + mx, y + my) {
                self.cells[idx] = cell;
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        let start = y * width;
        self.cells[start..start + width]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Scans bottom to top. Removing a row shifts everything above it down by one and
    /// empties the top row; the same row index is then checked again, because the row
    /// that just moved into it may be full too.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut y = self.height as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                // Rows 0..row move down one; copy_within handles the overlap.
                self.cells.copy_within(0..row * width, width);
                self.cells[..width].fill(EMPTY);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Borrow the raw row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Owned copy of the grid for readers
    pub fn grid(&self) -> Grid {
        let mut grid = Grid::default();
        self.write_grid(&mut grid);
        grid
    }

    /// Refresh a caller-owned copy, reusing its buffer.
    pub fn write_grid(&self, out: &mut Grid) {
        out.width = self.width;
        out.height = self.height;
        out.cells.clear();
        out.cells.extend_from_slice(&self.cells);
    }
}

/// `EMPTY` or a kind id (1..=7)
fn is_cell_value(cell: Cell) -> bool {
    cell == EMPTY || PieceKind::from_id(cell).is_some()
}

impl Default for Board {
    /// The standard 12x24 board
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![EMPTY; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
        }
    }
}

/// Read-only copy of the board cells.
///
/// Holds its own buffer, so nothing done to it reaches the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn width(&self) -> i16 {
        self.width as i16
    }

    pub fn height(&self) -> i16 {
        self.height as i16
    }

    /// Cell at (x, y), `None` when off the grid
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        if x < 0 || x >= self.width() || y < 0 || y >= self.height() {
            return None;
        }
        Some(self.cells[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// One row of cells, `None` below the last row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        let width = self.width as usize;
        self.cells.get(y * width..(y + 1) * width)
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Overwrite a cell of this copy; same rules as [`Board::set`].
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        if !is_cell_value(cell) || x < 0 || x >= self.width() || y < 0 || y >= self.height() {
            return false;
        }
        self.cells[(y as usize) * (self.width as usize) + (x as usize)] = cell;
        true
    }
}
