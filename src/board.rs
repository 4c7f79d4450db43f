//! The 8x8 checkers grid and where its tiles and pieces sit in the world.

use std::fmt;

use crate::math::prelude::Vector3;

/// Number of cells along each side of the board.
pub const SIZE: usize = 8;

/// Columns that start with light pieces.
const LIGHT_COLUMNS: ::std::ops::Range<usize> = 0..3;
/// Columns that start with dark pieces.
const DARK_COLUMNS: ::std::ops::Range<usize> = 5..8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Light,
    Dark,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// The board, indexed by `(col, row)`. It is laid out once and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// The starting position. A counter runs over `(row, col)` pairs, row-major,
    /// for the columns of each side: a light piece sits where the counter is
    /// even, a dark piece where the counter plus one is even.
    pub fn initial() -> Self {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];

        let mut k = 0;
        for row in 0..SIZE {
            for col in LIGHT_COLUMNS {
                if k % 2 == 0 {
                    cells[col][row] = Cell::Light;
                }

                k += 1;
            }
        }

        let mut k = 0;
        for row in 0..SIZE {
            for col in DARK_COLUMNS {
                if (k + 1) % 2 == 0 {
                    cells[col][row] = Cell::Dark;
                }

                k += 1;
            }
        }

        Board { cells }
    }

    /// Returns the content of the cell, or `None` if out of the board.
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        self.cells.get(col).and_then(|v| v.get(row)).cloned()
    }

    /// Counts the cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|v| v.iter())
            .filter(|&&v| v == cell)
            .count()
    }

    /// Iterates every cell as `(col, row, content)`, column by column.
    pub fn cells<'a>(&'a self) -> impl Iterator<Item = (usize, usize, Cell)> + 'a {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(col, v)| v.iter().enumerate().map(move |(row, &c)| (col, row, c)))
    }

    /// Iterates the occupied cells.
    pub fn pieces<'a>(&'a self) -> impl Iterator<Item = (usize, usize, Cell)> + 'a {
        self.cells().filter(|v| v.2 != Cell::Empty)
    }

    /// Pieces stand on the dark tiles.
    #[inline]
    pub fn is_dark_tile(col: usize, row: usize) -> bool {
        (col + row) % 2 == 0
    }

    /// World-space centre of the tile at `(col, row)`. Tiles are one unit wide
    /// and the board is centred on the origin, on the `y = 0` plane.
    pub fn tile_position(col: usize, row: usize) -> Vector3<f32> {
        let half = SIZE as f32 / 2.0 - 0.5;
        Vector3::new(col as f32 - half, 0.0, row as f32 - half)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let c = match self.cells[col][row] {
                    Cell::Empty if Board::is_dark_tile(col, row) => '.',
                    Cell::Empty => ' ',
                    Cell::Light => 'o',
                    Cell::Dark => 'x',
                };

                write!(f, "{}", c)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let text = format!("{}", Board::initial());
        let first = text.lines().next().unwrap();
        assert_eq!(first, "o o . x ");
        assert_eq!(text.lines().count(), SIZE);
    }
}
