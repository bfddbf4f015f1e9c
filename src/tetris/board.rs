//! Playing field for the falling-block game.
//!
//! Flat row-major array of cell markers (0 = empty, 1..=7 = locked piece
//! kind). Coordinates are (x, y) with x in 0..10 left to right and y in
//! 0..20 top to bottom.

use arrayvec::ArrayVec;

use crate::tetris::pieces::PieceShape;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH, GameInfo};

const FIELD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [u8; FIELD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [0; FIELD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i8 || y < 0 || y >= FIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * FIELD_WIDTH + (x as usize))
    }

    pub fn get(&self, x: i8, y: i8) -> Option<u8> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Returns false when (x, y) is out of bounds.
    pub fn set(&mut self, x: i8, y: i8, marker: u8) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = marker;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(m) if m != 0)
    }

    /// Whether a piece shape can occupy origin (x, y).
    ///
    /// Cells above the top edge (y < 0) are allowed so freshly spawned
    /// pieces can hang over the field; side and bottom edges and occupied
    /// cells reject the placement.
    pub fn fits(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        shape.iter().all(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= FIELD_WIDTH as i8 {
                return false;
            }
            if py < 0 {
                return true;
            }
            if py >= FIELD_HEIGHT as i8 {
                return false;
            }
            !self.is_occupied(px, py)
        })
    }

    /// Write a piece's cells into the field. Cells above the top edge are
    /// dropped silently.
    pub fn lock_piece(&mut self, shape: &PieceShape, x: i8, y: i8, marker: u8) {
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, marker);
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= FIELD_HEIGHT {
            return false;
        }
        let start = y * FIELD_WIDTH;
        self.cells[start..start + FIELD_WIDTH].iter().all(|&m| m != 0)
    }

    /// Remove all full rows, shifting everything above down. Returns the
    /// cleared row indices, bottom to top. Two-pointer compaction, no
    /// allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let mut write_y = FIELD_HEIGHT;

        for read_y in (0..FIELD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * FIELD_WIDTH;
                    let dst = write_y * FIELD_WIDTH;
                    self.cells.copy_within(src..src + FIELD_WIDTH, dst);
                }
            }
        }

        self.cells[..write_y * FIELD_WIDTH].fill(0);
        cleared
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Copy the locked cells into a snapshot field grid.
    pub fn write_to(&self, info: &mut GameInfo) {
        for y in 0..FIELD_HEIGHT {
            let start = y * FIELD_WIDTH;
            info.field[y].copy_from_slice(&self.cells[start..start + FIELD_WIDTH]);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..FIELD_WIDTH as i8 {
            board.set(x, y, 1);
        }
    }

    #[test]
    fn index_bounds() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn fits_allows_cells_above_top() {
        let board = Board::new();
        let shape = crate::tetris::pieces::shape(0, 1); // vertical I
        assert!(board.fits(&shape, 3, -2));
        assert!(!board.fits(&shape, 3, 17)); // bottom cell at y=20
        assert!(!board.fits(&shape, -3, 5)); // left wall
    }

    #[test]
    fn fits_rejects_occupied_cells() {
        let mut board = Board::new();
        board.set(4, 10, 3);
        let shape = crate::tetris::pieces::shape(1, 0); // O at (1,0)..(2,1)
        assert!(board.fits(&shape, 0, 9));
        assert!(!board.fits(&shape, 3, 10));
    }

    #[test]
    fn clear_single_full_row() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        board.set(0, 18, 2);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19]);
        // The marker above shifted down.
        assert_eq!(board.get(0, 19), Some(2));
        assert_eq!(board.get(0, 18), Some(0));
    }

    #[test]
    fn clear_non_adjacent_full_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.set(5, 18, 4);
        board.set(5, 16, 6);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(5, 19), Some(4));
        assert_eq!(board.get(5, 18), Some(6));
        assert!(!board.is_occupied(5, 17));
    }

    #[test]
    fn clear_four_rows_at_once() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row(&mut board, y);
        }
        let cleared = board.clear_full_rows();
        assert_eq!(cleared.len(), 4);
        for y in 0..FIELD_HEIGHT {
            assert!(!board.is_row_full(y));
        }
    }

    #[test]
    fn lock_piece_drops_cells_above_top() {
        let mut board = Board::new();
        let shape = crate::tetris::pieces::shape(0, 1); // vertical I
        board.lock_piece(&shape, 3, -2, 1);
        // Only the two in-field cells landed.
        assert!(board.is_occupied(5, 0));
        assert!(board.is_occupied(5, 1));
        assert!(!board.is_occupied(5, 2));
    }
}
