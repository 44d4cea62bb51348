use once_cell::sync::Lazy;
use serde::Serialize;

use crate::rules::{BOARD_SIZE, is_move_in_bounds, is_starting_square_for};
use crate::types::{Color, Piece, Position};

const SIDE: usize = BOARD_SIZE as usize;

static STARTING_BOARD: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let at = Position::new(x, y);
            for color in [Color::Dark, Color::Light] {
                if is_starting_square_for(color, at) {
                    board.set(at, Some(Piece::new(at, color)));
                }
            }
        }
    }
    board
});

/// Checkers board: an 8x8 grid indexed `[y][x]`.
///
/// The board is a plain value. Every move produces a new board and leaves
/// the previous one untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; SIDE]; SIDE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; SIDE]; SIDE],
        }
    }

    /// Standard opening layout: light on rows 0-2, dark on rows 5-7.
    pub fn starting() -> Self {
        *STARTING_BOARD
    }

    /// Returns the piece at `at`, or `None` for empty and off-board squares.
    pub fn get(&self, at: Position) -> Option<Piece> {
        if !is_move_in_bounds(BOARD_SIZE, at) {
            return None;
        }
        self.cells[at.y as usize][at.x as usize]
    }

    pub fn is_empty_at(&self, at: Position) -> bool {
        self.get(at).is_none()
    }

    /// Copy of this board with `piece` placed on its own square.
    pub fn with_piece(mut self, piece: Piece) -> Self {
        self.set(piece.position(), Some(piece));
        self
    }

    /// Copy of this board with `at` cleared.
    pub fn without_piece(mut self, at: Position) -> Self {
        self.set(at, None);
        self
    }

    /// Iterates occupied squares row by row.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|piece| piece.color == color).count()
    }

    /// Rows of cells, `rows()[y][x]`.
    pub fn rows(&self) -> &[[Option<Piece>; SIDE]; SIDE] {
        &self.cells
    }

    fn set(&mut self, at: Position, cell: Option<Piece>) {
        if is_move_in_bounds(BOARD_SIZE, at) {
            self.cells[at.y as usize][at.x as usize] = cell;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

/// Independent copy of `board`.
pub fn clone_board(board: &Board) -> Board {
    *board
}

/// Builds a board from `(x, y, color, is_king)` tuples.
#[cfg(test)]
pub(crate) fn board_from(pieces: &[(i32, i32, Color, bool)]) -> Board {
    pieces.iter().fold(Board::empty(), |board, &(x, y, color, is_king)| {
        let at = Position::new(x, y);
        let piece = if is_king {
            Piece::king(at, color)
        } else {
            Piece::new(at, color)
        };
        board.with_piece(piece)
    })
}
