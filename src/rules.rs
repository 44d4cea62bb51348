use std::time::Duration;

use crate::types::{Color, Position};

pub const BOARD_SIZE: i32 = 8;
/// Rows each side fills at the start of a game.
pub const STARTING_ROWS: i32 = 3;
pub const STARTING_PLAYER: Color = Color::Dark;
pub const AI_PLAYER_COLOR: Color = Color::Light;
pub const AI_THINK_DELAY: Duration = Duration::from_millis(1000);

const KING_OFFSETS: [(i32, i32); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];
const LIGHT_FORWARD_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_FORWARD_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

/// Diagonal directions available to a piece of `color`.
/// Regular pieces only move toward the opponent's edge; kings move both ways.
pub fn movement_offsets(color: Color, is_king: bool) -> &'static [(i32, i32)] {
    match (is_king, color) {
        (true, _) => &KING_OFFSETS,
        (false, Color::Light) => &LIGHT_FORWARD_OFFSETS,
        (false, Color::Dark) => &DARK_FORWARD_OFFSETS,
    }
}

/// Row on which a piece of `color` is crowned.
pub fn promotion_row(color: Color) -> i32 {
    match color {
        Color::Light => BOARD_SIZE - 1,
        Color::Dark => 0,
    }
}

pub fn is_move_in_bounds(size: i32, at: Position) -> bool {
    (0..size).contains(&at.x) && (0..size).contains(&at.y)
}

/// Only dark squares are playable.
pub fn is_dark_square(at: Position) -> bool {
    (at.x + at.y).rem_euclid(2) == 0
}

pub fn is_starting_square_for(color: Color, at: Position) -> bool {
    if !is_move_in_bounds(BOARD_SIZE, at) || !is_dark_square(at) {
        return false;
    }
    match color {
        Color::Light => at.y < STARTING_ROWS,
        Color::Dark => at.y >= BOARD_SIZE - STARTING_ROWS,
    }
}
