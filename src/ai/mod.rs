pub mod random;
pub mod turn;

use serde::Serialize;

use crate::types::{MoveSet, Position};

pub use random::{FirstMoveSelector, RandomMoveSelector, pick_ai_move};
pub use turn::{ComputerTurn, PendingMove};

/// A move expressed as the two commands a human would issue:
/// select `piece`, then apply a move to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiMove {
    pub piece: Position,
    pub target: Position,
}

impl AiMove {
    pub fn new(piece: Position, target: Position) -> Self {
        Self { piece, target }
    }
}

pub trait MoveSelector: Send {
    /// Picks a move from `moves`. A set `forced_capture_key` must be honoured
    /// while that piece still has captures.
    fn select_move(
        &mut self,
        moves: &MoveSet,
        forced_capture_key: Option<Position>,
    ) -> Option<AiMove>;
}
