use std::collections::BTreeSet;

use serde::Serialize;

use crate::board::{Board, clone_board};
use crate::rules::{BOARD_SIZE, is_dark_square, is_move_in_bounds, movement_offsets, promotion_row};
use crate::types::{
    Capture, Color, GameState, MoveSet, Piece, Position, Stats, StatsDelta, Step, Winner,
};

/// Destination squares the selected piece may move to.
pub type MoveTargets = BTreeSet<Position>;

/// Which of the current player's pieces may be picked up right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interactivity {
    pub selectable: BTreeSet<Position>,
    pub disabled: BTreeSet<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleMoveOutcome {
    pub board: Board,
    pub destination: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub board: Board,
    /// Square vacated by the jumped piece.
    pub captured: Position,
    pub destination: Position,
}

/// In bounds, empty and playable.
pub fn is_valid_landing_spot(board: &Board, at: Position) -> bool {
    is_move_in_bounds(BOARD_SIZE, at) && board.is_empty_at(at) && is_dark_square(at)
}

pub fn legal_steps_per_piece(board: &Board, piece: &Piece) -> Vec<Step> {
    let from = piece.position();
    movement_offsets(piece.color, piece.is_king)
        .iter()
        .map(|&(dx, dy)| from.offset(dx, dy))
        .filter(|&to| is_valid_landing_spot(board, to))
        .map(|to| Step { from, to })
        .collect()
}

/// Single jumps available to `piece`, at most one per direction.
pub fn legal_captures_per_piece(board: &Board, piece: &Piece) -> Vec<Capture> {
    let from = piece.position();
    let opponent = piece.color.opponent();
    let mut captures = Vec::new();

    for &(dx, dy) in movement_offsets(piece.color, piece.is_king) {
        let over = from.offset(dx, dy);
        let to = from.offset(2 * dx, 2 * dy);

        if !is_move_in_bounds(BOARD_SIZE, over) || !is_valid_landing_spot(board, to) {
            continue;
        }
        if board.get(over).map(|jumped| jumped.color) == Some(opponent) {
            captures.push(Capture { from, over, to });
        }
    }

    captures
}

/// Move catalogue for `color` on `board`. Pieces that can capture contribute
/// only their captures; the rest contribute their steps, if any.
pub fn all_moves_for(board: &Board, color: Color) -> MoveSet {
    let mut moves = MoveSet::default();

    for piece in board.pieces().filter(|piece| piece.color == color) {
        let captures = legal_captures_per_piece(board, &piece);
        if !captures.is_empty() {
            moves.captures.insert(piece.position(), captures);
            continue;
        }

        let steps = legal_steps_per_piece(board, &piece);
        if !steps.is_empty() {
            moves.steps.insert(piece.position(), steps);
        }
    }

    moves
}

pub fn select_all_moves_per_turn(state: &GameState) -> MoveSet {
    all_moves_for(&state.board, state.current_player)
}

/// True when any piece can capture, which makes every step illegal this turn.
pub fn has_captures(moves: &MoveSet) -> bool {
    !moves.captures.is_empty()
}

pub fn select_interactivity_state(state: &GameState) -> Interactivity {
    let moves = select_all_moves_per_turn(state);
    let must_capture = has_captures(&moves);
    let own_pieces = state
        .board
        .pieces()
        .filter(|piece| piece.color == state.current_player)
        .map(|piece| piece.position());

    let mut interactivity = Interactivity::default();

    // Mid-chain: only the piece that just captured may act.
    if let Some(forced) = state.forced_capture_key
        && moves.captures.contains_key(&forced)
    {
        interactivity.disabled = own_pieces.filter(|&at| at != forced).collect();
        interactivity.selectable.insert(forced);
        return interactivity;
    }

    for at in own_pieces {
        let can_act = if must_capture {
            moves.captures.contains_key(&at)
        } else {
            moves.steps.contains_key(&at)
        };
        if can_act {
            interactivity.selectable.insert(at);
        } else {
            interactivity.disabled.insert(at);
        }
    }

    interactivity
}

pub fn select_move_targets_for(piece: &Piece, moves: &MoveSet) -> MoveTargets {
    let key = piece.position();
    if has_captures(moves) {
        moves
            .captures
            .get(&key)
            .into_iter()
            .flatten()
            .map(|capture| capture.to)
            .collect()
    } else {
        moves
            .steps
            .get(&key)
            .into_iter()
            .flatten()
            .map(|step| step.to)
            .collect()
    }
}

pub fn is_in_move_targets(targets: Option<&MoveTargets>, at: Position) -> bool {
    targets.is_some_and(|targets| targets.contains(&at))
}

/// Whether `piece`, standing where it stands, is (or becomes) a king.
pub fn promote_to_king(piece: &Piece) -> bool {
    piece.is_king || piece.y == promotion_row(piece.color)
}

/// Moves `piece` to `to`, crowning it if it reached its promotion row.
fn relocate(piece: &Piece, to: Position) -> Piece {
    let moved = piece.moved_to(to);
    Piece {
        is_king: promote_to_king(&moved),
        ..moved
    }
}

/// Applies the step of `piece` that lands on `target`.
/// Returns `None` when no such step is in `moves`.
pub fn apply_simple_move(
    board: &Board,
    moves: &MoveSet,
    piece: &Piece,
    target: Position,
) -> Option<SimpleMoveOutcome> {
    let step = moves
        .steps
        .get(&piece.position())?
        .iter()
        .find(|step| step.to == target)?;

    let board = clone_board(board)
        .without_piece(step.from)
        .with_piece(relocate(piece, step.to));

    Some(SimpleMoveOutcome {
        board,
        destination: step.to,
    })
}

/// Applies the capture of `piece` that lands on `target`, removing the jumped piece.
/// Returns `None` when no such capture is in `moves`.
pub fn apply_capture_move(
    board: &Board,
    moves: &MoveSet,
    piece: &Piece,
    target: Position,
) -> Option<CaptureOutcome> {
    let capture = moves
        .captures
        .get(&piece.position())?
        .iter()
        .find(|capture| capture.to == target)?;

    let board = clone_board(board)
        .without_piece(capture.from)
        .without_piece(capture.over)
        .with_piece(relocate(piece, capture.to));

    Some(CaptureOutcome {
        board,
        captured: capture.over,
        destination: capture.to,
    })
}

pub fn increment_stats_for(stats: &Stats, color: Color, change: StatsDelta) -> Stats {
    let mut next = *stats;
    next[color].moves += change.moves;
    next[color].captures += change.captures;
    next
}

/// Decides the game from the board alone, regardless of whose turn it is.
///
/// A side with no pieces loses; a side with no legal move loses; both at
/// once is a draw.
pub fn evaluate_winner(state: &GameState) -> Option<Winner> {
    let board = &state.board;
    let dark_alive = board.count(Color::Dark) > 0;
    let light_alive = board.count(Color::Light) > 0;

    match (dark_alive, light_alive) {
        (false, false) => return Some(Winner::Draw),
        (false, true) => return Some(Winner::Player(Color::Light)),
        (true, false) => return Some(Winner::Player(Color::Dark)),
        (true, true) => {}
    }

    let dark_can_move = !all_moves_for(board, Color::Dark).is_empty();
    let light_can_move = !all_moves_for(board, Color::Light).is_empty();

    match (dark_can_move, light_can_move) {
        (false, false) => Some(Winner::Draw),
        (false, true) => Some(Winner::Player(Color::Light)),
        (true, false) => Some(Winner::Player(Color::Dark)),
        (true, true) => None,
    }
}
