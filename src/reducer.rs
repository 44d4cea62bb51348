use log::{debug, info};

use crate::engine::{
    apply_capture_move, apply_simple_move, evaluate_winner, has_captures,
    increment_stats_for, is_in_move_targets, legal_captures_per_piece,
    select_all_moves_per_turn, select_interactivity_state, select_move_targets_for,
};
use crate::types::{GameMode, GameState, Position, StatsDelta};

/// Commands issued by the UI or by the computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    SelectPiece(Position),
    DeselectPiece(Position),
    ApplyMove(Position),
    SetMode(GameMode),
    NewGame,
}

/// Applies `action` to `state`. Rejected actions return `state` unchanged.
///
/// Once a winner is recorded only `NewGame` has any effect.
pub fn game_reducer(state: GameState, action: &GameAction) -> GameState {
    if state.winner.is_some() && *action != GameAction::NewGame {
        debug!("ignoring {action:?}: game is over");
        return state;
    }

    match *action {
        GameAction::SelectPiece(at) => select_piece(state, at),
        GameAction::DeselectPiece(at) => deselect_piece(state, at),
        GameAction::ApplyMove(target) => apply_move(state, target),
        GameAction::SetMode(mode) => GameState {
            mode: Some(mode),
            forced_capture_key: None,
            ..state
        },
        GameAction::NewGame => GameState::initial(),
    }
}

fn select_piece(state: GameState, at: Position) -> GameState {
    let Some(piece) = state.board.get(at) else {
        debug!("select {at}: empty square");
        return state;
    };
    if piece.color != state.current_player
        || !select_interactivity_state(&state).selectable.contains(&at)
    {
        debug!("select {at}: piece is not selectable");
        return state;
    }

    GameState {
        selected_piece: Some(piece),
        ..state
    }
}

fn deselect_piece(state: GameState, at: Position) -> GameState {
    let Some(selected) = state.selected_piece else {
        return state;
    };
    // A capture chain cannot be abandoned.
    if state.forced_capture_key == Some(selected.position()) {
        debug!("deselect {at}: capture chain in progress");
        return state;
    }
    if selected.position() != at {
        return state;
    }

    GameState {
        selected_piece: None,
        ..state
    }
}

fn apply_move(state: GameState, target: Position) -> GameState {
    let Some(selected) = state.selected_piece else {
        debug!("move to {target}: nothing selected");
        return state;
    };

    let moves = select_all_moves_per_turn(&state);
    let targets = select_move_targets_for(&selected, &moves);
    if !is_in_move_targets(Some(&targets), target) {
        debug!("move {} -> {target}: not a legal target", selected.position());
        return state;
    }

    let mover = state.current_player;

    if has_captures(&moves) {
        let Some(outcome) = apply_capture_move(&state.board, &moves, &selected, target) else {
            return state;
        };
        let next = GameState {
            board: outcome.board,
            ..state
        };

        if let Some(winner) = evaluate_winner(&next) {
            info!("{mover} captured on {} and the game is decided: {winner:?}", outcome.captured);
            return GameState {
                selected_piece: None,
                forced_capture_key: None,
                stats: increment_stats_for(&next.stats, mover, StatsDelta::CAPTURING_MOVE),
                winner: Some(winner),
                ..next
            };
        }

        let landed = next.board.get(outcome.destination);
        if let Some(piece) = landed
            && !legal_captures_per_piece(&next.board, &piece).is_empty()
        {
            debug!("{mover} must keep capturing from {}", outcome.destination);
            // The whole chain is billed as a single move once it ends.
            return GameState {
                selected_piece: Some(piece),
                forced_capture_key: Some(outcome.destination),
                stats: increment_stats_for(&next.stats, mover, StatsDelta::CAPTURE),
                ..next
            };
        }

        return GameState {
            selected_piece: None,
            forced_capture_key: None,
            current_player: mover.opponent(),
            stats: increment_stats_for(&next.stats, mover, StatsDelta::CAPTURING_MOVE),
            ..next
        };
    }

    let Some(outcome) = apply_simple_move(&state.board, &moves, &selected, target) else {
        return state;
    };
    let next = GameState {
        board: outcome.board,
        selected_piece: None,
        forced_capture_key: None,
        stats: increment_stats_for(&state.stats, mover, StatsDelta::MOVE),
        ..state
    };

    if let Some(winner) = evaluate_winner(&next) {
        info!("{mover} moved to {} and the game is decided: {winner:?}", outcome.destination);
        return GameState {
            winner: Some(winner),
            ..next
        };
    }

    GameState {
        current_player: mover.opponent(),
        ..next
    }
}
