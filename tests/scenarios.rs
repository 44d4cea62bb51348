//! End-to-end rule scenarios driven through the public reducer and engine API.

use std::collections::BTreeSet;

use checkers::board::Board;
use checkers::engine::{
    all_moves_for, apply_capture_move, apply_simple_move, evaluate_winner, legal_captures_per_piece,
    select_interactivity_state,
};
use checkers::rules::{BOARD_SIZE, is_dark_square};
use checkers::types::{Color, GameState, Piece, PlayerStats, Position, Winner};
use checkers::{GameAction, game_reducer};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use Color::{Dark, Light};

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn run(state: GameState, actions: &[GameAction]) -> GameState {
    actions.iter().fold(state, game_reducer)
}

fn squares() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| pos(x, y)))
}

/// Random sparse position with pieces on playable squares only.
fn random_board(rng: &mut SmallRng) -> Board {
    squares()
        .filter(|&at| is_dark_square(at))
        .fold(Board::empty(), |board, at| {
            if !rng.random_bool(0.35) {
                return board;
            }
            let color = if rng.random_bool(0.5) { Dark } else { Light };
            let piece = if rng.random_bool(0.2) {
                Piece::king(at, color)
            } else {
                Piece::new(at, color)
            };
            board.with_piece(piece)
        })
}

#[test]
fn simple_opening_move() {
    let state = run(
        GameState::initial(),
        &[GameAction::SelectPiece(pos(1, 5)), GameAction::ApplyMove(pos(0, 4))],
    );

    assert!(state.board.get(pos(1, 5)).is_none());
    assert_eq!(state.board.get(pos(0, 4)), Some(Piece::new(pos(0, 4), Dark)));
    assert_eq!(state.current_player, Light);
    assert_eq!(state.stats.dark.moves, 1);
}

#[test]
fn mandatory_capture_blocks_other_pieces() {
    let board = Board::starting()
        .without_piece(pos(2, 2))
        .with_piece(Piece::new(pos(2, 4), Light));
    let state = GameState::with_board(board, Dark);

    // (5,5) can only step, so it may not be picked up.
    let blocked = game_reducer(state.clone(), &GameAction::SelectPiece(pos(5, 5)));
    assert_eq!(blocked, state);

    let state = run(
        state,
        &[GameAction::SelectPiece(pos(1, 5)), GameAction::ApplyMove(pos(3, 3))],
    );

    assert!(state.board.get(pos(2, 4)).is_none());
    assert_eq!(state.board.get(pos(3, 3)), Some(Piece::new(pos(3, 3), Dark)));
    assert_eq!(state.board.count(Light), 11);
    assert_eq!(state.current_player, Light);
    assert_eq!(state.stats.dark, PlayerStats::new(1, 1));
}

#[test]
fn double_jump_keeps_the_turn_until_the_chain_ends() {
    let board = Board::empty()
        .with_piece(Piece::king(pos(2, 2), Dark))
        .with_piece(Piece::new(pos(3, 3), Light))
        .with_piece(Piece::new(pos(5, 5), Light))
        .with_piece(Piece::new(pos(0, 0), Light));

    let mid = run(
        GameState::with_board(board, Dark),
        &[GameAction::SelectPiece(pos(2, 2)), GameAction::ApplyMove(pos(4, 4))],
    );

    assert_eq!(mid.forced_capture_key, Some(pos(4, 4)));
    assert_eq!(mid.current_player, Dark);
    assert_eq!(
        select_interactivity_state(&mid).selectable,
        [pos(4, 4)].into_iter().collect::<BTreeSet<_>>()
    );
    assert_eq!(game_reducer(mid.clone(), &GameAction::DeselectPiece(pos(4, 4))), mid);

    let done = game_reducer(mid, &GameAction::ApplyMove(pos(6, 6)));

    assert_eq!(done.forced_capture_key, None);
    assert_eq!(done.current_player, Light);
    assert!(done.board.get(pos(3, 3)).is_none());
    assert!(done.board.get(pos(5, 5)).is_none());
    assert_eq!(done.board.get(pos(6, 6)), Some(Piece::king(pos(6, 6), Dark)));
}

#[test]
fn winner_detection() {
    let light_only = Board::empty().with_piece(Piece::new(pos(2, 2), Light));
    assert_eq!(
        evaluate_winner(&GameState::with_board(light_only, Dark)),
        Some(Winner::Player(Light))
    );

    assert_eq!(
        evaluate_winner(&GameState::with_board(Board::empty(), Dark)),
        Some(Winner::Draw)
    );

    // Dark at (0,0) cannot move; light still can.
    let stuck = Board::empty()
        .with_piece(Piece::new(pos(0, 0), Dark))
        .with_piece(Piece::new(pos(4, 2), Light));
    assert_eq!(
        evaluate_winner(&GameState::with_board(stuck, Dark)),
        Some(Winner::Player(Light))
    );
}

#[test]
fn mutual_blockade_is_a_draw() {
    let board = Board::empty()
        .with_piece(Piece::new(pos(0, 0), Dark))
        .with_piece(Piece::new(pos(7, 7), Light));

    for to_move in [Dark, Light] {
        assert_eq!(
            evaluate_winner(&GameState::with_board(board, to_move)),
            Some(Winner::Draw)
        );
    }
}

#[test]
fn capture_priority_holds_on_random_boards() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);

    for _ in 0..300 {
        let board = random_board(&mut rng);
        for player in [Dark, Light] {
            let state = GameState::with_board(board, player);
            let capturing: BTreeSet<Position> = board
                .pieces()
                .filter(|piece| piece.color == player)
                .filter(|piece| !legal_captures_per_piece(&board, piece).is_empty())
                .map(|piece| piece.position())
                .collect();
            if capturing.is_empty() {
                continue;
            }

            let interactivity = select_interactivity_state(&state);
            assert_eq!(interactivity.selectable, capturing);
            assert_eq!(
                interactivity.disabled.len() + capturing.len(),
                board.count(player)
            );
        }
    }
}

#[test]
fn applying_rejects_every_target_outside_the_move_set() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..100 {
        let board = random_board(&mut rng);
        for player in [Dark, Light] {
            let moves = all_moves_for(&board, player);
            for piece in board.pieces().filter(|piece| piece.color == player) {
                let key = piece.position();
                for target in squares() {
                    let is_step = moves
                        .steps
                        .get(&key)
                        .is_some_and(|steps| steps.iter().any(|s| s.to == target));
                    let is_capture = moves
                        .captures
                        .get(&key)
                        .is_some_and(|captures| captures.iter().any(|c| c.to == target));

                    let stepped = apply_simple_move(&board, &moves, &piece, target);
                    let captured = apply_capture_move(&board, &moves, &piece, target);
                    assert_eq!(stepped.is_some(), is_step);
                    assert_eq!(captured.is_some(), is_capture);
                }
            }
        }
    }
}

#[test]
fn promotion_is_monotonic_across_random_moves() {
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..100 {
        let board = random_board(&mut rng);
        for player in [Dark, Light] {
            let moves = all_moves_for(&board, player);
            for (from, steps) in &moves.steps {
                let piece = board.get(*from).expect("move set lists occupied squares");
                for step in steps {
                    let outcome =
                        apply_simple_move(&board, &moves, &piece, step.to).expect("listed step");
                    let moved = outcome.board.get(step.to).expect("piece landed");
                    let far_row = if player == Light { BOARD_SIZE - 1 } else { 0 };
                    assert_eq!(moved.is_king, piece.is_king || step.to.y == far_row);
                }
            }
        }
    }
}
