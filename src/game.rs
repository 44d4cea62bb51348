use std::time::Duration;

use log::debug;
use web_time::Instant;

use crate::ai::{ComputerTurn, MoveSelector, PendingMove, RandomMoveSelector};
use crate::engine::{
    Interactivity, MoveTargets, has_captures, select_all_moves_per_turn,
    select_interactivity_state, select_move_targets_for,
};
use crate::error::{EngineError, EngineResult};
use crate::reducer::{GameAction, game_reducer};
use crate::rules::{AI_PLAYER_COLOR, AI_THINK_DELAY};
use crate::types::{Color, GameMode, GameState, MoveSet, Position, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side played by the computer in player-vs-computer mode.
    pub computer_color: Color,
    /// Pause between the computer picking up a piece and moving it.
    pub think_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            computer_color: AI_PLAYER_COLOR,
            think_delay: AI_THINK_DELAY,
        }
    }
}

/// Owns the authoritative game state and drives the computer player.
///
/// Every command goes through [`game_reducer`]; afterwards the computer turn
/// is re-synced so that the computer picks up its piece immediately and
/// moves it once the thinking delay has passed (see [`GameInstance::tick`]).
pub struct GameInstance {
    state: GameState,
    selector: Box<dyn MoveSelector>,
    computer: ComputerTurn,
}

impl GameInstance {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            state: GameState::initial(),
            selector,
            computer: ComputerTurn::new(config.computer_color, config.think_delay),
        }
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        Self::new(config, Box::new(RandomMoveSelector::new()))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn moves(&self) -> MoveSet {
        select_all_moves_per_turn(&self.state)
    }

    pub fn has_captures(&self) -> bool {
        has_captures(&self.moves())
    }

    pub fn interactivity(&self) -> Interactivity {
        select_interactivity_state(&self.state)
    }

    /// Targets of the selected piece; `None` while nothing is selected.
    pub fn move_targets(&self) -> Option<MoveTargets> {
        let selected = self.state.selected_piece?;
        Some(select_move_targets_for(&selected, &self.moves()))
    }

    pub fn winner(&self) -> Option<Winner> {
        self.state.winner
    }

    pub fn is_computer_turn(&self) -> bool {
        self.computer.is_computer_turn(&self.state)
    }

    pub fn computer_delay(&self) -> Duration {
        self.computer.delay()
    }

    pub fn pending_computer_move(&self) -> Option<&PendingMove> {
        self.computer.pending()
    }

    pub fn select_piece(&mut self, at: Position) -> bool {
        self.dispatch(GameAction::SelectPiece(at))
    }

    pub fn deselect_piece(&mut self, at: Position) -> bool {
        self.dispatch(GameAction::DeselectPiece(at))
    }

    /// Moves the selected piece to `target`.
    ///
    /// Calling this with nothing selected is a caller error; an illegal
    /// target, or any move during the computer's turn, returns `Ok(false)`.
    pub fn apply_move(&mut self, target: Position) -> EngineResult<bool> {
        if self.is_computer_turn() {
            return Ok(false);
        }
        if self.state.selected_piece.is_none() {
            return Err(EngineError::NoSelection);
        }
        Ok(self.dispatch(GameAction::ApplyMove(target)))
    }

    pub fn set_mode(&mut self, mode: GameMode) -> bool {
        self.dispatch(GameAction::SetMode(mode))
    }

    pub fn new_game(&mut self) -> bool {
        self.dispatch(GameAction::NewGame)
    }

    /// Runs a local player's `action` through the reducer. Returns whether
    /// the state changed.
    ///
    /// Piece commands are refused while the computer is to move.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        let piece_command = matches!(
            action,
            GameAction::SelectPiece(_) | GameAction::DeselectPiece(_) | GameAction::ApplyMove(_)
        );
        if piece_command && self.is_computer_turn() {
            debug!("ignoring {action:?}: computer is to move");
            return false;
        }

        let changed = self.reduce(&action);
        self.sync_computer(Instant::now());
        changed
    }

    /// Applies the computer's pending move if its delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(target) = self.computer.poll(now) else {
            return false;
        };
        self.apply_computer_move(target, now)
    }

    /// Applies the computer's pending move for an external timer tagged
    /// with `generation`. Stale timers are ignored.
    pub fn fire_computer_move(&mut self, generation: u32) -> bool {
        let Some(target) = self.computer.fire(generation) else {
            return false;
        };
        self.apply_computer_move(target, Instant::now())
    }

    fn apply_computer_move(&mut self, target: Position, now: Instant) -> bool {
        let changed = self.reduce(&GameAction::ApplyMove(target));
        if !changed {
            debug!("computer move to {target} was rejected, planning again");
            self.computer.rearm();
        }
        self.sync_computer(now);
        changed
    }

    fn reduce(&mut self, action: &GameAction) -> bool {
        let next = game_reducer(self.state.clone(), action);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    fn sync_computer(&mut self, now: Instant) {
        let Some(piece) = self.computer.sync(&self.state, self.selector.as_mut(), now) else {
            return;
        };
        self.reduce(&GameAction::SelectPiece(piece));
        if self.state.selected_piece.map(|selected| selected.position()) != Some(piece) {
            debug!("computer could not pick up {piece}");
        }
    }

    #[cfg(test)]
    fn set_state_for_test(&mut self, state: GameState) {
        self.state = state;
        self.sync_computer(Instant::now());
    }
}
