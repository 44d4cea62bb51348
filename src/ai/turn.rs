use std::time::Duration;

use log::{debug, trace};
use serde::Serialize;
use web_time::Instant;

use crate::ai::{AiMove, MoveSelector};
use crate::engine::select_all_moves_per_turn;
use crate::types::{Color, GameMode, GameState, Position};

/// A computer move waiting for its thinking delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingMove {
    pub generation: u32,
    #[serde(skip)]
    pub due: Instant,
    pub piece: Position,
    pub target: Position,
}

/// Single-slot scheduler for the computer's delayed move.
///
/// At most one move is pending. Scheduling a new move or leaving the
/// computer's turn cancels the previous one; every schedule gets a fresh
/// generation so that stale timers can be told apart when they fire.
#[derive(Debug, Clone)]
pub struct ComputerTurn {
    color: Color,
    delay: Duration,
    generation: u32,
    pending: Option<PendingMove>,
    /// Forced-capture key of the turn already handled, if any.
    armed_for: Option<Option<Position>>,
}

impl ComputerTurn {
    pub fn new(color: Color, delay: Duration) -> Self {
        Self {
            color,
            delay,
            generation: 0,
            pending: None,
            armed_for: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_computer_turn(&self, state: &GameState) -> bool {
        state.mode == Some(GameMode::PlayerVsComputer)
            && state.winner.is_none()
            && state.current_player == self.color
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    /// Reacts to a new game state.
    ///
    /// Returns the piece the computer selects right away when a move was
    /// just scheduled. Repeated calls for the same turn do nothing.
    pub fn sync(
        &mut self,
        state: &GameState,
        selector: &mut dyn MoveSelector,
        now: Instant,
    ) -> Option<Position> {
        if !self.is_computer_turn(state) {
            self.cancel();
            self.armed_for = None;
            return None;
        }

        // A new link in a capture chain is a new turn for scheduling purposes.
        if self.armed_for == Some(state.forced_capture_key) {
            return None;
        }
        self.cancel();
        self.armed_for = Some(state.forced_capture_key);

        let moves = select_all_moves_per_turn(state);
        let AiMove { piece, target } = selector.select_move(&moves, state.forced_capture_key)?;

        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingMove {
            generation: self.generation,
            due: now + self.delay,
            piece,
            target,
        });
        debug!(
            "computer ({}) plans {piece} -> {target}, generation {}",
            self.color, self.generation
        );
        Some(piece)
    }

    /// Drops the pending move, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!("cancelled computer move generation {}", pending.generation);
        }
    }

    /// Forgets the turn already handled so that the next `sync` plans again.
    pub fn rearm(&mut self) {
        self.cancel();
        self.armed_for = None;
    }

    /// Releases the pending target once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<Position> {
        let due = self.pending.as_ref()?.due;
        if now < due {
            return None;
        }
        self.pending.take().map(|pending| pending.target)
    }

    /// Releases the pending target for an external timer, but only if
    /// `generation` is still the current schedule.
    pub fn fire(&mut self, generation: u32) -> Option<Position> {
        match self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                Some(pending.target)
            }
            _ => {
                trace!("ignoring stale computer timer {generation}");
                None
            }
        }
    }
}
