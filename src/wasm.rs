use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::engine::Interactivity;
use crate::game::{GameConfig, GameInstance};
use crate::types::{GameMode, Position};

/// Selectable and disabled pieces as `"x:y"` keys.
#[derive(Debug, Serialize)]
struct InteractivityKeys {
    selectable: Vec<String>,
    disabled: Vec<String>,
}

impl From<Interactivity> for InteractivityKeys {
    fn from(interactivity: Interactivity) -> Self {
        Self {
            selectable: interactivity.selectable.iter().map(Position::key).collect(),
            disabled: interactivity.disabled.iter().map(Position::key).collect(),
        }
    }
}

/// Computer move waiting to be applied; JS fires it after `delay_ms`.
#[derive(Debug, Serialize)]
struct ScheduledMove {
    generation: u32,
    piece: String,
    target: String,
    delay_ms: u32,
}

/// Squares arrive as `(x, y)` numbers or `"x:y"` keys.
#[wasm_bindgen]
pub struct CheckersGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl CheckersGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CheckersGame {
        Self {
            inner: GameInstance::new_with_default_selector(GameConfig::default()),
        }
    }

    /// Full game state snapshot.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.inner.state())?)
    }

    pub fn interactivity(&self) -> Result<JsValue, JsValue> {
        let keys = InteractivityKeys::from(self.inner.interactivity());
        Ok(serde_wasm_bindgen::to_value(&keys)?)
    }

    /// Destination keys of the selected piece; empty when nothing is selected.
    #[wasm_bindgen(js_name = moveTargets)]
    pub fn move_targets(&self) -> Vec<String> {
        self.inner
            .move_targets()
            .map(|targets| targets.iter().map(Position::key).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = hasCaptures)]
    pub fn has_captures(&self) -> bool {
        self.inner.has_captures()
    }

    #[wasm_bindgen(js_name = isComputerTurn)]
    pub fn is_computer_turn(&self) -> bool {
        self.inner.is_computer_turn()
    }

    #[wasm_bindgen(js_name = selectPiece)]
    pub fn select_piece(&mut self, x: i32, y: i32) -> Result<bool, JsError> {
        Ok(self.inner.select_piece(Position::try_new(x, y)?))
    }

    #[wasm_bindgen(js_name = selectPieceByKey)]
    pub fn select_piece_by_key(&mut self, key: &str) -> Result<bool, JsError> {
        Ok(self.inner.select_piece(Position::from_key(key)?))
    }

    #[wasm_bindgen(js_name = deselectPiece)]
    pub fn deselect_piece(&mut self, x: i32, y: i32) -> Result<bool, JsError> {
        Ok(self.inner.deselect_piece(Position::try_new(x, y)?))
    }

    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, x: i32, y: i32) -> Result<bool, JsError> {
        Ok(self.inner.apply_move(Position::try_new(x, y)?)?)
    }

    #[wasm_bindgen(js_name = applyMoveByKey)]
    pub fn apply_move_by_key(&mut self, key: &str) -> Result<bool, JsError> {
        Ok(self.inner.apply_move(Position::from_key(key)?)?)
    }

    /// Accepts `"player-vs-player"` or `"player-vs-computer"`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<bool, JsError> {
        Ok(self.inner.set_mode(mode.parse::<GameMode>()?))
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> bool {
        self.inner.new_game()
    }

    /// The computer's scheduled move, or `undefined` when none is pending.
    #[wasm_bindgen(js_name = pendingComputerMove)]
    pub fn pending_computer_move(&self) -> Result<JsValue, JsValue> {
        let delay_ms = u32::try_from(self.inner.computer_delay().as_millis()).unwrap_or(u32::MAX);
        let scheduled = self.inner.pending_computer_move().map(|pending| ScheduledMove {
            generation: pending.generation,
            piece: pending.piece.key(),
            target: pending.target.key(),
            delay_ms,
        });
        Ok(serde_wasm_bindgen::to_value(&scheduled)?)
    }

    /// Called from a `setTimeout` armed with the generation of
    /// `pendingComputerMove()`. Stale generations are ignored.
    #[wasm_bindgen(js_name = fireComputerMove)]
    pub fn fire_computer_move(&mut self, generation: u32) -> bool {
        self.inner.fire_computer_move(generation)
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}
