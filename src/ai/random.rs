use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, IteratorRandom};
use rand::{Rng, SeedableRng};

use crate::ai::{AiMove, MoveSelector};
use crate::types::{MoveSet, Position};

/// Random legal move with capture priority:
/// the forced chain first, then any capture, then any step.
///
/// Pieces are drawn uniformly, then one of the chosen piece's moves.
pub fn pick_ai_move<R: Rng + ?Sized>(
    moves: &MoveSet,
    forced_capture_key: Option<Position>,
    rng: &mut R,
) -> Option<AiMove> {
    if let Some(forced) = forced_capture_key
        && let Some(captures) = moves.captures.get(&forced)
        && let Some(capture) = captures.choose(rng)
    {
        return Some(AiMove::new(forced, capture.to));
    }

    if let Some((&piece, captures)) = moves.captures.iter().choose(rng) {
        let capture = captures.choose(rng)?;
        return Some(AiMove::new(piece, capture.to));
    }

    let (&piece, steps) = moves.steps.iter().choose(rng)?;
    let step = steps.choose(rng)?;
    Some(AiMove::new(piece, step.to))
}

/// Uniformly random selector backed by a small fast RNG.
#[derive(Debug, Clone)]
pub struct RandomMoveSelector {
    rng: SmallRng,
}

impl RandomMoveSelector {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(
        &mut self,
        moves: &MoveSet,
        forced_capture_key: Option<Position>,
    ) -> Option<AiMove> {
        pick_ai_move(moves, forced_capture_key, &mut self.rng)
    }
}

/// Deterministic selector: same priorities, always the first candidate in
/// board order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstMoveSelector;

impl MoveSelector for FirstMoveSelector {
    fn select_move(
        &mut self,
        moves: &MoveSet,
        forced_capture_key: Option<Position>,
    ) -> Option<AiMove> {
        if let Some(forced) = forced_capture_key
            && let Some(capture) = moves.captures.get(&forced).and_then(|captures| captures.first())
        {
            return Some(AiMove::new(forced, capture.to));
        }

        let from_captures = moves
            .captures
            .iter()
            .find_map(|(&piece, captures)| captures.first().map(|capture| (piece, capture.to)));
        let (piece, target) = from_captures.or_else(|| {
            moves
                .steps
                .iter()
                .find_map(|(&piece, steps)| steps.first().map(|step| (piece, step.to)))
        })?;

        Some(AiMove::new(piece, target))
    }
}
