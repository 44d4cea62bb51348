use thiserror::Error;

/// Misuse at the boundary. Illegal moves are no-ops, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Position key is not of the form `x:y`.
    #[error("Malformed position key: {0:?} (expected \"x:y\")")]
    MalformedPositionKey(String),

    /// Coordinates outside the 8x8 board
    #[error("Position ({x}, {y}) is off the board")]
    OutOfBounds { x: i32, y: i32 },

    /// A move was applied while no piece was selected
    #[error("No piece is selected")]
    NoSelection,

    #[error("Unknown game mode: {0:?}")]
    UnknownMode(String),
}

/// Result type alias for boundary operations
pub type EngineResult<T> = Result<T, EngineError>;
