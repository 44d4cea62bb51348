use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::rules::{BOARD_SIZE, STARTING_PLAYER, is_move_in_bounds};

const KEY_SEPARATOR: char = ':';

/// A board coordinate. `x` is the column, `y` the row.
///
/// Coordinates are signed so that off-board neighbours can be computed and
/// then rejected with a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Builds an on-board position.
    pub fn try_new(x: i32, y: i32) -> EngineResult<Self> {
        let at = Self::new(x, y);
        if is_move_in_bounds(BOARD_SIZE, at) {
            Ok(at)
        } else {
            Err(EngineError::OutOfBounds { x, y })
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Encodes the position as an `"x:y"` key.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Decodes an `"x:y"` key. Keys must name a square on the board.
    pub fn from_key(key: &str) -> EngineResult<Self> {
        key.parse()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || EngineError::MalformedPositionKey(key.to_string());
        let (x, y) = key.split_once(KEY_SEPARATOR).ok_or_else(malformed)?;
        let x = x.parse::<i32>().map_err(|_| malformed())?;
        let y = y.parse::<i32>().map_err(|_| malformed())?;
        Self::try_new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dark => "dark",
            Self::Light => "light",
        })
    }
}

/// One checker. Its coordinates always match the square it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub is_king: bool,
}

impl Piece {
    pub fn new(at: Position, color: Color) -> Self {
        Self {
            x: at.x,
            y: at.y,
            color,
            is_king: false,
        }
    }

    pub fn king(at: Position, color: Color) -> Self {
        Self {
            is_king: true,
            ..Self::new(at, color)
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Same piece relocated to `to`.
    pub fn moved_to(self, to: Position) -> Self {
        Self {
            x: to.x,
            y: to.y,
            ..self
        }
    }
}

/// A non-capturing diagonal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub from: Position,
    pub to: Position,
}

/// A single jump over `over` onto `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub from: Position,
    pub over: Position,
    pub to: Position,
}

/// Legal move catalogue for one side on one board, keyed by piece position.
///
/// A piece appears in at most one of the two maps: pieces that can capture
/// are listed only under `captures`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSet {
    pub steps: BTreeMap<Position, Vec<Step>>,
    pub captures: BTreeMap<Position, Vec<Capture>>,
}

impl MoveSet {
    /// True when the side has neither steps nor captures.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.captures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub moves: u32,
    pub captures: u32,
}

impl PlayerStats {
    pub const fn new(moves: u32, captures: u32) -> Self {
        Self { moves, captures }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub dark: PlayerStats,
    pub light: PlayerStats,
}

impl Index<Color> for Stats {
    type Output = PlayerStats;

    fn index(&self, color: Color) -> &PlayerStats {
        match color {
            Color::Dark => &self.dark,
            Color::Light => &self.light,
        }
    }
}

impl IndexMut<Color> for Stats {
    fn index_mut(&mut self, color: Color) -> &mut PlayerStats {
        match color {
            Color::Dark => &mut self.dark,
            Color::Light => &mut self.light,
        }
    }
}

/// Counter increments; omitted fields count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsDelta {
    pub moves: u32,
    pub captures: u32,
}

impl StatsDelta {
    /// A finished turn without captures.
    pub const MOVE: Self = Self {
        moves: 1,
        captures: 0,
    };
    /// One hop of a chain that continues.
    pub const CAPTURE: Self = Self {
        moves: 0,
        captures: 1,
    };
    /// A finished turn ending with a capture.
    pub const CAPTURING_MOVE: Self = Self {
        moves: 1,
        captures: 1,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player(Color),
    Draw,
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Player(color) => color.serialize(serializer),
            Self::Draw => serializer.serialize_str("draw"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    PlayerVsPlayer,
    PlayerVsComputer,
}

impl FromStr for GameMode {
    type Err = EngineError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "player-vs-player" => Ok(Self::PlayerVsPlayer),
            "player-vs-computer" => Ok(Self::PlayerVsComputer),
            _ => Err(EngineError::UnknownMode(mode.to_string())),
        }
    }
}

/// Authoritative game snapshot. Replaced, never mutated, on every accepted action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Color,
    pub selected_piece: Option<Piece>,
    /// Set only while a capture chain is in progress: the piece that must keep capturing.
    pub forced_capture_key: Option<Position>,
    pub winner: Option<Winner>,
    pub stats: Stats,
    /// `None` until a mode has been chosen.
    pub mode: Option<GameMode>,
}

impl GameState {
    /// Standard starting position, dark to move, no mode chosen.
    pub fn initial() -> Self {
        Self {
            board: Board::starting(),
            current_player: STARTING_PLAYER,
            selected_piece: None,
            forced_capture_key: None,
            winner: None,
            stats: Stats::default(),
            mode: None,
        }
    }

    /// Game in progress on `board` with `current_player` to move.
    pub fn with_board(board: Board, current_player: Color) -> Self {
        Self {
            board,
            current_player,
            ..Self::initial()
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
