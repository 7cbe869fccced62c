//! Shared types and constants.
//!
//! Pure data with no external dependencies, usable from the simulation core,
//! input translation, and terminal rendering alike.
//!
//! Coordinates are `(x, y)` with x in `0..BOARD_WIDTH` (left to right) and
//! y in `0..BOARD_HEIGHT` counted from the **bottom**: row 0 is the floor,
//! row `BOARD_HEIGHT - 1` is the top row. Gravity moves pieces toward y = 0.

/// Board dimensions (columns x rows). Fixed for the session lifetime.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval between downward steps, in milliseconds.
pub const DROP_INTERVAL_MS: u64 = 800;

/// Gravity interval while soft drop is held.
pub const SOFT_DROP_INTERVAL_MS: u64 = 60;

/// Frame cadence for the terminal runner (~60 FPS). The core itself is
/// frame-rate agnostic and only consumes timestamps.
pub const TICK_MS: u64 = 16;

/// How long a soft drop stays engaged after the last Down key event, for
/// terminals that never deliver key-release events.
pub const SOFT_DROP_GRACE_MS: u64 = 150;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Display letter for UI layers.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// Cell on the board (`None` = empty, `Some` = settled material of a kind).
///
/// Occupancy never references a piece object after locking.
pub type Cell = Option<PieceKind>;

/// Lifecycle phase of a game session.
///
/// `Locking` is an instantaneous internal transition: locking, line clearing,
/// and the follow-up spawn all complete synchronously within one call, so a
/// snapshot only ever observes `Spawning`, `Falling`, or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Spawning,
    Falling,
    Locking,
    GameOver,
}

/// Abstract command stream consumed by the session.
///
/// This is the entire input surface of the simulation; key bindings, DAS
/// behavior, and other input technology concerns live with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDropOn,
    SoftDropOff,
    HardDrop,
    TogglePause,
    Restart,
}

/// Notification emitted when a piece locks into the board.
///
/// Consumed by observers via `GameSession::take_last_lock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Rows cleared by this lock (0-4).
    pub lines_cleared: u8,
    /// The lock left material at or beyond the top boundary, ending the game.
    pub overflow: bool,
}
