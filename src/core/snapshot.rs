//! Read-only state exports for rendering collaborators.
//!
//! Rendering is a one-way consumer: it reads a snapshot after the session
//! mutates and never writes simulation state. `snapshot_into` reuses a
//! caller-owned buffer so the per-frame path allocates nothing.

use crate::core::session::ActivePiece;
use crate::types::{Cell, GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The active piece as seen by consumers: placement plus absolute cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub cells: [(i8, i8); 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(piece: ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            cells: piece.cells(),
        }
    }
}

/// Full observable state of a session at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Occupancy grid, `board[y][x]`, row 0 at the bottom.
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub phase: GamePhase,
    pub paused: bool,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn playable(&self) -> bool {
        !self.game_over() && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            phase: GamePhase::Spawning,
            paused: false,
        }
    }
}
