//! Game session - the active-piece state machine, gravity scheduler, and
//! lifecycle controller.
//!
//! A `GameSession` owns the board/active-piece pair exclusively and is the
//! single mutation entry point: one `tick` per frame plus synchronous command
//! handlers, all on one thread. Geometry-altering requests resolve to
//! success/failure through the placement oracle; failure is a normal policy
//! outcome, not an error. The one terminal condition is game over, reported
//! through the phase, never thrown.

use crate::core::board::Board;
use crate::core::pieces::{can_place, cells_at, spawn_anchor, try_rotate};
use crate::core::rng::PieceSampler;
use crate::core::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    Command, GamePhase, LockEvent, PieceKind, BOARD_HEIGHT, DROP_INTERVAL_MS,
    SOFT_DROP_INTERVAL_MS,
};

/// The falling piece: kind, rotation index, and anchor position.
///
/// Exists only while falling and controllable - cleared at lock time,
/// recreated at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Absolute board cells occupied by this piece.
    pub fn cells(&self) -> [(i8, i8); 4] {
        cells_at(self.kind, self.rotation, self.x, self.y)
    }

    /// Whether the piece legally occupies `board` at its current placement.
    pub fn is_valid(&self, board: &Board) -> bool {
        can_place(board, self.kind, self.rotation, self.x, self.y)
    }
}

/// A complete, self-contained game session.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Option<ActivePiece>,
    sampler: PieceSampler,
    started: bool,
    paused: bool,
    game_over: bool,
    soft_drop: bool,
    /// Timestamp of the last gravity step; `None` until the first tick after
    /// (re)start so the interval is measured from when play resumes.
    last_step_ms: Option<u64>,
    last_lock: Option<LockEvent>,
    pause_changed: Option<bool>,
}

impl GameSession {
    /// Create a session with the given RNG seed. Play begins at `start`.
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            sampler: PieceSampler::new(seed),
            started: false,
            paused: false,
            game_over: false,
            soft_drop: false,
            last_step_ms: None,
            last_lock: None,
            pause_changed: None,
        }
    }

    /// Create an already-started session over a prefilled board, with no
    /// active piece. Callers drive it from there (usually via `spawn`).
    /// Used by tests, benches, and scenario tooling.
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut session = Self::new(seed);
        session.board = board;
        session.started = true;
        session
    }

    /// Begin play: runs a full reset and spawns the first piece. Subsequent
    /// calls are no-ops; use `restart` to reset mid-game.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.restart();
    }

    /// Full reset: empty board, cleared game-over, fresh timers, new spawn.
    /// Callable at any time, including mid-game and during game over. Leaves
    /// the paused flag untouched; the RNG sequence continues rather than
    /// replaying from the original seed.
    pub fn restart(&mut self) {
        self.board.reset();
        self.active = None;
        self.game_over = false;
        self.soft_drop = false;
        self.last_step_ms = None;
        self.last_lock = None;
        self.started = true;
        self.spawn();
    }

    /// Draw a kind and place it at its spawn anchor. If the oracle rejects
    /// the placement the session transitions to game over with no active
    /// piece. Returns whether a piece was spawned.
    pub fn spawn(&mut self) -> bool {
        let kind = self.sampler.draw();
        let (x, y) = spawn_anchor(kind);

        if !can_place(&self.board, kind, 0, x, y) {
            self.active = None;
            self.game_over = true;
            return false;
        }

        self.active = Some(ActivePiece {
            kind,
            rotation: 0,
            x,
            y,
        });
        true
    }

    /// Try to move the active piece by `(dx, dy)`. Commits and returns true
    /// only when the oracle approves the candidate placement; otherwise the
    /// piece stays put. Left/right use `(+-1, 0)`, gravity and soft stepping
    /// use `(0, -1)`.
    pub fn move_by(&mut self, dx: i8, dy: i8) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if !can_place(
            &self.board,
            active.kind,
            active.rotation,
            active.x + dx,
            active.y + dy,
        ) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    /// Advance the active piece to its next rotation state, with positional
    /// correction. Fails (piece unchanged) when every correction is illegal
    /// or the kind has a single rotation state.
    pub fn rotate(&mut self) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&self.board, active.kind, active.rotation, active.x, active.y) {
            Some((rotation, (dx, dy))) => {
                self.active = Some(ActivePiece {
                    rotation,
                    x: active.x + dx,
                    y: active.y + dy,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Drop the active piece straight to the floor and lock it, all within
    /// this call - no intermediate frames, no interval timing.
    pub fn hard_drop(&mut self) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        if self.active.is_none() {
            return false;
        }

        while self.move_by(0, -1) {}
        self.lock_active();
        if !self.game_over {
            self.spawn();
        }
        true
    }

    /// Engage or release soft drop. A held flag, not a one-shot: it only
    /// shortens the gravity interval. Engaging is refused while paused or
    /// game over; releasing is always accepted so a key release can never be
    /// lost across a pause. Returns whether the flag changed.
    pub fn set_soft_drop(&mut self, on: bool) -> bool {
        if on && (self.paused || self.game_over) {
            return false;
        }
        let changed = self.soft_drop != on;
        self.soft_drop = on;
        changed
    }

    /// Scheduler tick, invoked once per rendered frame with a monotonic
    /// millisecond timestamp. A pure gate while paused or game over. Steps
    /// gravity once the configured interval has elapsed; a failed step locks
    /// the piece, clears rows, and respawns unless the game ended. Returns
    /// whether any state changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }
        if self.active.is_none() {
            return false;
        }

        let last = *self.last_step_ms.get_or_insert(now_ms);
        let interval = if self.soft_drop {
            SOFT_DROP_INTERVAL_MS
        } else {
            DROP_INTERVAL_MS
        };
        if now_ms.saturating_sub(last) <= interval {
            return false;
        }
        self.last_step_ms = Some(now_ms);

        if self.move_by(0, -1) {
            return true;
        }

        self.lock_active();
        if !self.game_over {
            self.spawn();
        }
        true
    }

    /// Commit the active piece into the board, clear full rows, and emit the
    /// lock notification. Material left at or beyond the top boundary ends
    /// the game after the lock and clear are applied.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let cells = active.cells();
        let overflow = cells.iter().any(|&(_, cy)| cy >= BOARD_HEIGHT as i8);

        self.board.lock(active.kind, &cells);
        let cleared = self.board.clear_full_rows();

        if overflow {
            self.game_over = true;
        }
        self.last_lock = Some(LockEvent {
            lines_cleared: cleared.len() as u8,
            overflow,
        });
    }

    /// Pause or resume. Orthogonal to game over; a paused game-over session
    /// is representable but inert. Fires the pause notification on change.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.pause_changed = Some(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Drain the pause notification (latest value wins). External UI mirrors
    /// the paused flag from this channel.
    pub fn take_pause_change(&mut self) -> Option<bool> {
        self.pause_changed.take()
    }

    /// Drain the most recent lock notification.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Dispatch one command from the abstract input stream. Returns whether
    /// the command changed state. While game over, only restart and the
    /// pause toggle are accepted; everything else is silently ignored.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_by(-1, 0),
            Command::MoveRight => self.move_by(1, 0),
            Command::Rotate => self.rotate(),
            Command::SoftDropOn => self.set_soft_drop(true),
            Command::SoftDropOff => self.set_soft_drop(false),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => {
                let next = !self.paused;
                self.set_paused(next);
                true
            }
            Command::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Current phase. Lock transitions complete synchronously, so observers
    /// only ever see `Spawning` (no piece yet), `Falling`, or `GameOver`.
    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.active.is_some() {
            GamePhase::Falling
        } else {
            GamePhase::Spawning
        }
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Write the observable state into a caller-owned snapshot buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.phase = self.phase();
        out.paused = self.paused;
    }

    /// Allocate-and-fill convenience for non-hot paths.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = GameSession::new(12345);
        assert!(!session.started());
        assert!(!session.game_over());
        assert!(!session.is_paused());
        assert!(session.active().is_none());
        assert_eq!(session.phase(), GamePhase::Spawning);
    }

    #[test]
    fn start_spawns_once() {
        let mut session = GameSession::new(12345);
        session.start();
        assert!(session.started());
        let first = session.active().expect("spawned piece");
        assert_eq!(session.phase(), GamePhase::Falling);

        // Second start is a no-op, not a respawn.
        session.start();
        assert_eq!(session.active(), Some(first));
    }

    #[test]
    fn spawned_piece_cannot_move_up() {
        let mut session = GameSession::new(12345);
        session.start();
        // Spawn puts the topmost cell on the top row already.
        assert!(!session.move_by(0, 1));
        assert!(session.move_by(0, -1));
    }

    #[test]
    fn horizontal_moves_commit_or_refuse() {
        let mut session = GameSession::new(12345);
        session.start();
        let x0 = session.active().unwrap().x;

        assert!(session.move_by(1, 0));
        assert_eq!(session.active().unwrap().x, x0 + 1);
        assert!(session.move_by(-1, 0));
        assert_eq!(session.active().unwrap().x, x0);

        let mut moved = 0;
        for _ in 0..12 {
            if session.move_by(-1, 0) {
                moved += 1;
            }
        }
        assert!(moved <= 5, "wall must stop the piece");
    }

    #[test]
    fn gravity_steps_strictly_after_interval() {
        let mut session = GameSession::new(12345);
        session.start();
        let y0 = session.active().unwrap().y;

        // First tick only records the timestamp.
        assert!(!session.tick(1000));
        assert_eq!(session.active().unwrap().y, y0);

        // Exactly the interval: not yet (strict comparison).
        assert!(!session.tick(1000 + DROP_INTERVAL_MS));
        assert_eq!(session.active().unwrap().y, y0);

        assert!(session.tick(1000 + DROP_INTERVAL_MS + 1));
        assert_eq!(session.active().unwrap().y, y0 - 1);
    }

    #[test]
    fn soft_drop_shortens_interval_only() {
        let mut session = GameSession::new(12345);
        session.start();
        let y0 = session.active().unwrap().y;

        assert!(!session.tick(0));
        assert!(session.set_soft_drop(true));
        assert!(!session.tick(SOFT_DROP_INTERVAL_MS));
        assert!(session.tick(SOFT_DROP_INTERVAL_MS + 1));
        assert_eq!(session.active().unwrap().y, y0 - 1);

        // Releasing restores the normal cadence.
        assert!(session.set_soft_drop(false));
        assert!(!session.tick(SOFT_DROP_INTERVAL_MS + 1 + SOFT_DROP_INTERVAL_MS + 1));
    }

    #[test]
    fn pause_is_a_pure_gate() {
        let mut session = GameSession::new(12345);
        session.start();
        let piece = session.active().unwrap();

        session.set_paused(true);
        assert!(!session.tick(10_000));
        assert!(!session.move_by(-1, 0));
        assert!(!session.rotate());
        assert!(!session.hard_drop());
        assert!(!session.set_soft_drop(true));
        assert_eq!(session.active(), Some(piece));

        session.set_paused(false);
        assert!(session.move_by(-1, 0));
    }

    #[test]
    fn pause_notification_fires_on_change_only() {
        let mut session = GameSession::new(12345);
        assert_eq!(session.take_pause_change(), None);

        session.set_paused(true);
        session.set_paused(true);
        assert_eq!(session.take_pause_change(), Some(true));
        assert_eq!(session.take_pause_change(), None);

        session.apply(Command::TogglePause);
        assert_eq!(session.take_pause_change(), Some(false));
    }

    #[test]
    fn hard_drop_locks_and_respawns() {
        let mut session = GameSession::new(12345);
        session.start();
        let kind = session.active().unwrap().kind;

        assert!(session.hard_drop());
        let event = session.take_last_lock().expect("lock event");
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.overflow);

        // Material settled on the floor region, and a new piece is falling.
        assert!(session.board().cells().iter().filter(|c| c.is_some()).count() == 4);
        assert!(session
            .board()
            .cells()
            .iter()
            .any(|&c| c == Some(kind)));
        assert_eq!(session.phase(), GamePhase::Falling);
    }

    #[test]
    fn restart_keeps_paused_flag() {
        let mut session = GameSession::new(12345);
        session.start();
        session.set_paused(true);
        let _ = session.take_pause_change();

        session.restart();
        assert!(session.is_paused());
        assert!(!session.game_over());
        assert_eq!(session.phase(), GamePhase::Falling);
        assert_eq!(session.take_pause_change(), None);
    }

    #[test]
    fn commands_ignored_while_game_over_except_restart_and_pause() {
        let mut board = Board::new();
        for y in 17..20 {
            for x in 0..10 {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
        let mut session = GameSession::with_board(12345, board);
        assert!(!session.spawn());
        assert!(session.game_over());
        assert_eq!(session.phase(), GamePhase::GameOver);

        assert!(!session.apply(Command::MoveLeft));
        assert!(!session.apply(Command::MoveRight));
        assert!(!session.apply(Command::Rotate));
        assert!(!session.apply(Command::HardDrop));
        assert!(!session.apply(Command::SoftDropOn));
        assert!(!session.tick(10_000));

        assert!(session.apply(Command::TogglePause));
        assert!(session.is_paused());
        assert!(session.apply(Command::Restart));
        assert!(!session.game_over());
        assert!(session.is_paused());
    }
}
