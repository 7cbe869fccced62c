//! Core simulation - pure game rules with no I/O dependencies.
//!
//! Everything in this module is deterministic given a seed and a stream of
//! timestamps and commands. It never touches the terminal, the clock, or any
//! other ambient facility, so sessions can run headless (tests, benches) and
//! several sessions can coexist without cross-contamination.
//!
//! - [`board`]: 10x20 occupancy grid with line-clear compaction
//! - [`pieces`]: tetromino catalog, placement oracle, and kick rotation
//! - [`session`]: active-piece state machine, gravity scheduler, lifecycle
//! - [`rng`]: deterministic uniform piece sampling
//! - [`snapshot`]: read-only state exports for rendering collaborators

pub mod board;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use board::Board;
pub use pieces::{can_place, cells_at, get_shape, spawn_anchor, try_rotate};
pub use rng::{PieceSampler, SimpleRng};
pub use session::{ActivePiece, GameSession};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
