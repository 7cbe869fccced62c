//! blockfall - a falling-block puzzle simulation with a terminal front end.
//!
//! The interesting part lives in [`core`]: a pure, deterministic game engine
//! (board, piece state machine, placement oracle, gravity scheduler, session
//! lifecycle) that consumes only millisecond timestamps and abstract
//! [`types::Command`] values, and exposes state through read-only snapshots.
//! [`input`] and [`term`] are thin collaborators - key translation in, frame
//! rendering out - and the simulation has zero dependency on either.
//!
//! # Example
//!
//! ```
//! use blockfall::core::GameSession;
//! use blockfall::types::Command;
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! let snapshot = game.snapshot();
//! assert!(!snapshot.game_over());
//! ```

pub mod core;
pub mod input;
pub mod term;
pub mod types;
