//! Terminal presentation layer.
//!
//! A one-way consumer of [`crate::core::GameSnapshot`]: it reads snapshots
//! after each mutation and never writes simulation state. [`view`] projects
//! a snapshot into a styled character [`frame::Frame`]; [`screen`] flushes
//! frames to the terminal with damage-diff redraws.

pub mod frame;
pub mod screen;
pub mod view;

pub use frame::{Frame, Glyph, Rgb, Style};
pub use screen::Screen;
pub use view::{GameView, Viewport};
