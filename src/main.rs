//! Terminal runner for the blockfall simulation.
//!
//! Owns the frame cadence and the keyboard: key events are translated into
//! abstract commands, the session is ticked with a monotonic millisecond
//! clock, and each frame renders a snapshot. The simulation itself never
//! sees a key code or an `Instant`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::input::{map_key, map_key_release, should_quit};
use blockfall::term::{Frame, GameView, Screen, Viewport};
use blockfall::types::{Command, SOFT_DROP_GRACE_MS, TICK_MS};

fn main() -> Result<()> {
    let seed = std::process::id();
    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen, seed);

    // Always try to restore the terminal state.
    let _ = screen.exit();
    result
}

fn run(screen: &mut Screen, seed: u32) -> Result<()> {
    let mut session = GameSession::new(seed);
    session.start();

    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut frame = Frame::new(0, 0);

    let clock = Instant::now();
    let mut last_frame = Instant::now();
    let frame_duration = Duration::from_millis(TICK_MS);

    // Terminals without key-release events never send SoftDropOff; a short
    // grace timeout after the last Down press stands in for the release.
    let mut soft_drop_deadline: Option<u64> = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut frame);
        screen.draw_swap(&mut frame)?;

        // Poll input until the next frame is due.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(command) = map_key(key) {
                            if command == Command::SoftDropOn {
                                soft_drop_deadline =
                                    Some(clock.elapsed().as_millis() as u64 + SOFT_DROP_GRACE_MS);
                            }
                            session.apply(command);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(command) = map_key_release(key) {
                            soft_drop_deadline = None;
                            session.apply(command);
                        }
                    }
                },
                Event::Resize(_, _) => screen.invalidate(),
                _ => {}
            }
        }

        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            let now_ms = clock.elapsed().as_millis() as u64;

            if let Some(deadline) = soft_drop_deadline {
                if now_ms >= deadline {
                    soft_drop_deadline = None;
                    session.apply(Command::SoftDropOff);
                }
            }

            session.tick(now_ms);

            // Mirror pause flips with a full repaint so the overlay never
            // leaves residue behind in diffed draws.
            if session.take_pause_change().is_some() {
                screen.invalidate();
            }
        }
    }
}
