//! Screen: flushes frames to a real terminal.
//!
//! Owns the raw-mode/alternate-screen session and encodes crossterm commands
//! into an internal byte buffer before a single write per frame. Redraws are
//! damage-diffed against the previous frame as coalesced changed runs;
//! `invalidate` forces the next draw to repaint everything (resize, overlay
//! transitions).

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::term::frame::{Frame, Rgb, Style};

pub struct Screen {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame, swapping it into internal state so the caller can keep
    /// reusing its own `Frame` without cloning.
    pub fn draw_swap(&mut self, frame: &mut Frame) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                self.buf.clear();
                encode_diff_into(&prev, frame, &mut self.buf)?;
                prev
            }
            _ => {
                self.buf.clear();
                encode_full_into(frame, &mut self.buf)?;
                Frame::new(frame.width(), frame.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, frame);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame repaint into `out`.
fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style: Option<Style> = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..frame.width() {
            let glyph = frame.get(x, y).unwrap_or_default();
            if current_style != Some(glyph.style) {
                apply_style_into(out, glyph.style)?;
                current_style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed runs between two same-sized frames into `out`.
fn encode_diff_into(prev: &Frame, next: &Frame, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style: Option<Style> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(glyph.style) {
                apply_style_into(out, glyph.style)?;
                current_style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Invoke `f(x, y, len)` for each horizontal run of differing glyphs.
/// Precondition: `prev` and `next` have equal dimensions.
fn for_each_changed_run(
    prev: &Frame,
    next: &Frame,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
