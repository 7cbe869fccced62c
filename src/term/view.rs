//! GameView: projects a `GameSnapshot` into a terminal frame.
//!
//! Pure (no I/O), so it is unit-testable. The board is drawn with row 0 at
//! the bottom of the well, matching the simulation's coordinate system.

use crate::core::GameSnapshot;
use crate::term::frame::{Frame, Rgb, Style};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight renderer for the game state.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render into an existing frame. Callers reuse one frame across frames
    /// and only pay a resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, frame: &mut Frame) {
        frame.resize(viewport.width, viewport.height);
        frame.clear(Style::default());

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well = Style {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(16, 16, 18),
            bold: false,
            dim: false,
        };
        let border = Style {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        frame.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', well);
        self.draw_border(frame, start_x, start_y, frame_w, frame_h, border);

        // Settled material.
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match snap.board[y as usize][x as usize] {
                    Some(kind) => self.draw_board_cell(frame, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(frame, start_x, start_y, x, y),
                }
            }
        }

        // Falling piece on top.
        if let Some(active) = snap.active {
            for &(x, y) in active.cells.iter() {
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(frame, start_x, start_y, x, y, active.kind);
                }
            }
        }

        self.draw_side_panel(frame, snap, viewport, start_x, start_y, frame_w);

        if snap.paused {
            self.draw_overlay_text(frame, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.game_over() {
            self.draw_overlay_text(frame, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a fresh frame.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let mut frame = Frame::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut frame);
        frame
    }

    /// Terminal row for a board row (row 0 sits at the bottom of the well).
    fn cell_origin(&self, start_x: u16, start_y: u16, x: i8, y: i8) -> (u16, u16) {
        let flipped = (BOARD_HEIGHT as i8 - 1 - y) as u16;
        let px = start_x + 1 + (x as u16) * self.cell_w;
        let py = start_y + 1 + flipped * self.cell_h;
        (px, py)
    }

    fn draw_board_cell(&self, frame: &mut Frame, start_x: u16, start_y: u16, x: i8, y: i8, kind: PieceKind) {
        let style = Style {
            fg: piece_color(kind),
            bg: Rgb::new(16, 16, 18),
            bold: true,
            dim: false,
        };
        let (px, py) = self.cell_origin(start_x, start_y, x, y);
        frame.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_empty_cell(&self, frame: &mut Frame, start_x: u16, start_y: u16, x: i8, y: i8) {
        let style = Style {
            fg: Rgb::new(70, 70, 80),
            bg: Rgb::new(16, 16, 18),
            bold: false,
            dim: true,
        };
        let (px, py) = self.cell_origin(start_x, start_y, x, y);
        frame.fill_rect(px, py, self.cell_w, self.cell_h, '·', style);
    }

    fn draw_border(&self, frame: &mut Frame, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }

        frame.put_char(x, y, '┌', style);
        frame.put_char(x + w - 1, y, '┐', style);
        frame.put_char(x, y + h - 1, '└', style);
        frame.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            frame.put_char(x + dx, y, '─', style);
            frame.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            frame.put_char(x, y + dy, '│', style);
            frame.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        frame: &mut Frame,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = Style {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let hint = Style { dim: true, ..value };

        let mut y = start_y;
        frame.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        frame.put_str(panel_x, y, phase_label(snap), value);
        y = y.saturating_add(2);

        frame.put_str(panel_x, y, "PIECE", label);
        y = y.saturating_add(1);
        let letter = snap
            .active
            .map(|a| a.kind.letter())
            .unwrap_or('-');
        frame.put_char(panel_x, y, letter, value);
        y = y.saturating_add(2);

        frame.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        for line in [
            "← → move",
            "↑ rotate",
            "↓ soft drop",
            "space drop",
            "p pause",
            "r restart",
            "q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            frame.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        frame: &mut Frame,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = Style {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        frame.put_str(x, mid_y, text, style);
    }
}

/// Piece palette, matching the classic assignments (cyan I, blue J, orange
/// L, yellow O, green S, amber T, red Z).
fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::J => Rgb::new(80, 120, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::T => Rgb::new(255, 193, 60),
        PieceKind::Z => Rgb::new(255, 0, 0),
    }
}

fn phase_label(snap: &GameSnapshot) -> &'static str {
    if snap.paused {
        return "paused";
    }
    match snap.phase {
        GamePhase::GameOver => "game over",
        GamePhase::Falling => "falling",
        GamePhase::Spawning | GamePhase::Locking => "starting",
    }
}
