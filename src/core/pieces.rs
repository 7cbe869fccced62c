//! Tetromino catalog, placement oracle, and kick rotation.
//!
//! Each kind carries an ordered list of rotation states, authored once and
//! never mutated. Congruent orientations are not duplicated: O has a single
//! state, I/S/Z have two, J/L/T have four. Rotation indices are taken modulo
//! the state count, which is how symmetric pieces cycle correctly.
//!
//! Rotation uses a fixed five-offset correction list rather than a
//! per-transition kick table. This is a deliberate simplification of the
//! standard rotation system; the tie-break order below is frozen behavior
//! and must not be reordered.

use crate::core::board::Board;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Offset of a single mino relative to the piece anchor, y counted upward.
pub type MinoOffset = (i8, i8);

/// One rotation state - 4 mino offsets.
pub type RotationState = [MinoOffset; 4];

const I_STATES: [RotationState; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const J_STATES: [RotationState; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [RotationState; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const O_STATES: [RotationState; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const S_STATES: [RotationState; 2] = [
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const T_STATES: [RotationState; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_STATES: [RotationState; 2] = [
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

/// Positional corrections tried, in order, when a raw rotation is illegal.
/// The first oracle-approved offset wins; order is significant.
const KICK_OFFSETS: [(i8, i8); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];

/// Ordered rotation-state list for a kind.
pub fn rotation_states(kind: PieceKind) -> &'static [RotationState] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Shape for a kind at a rotation index (taken modulo the state count).
pub fn get_shape(kind: PieceKind, rotation: u8) -> RotationState {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// Absolute board cells of a placement.
pub fn cells_at(kind: PieceKind, rotation: u8, x: i8, y: i8) -> [(i8, i8); 4] {
    let shape = get_shape(kind, rotation);
    shape.map(|(dx, dy)| (x + dx, y + dy))
}

/// The collision/placement oracle: can this placement occupy the board?
///
/// True iff all 4 cells are inside the board and empty. Movement, rotation,
/// spawn, and drop legality all route through here. No side effects.
pub fn can_place(board: &Board, kind: PieceKind, rotation: u8, x: i8, y: i8) -> bool {
    cells_at(kind, rotation, x, y)
        .iter()
        .all(|&(cx, cy)| board.is_valid(cx, cy))
}

/// Spawn anchor for a kind: the first rotation state horizontally centered
/// over the board (floor division) with its topmost occupied offset on the
/// top row.
pub fn spawn_anchor(kind: PieceKind) -> (i8, i8) {
    let shape = get_shape(kind, 0);
    let min_x = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
    let max_x = shape.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
    let max_y = shape.iter().map(|&(_, dy)| dy).max().unwrap_or(0);

    let width = max_x - min_x + 1;
    let x = (BOARD_WIDTH as i8 - width) / 2 - min_x;
    let y = (BOARD_HEIGHT as i8 - 1) - max_y;
    (x, y)
}

/// Attempt a rotation to the next state with positional correction.
///
/// Returns the new rotation index and the accepted kick offset, or `None`
/// when all five corrections are rejected by the oracle (the piece stays
/// put). Kinds with a single rotation state cannot change and report `None`.
pub fn try_rotate(
    board: &Board,
    kind: PieceKind,
    rotation: u8,
    x: i8,
    y: i8,
) -> Option<(u8, (i8, i8))> {
    let states = rotation_states(kind);
    if states.len() == 1 {
        return None;
    }

    let next = ((rotation as usize + 1) % states.len()) as u8;
    for &(dx, dy) in KICK_OFFSETS.iter() {
        if can_place(board, kind, next, x + dx, y + dy) {
            return Some((next, (dx, dy)));
        }
    }

    None
}
