//! SRS wall kicks, y up. The caller tries the unkicked pose first.

use versus_core::{Piece, Rotation};

type Kicks = [(i8, i8); 4];

// Indexed by the rotation being left.
const JLSTZ_CW: [Kicks; 4] = [
    [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(1, 0), (1, -1), (0, 2), (1, 2)],
    [(1, 0), (1, 1), (0, -2), (1, -2)],
    [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const JLSTZ_CCW: [Kicks; 4] = [
    [(1, 0), (1, 1), (0, -2), (1, -2)],
    [(1, 0), (1, -1), (0, 2), (1, 2)],
    [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const I_CW: [Kicks; 4] = [
    [(-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(1, 0), (-2, 0), (1, -2), (-2, 1)],
];

const I_CCW: [Kicks; 4] = [
    [(-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(-2, 0), (1, 0), (-2, -1), (1, 2)],
];

/// Offsets to try, in order, when turning `piece` from `from` to `to`.
/// O pieces and half turns get none.
pub fn get_kicks(piece: Piece, from: Rotation, to: Rotation) -> &'static [(i8, i8)] {
    let (cw, ccw) = match piece {
        Piece::O => return &[],
        Piece::I => (&I_CW, &I_CCW),
        _ => (&JLSTZ_CW, &JLSTZ_CCW),
    };
    if to == from.cw() {
        &cw[from.index()]
    } else if to == from.ccw() {
        &ccw[from.index()]
    } else {
        &[]
    }
}
