//! Attack detection

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::position::{Piece, Position};
use crate::types::{Kind, Side, Square};

/// Returns `true` if `piece` attacks square `sq` on `occupied` board
///
/// A piece never attacks its own square. Sliders are blocked by any occupied square strictly
/// between them and the target.
pub fn is_attacked_by(piece: &Piece, sq: Square, occupied: Bitboard) -> bool {
    let src = piece.square;
    if src == sq {
        return false;
    }
    let df = sq.file().index() as isize - src.file().index() as isize;
    let dr = sq.rank().index() as isize - src.rank().index() as isize;
    match piece.kind {
        Kind::Pawn => df.abs() == 1 && dr == geometry::pawn_forward(piece.side),
        Kind::Knight => (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1),
        Kind::King => df.abs() <= 1 && dr.abs() <= 1,
        Kind::Rook => {
            geometry::is_line_aligned(src, sq) && (geometry::between(src, sq) & occupied).is_empty()
        }
        Kind::Bishop => {
            geometry::is_diag_aligned(src, sq) && (geometry::between(src, sq) & occupied).is_empty()
        }
        Kind::Queen => {
            (geometry::is_line_aligned(src, sq) || geometry::is_diag_aligned(src, sq))
                && (geometry::between(src, sq) & occupied).is_empty()
        }
    }
}

/// Returns the squares of all pieces of side `by` attacking `sq`
pub fn attackers(pos: &Position, sq: Square, by: Side) -> Bitboard {
    let occupied = pos.occupied();
    pos.side_pieces(by)
        .filter(|p| is_attacked_by(p, sq, occupied))
        .map(|p| p.square)
        .collect()
}

/// Returns `true` if any piece of side `by` attacks `sq`
pub fn is_square_attacked(pos: &Position, sq: Square, by: Side) -> bool {
    let occupied = pos.occupied();
    pos.side_pieces(by).any(|p| is_attacked_by(p, sq, occupied))
}

/// Returns `true` if the king of side `s` is attacked
///
/// If there is no king of side `s` on the board, returns `false`. Use [`Position::king()`] to
/// tell the two cases apart.
pub fn is_attacked(pos: &Position, s: Side) -> bool {
    match pos.king(s) {
        Some(king) => is_square_attacked(pos, king.square, s.opposite()),
        None => false,
    }
}
