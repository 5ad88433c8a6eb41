//! Moves and move lists

use crate::position::Piece;
use crate::types::{CastlingSide, Kind, Side, Square};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Chess move
///
/// A simple move carries the snapshots of the moving piece before and after the move, so a
/// promotion is a simple move whose end snapshot has a different kind. Castling carries no
/// pieces: the side and the castling side fully determine where the king and the rook land.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    Simple {
        /// Moving piece as it stands before the move
        start: Piece,
        /// Moving piece as it stands after the move
        end: Piece,
        /// Whether the move captures an enemy piece, including en passant
        capture: bool,
        /// Whether the pawn changes its kind on the last rank
        promotion: bool,
    },
    Castling {
        side: Side,
        castling: CastlingSide,
    },
}

impl Move {
    /// Creates a non-capturing move of `piece` to `dst`
    #[inline]
    pub const fn simple(piece: Piece, dst: Square) -> Move {
        Move::Simple {
            start: piece,
            end: piece.moved_to(dst),
            capture: false,
            promotion: false,
        }
    }

    /// Creates a move of `piece` which captures on `dst`
    ///
    /// For en passant, `dst` is the square the pawn lands on, not the square of the captured pawn.
    #[inline]
    pub const fn capture(piece: Piece, dst: Square) -> Move {
        Move::Simple {
            start: piece,
            end: piece.moved_to(dst),
            capture: true,
            promotion: false,
        }
    }

    /// Creates a pawn move to `dst` promoting to `kind`
    #[inline]
    pub const fn promotion(piece: Piece, dst: Square, kind: Kind, capture: bool) -> Move {
        let end = piece.moved_to(dst);
        Move::Simple {
            start: piece,
            end: Piece { kind, ..end },
            capture,
            promotion: true,
        }
    }

    #[inline]
    pub const fn castling(side: Side, castling: CastlingSide) -> Move {
        Move::Castling { side, castling }
    }

    /// Returns the side making the move
    #[inline]
    pub const fn side(&self) -> Side {
        match *self {
            Move::Simple { start, .. } => start.side,
            Move::Castling { side, .. } => side,
        }
    }

    /// Returns the source square, `None` for castling
    #[inline]
    pub const fn src(&self) -> Option<Square> {
        match *self {
            Move::Simple { start, .. } => Some(start.square),
            Move::Castling { .. } => None,
        }
    }

    /// Returns the destination square, `None` for castling
    #[inline]
    pub const fn dst(&self) -> Option<Square> {
        match *self {
            Move::Simple { end, .. } => Some(end.square),
            Move::Castling { .. } => None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        matches!(*self, Move::Simple { capture: true, .. })
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(*self, Move::Simple { promotion: true, .. })
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        matches!(*self, Move::Castling { .. })
    }

    #[inline]
    pub const fn castling_side(&self) -> Option<CastlingSide> {
        match *self {
            Move::Castling { castling, .. } => Some(castling),
            Move::Simple { .. } => None,
        }
    }

    /// Returns the kind the pawn promotes to
    #[inline]
    pub const fn promote_to(&self) -> Option<Kind> {
        match *self {
            Move::Simple {
                end,
                promotion: true,
                ..
            } => Some(end.kind),
            _ => None,
        }
    }

    /// Returns `true` if a pawn moves by this move
    #[inline]
    pub const fn is_pawn_move(&self) -> bool {
        matches!(
            *self,
            Move::Simple {
                start: Piece {
                    kind: Kind::Pawn,
                    ..
                },
                ..
            }
        )
    }
}

/// List of moves, enough to hold all the legal moves of any position
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut MoveList {
    type Item = &'a mut Move;
    type IntoIter = slice::IterMut<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, 256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}
