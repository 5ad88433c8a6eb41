//! Applying moves to a position

use crate::geometry;
use crate::moves::Move;
use crate::position::{EnPassant, Piece, Position};
use crate::types::{CastlingSide, Kind, Side, Square};

use thiserror::Error;

/// Error committing a move
///
/// Such errors mean that the move doesn't fit the position. When a commit fails, the position
/// stays unchanged.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum CommitError {
    /// No piece on the start square, or its kind or side differ from the move
    #[error("moving piece doesn't match the contents of square {0}")]
    PieceMismatch(Square),
    /// The castling side has no king
    #[error("no king of side {0}")]
    NoKing(Side),
    /// No rook of the castling side in the corner of the king's rank
    #[error("no rook for castling of side {0} to {1:?} side")]
    NoCastlingRook(Side, CastlingSide),
    /// The king or rook destination is taken by another piece
    #[error("castling destination {0} is occupied")]
    CastlingBlocked(Square),
    /// The destination holds a piece of the moving side
    #[error("cannot capture own piece on square {0}")]
    FriendlyCapture(Square),
    /// Diagonal pawn move onto an empty square with no enemy pawn behind it
    #[error("no enemy pawn to capture en passant on square {0}")]
    NoEnPassantPawn(Square),
}

impl Position {
    /// Commits move `mv` and returns the captured piece, if any
    ///
    /// The move is not checked for legality, only for consistency with the position. Legality
    /// is the job of [`legal`](crate::legal). All the checks are done before changing anything,
    /// so on error the position is left intact.
    ///
    /// Any commit clears the en passant marker and passes the move to the opponent. The marker
    /// is set again only if a pawn advances two squares.
    pub fn commit(&mut self, mv: &Move) -> Result<Option<Piece>, CommitError> {
        let captured = match *mv {
            Move::Simple { start, end, .. } => self.commit_simple(start, end)?,
            Move::Castling { side, castling } => {
                self.commit_castling(side, castling)?;
                None
            }
        };
        self.side = self.side.opposite();
        Ok(captured)
    }

    fn commit_simple(&mut self, start: Piece, end: Piece) -> Result<Option<Piece>, CommitError> {
        let mover_idx = self
            .index_at(start.square)
            .ok_or(CommitError::PieceMismatch(start.square))?;
        let mover = self.pieces[mover_idx];
        if mover.kind != start.kind || mover.side != start.side || end.side != start.side {
            return Err(CommitError::PieceMismatch(start.square));
        }

        let victim_idx = match self.index_at(end.square) {
            Some(idx) => {
                if self.pieces[idx].side == mover.side {
                    return Err(CommitError::FriendlyCapture(end.square));
                }
                Some(idx)
            }
            None if mover.kind == Kind::Pawn && start.square.file() != end.square.file() => {
                let behind = start.square.with_file(end.square.file());
                match self.index_at(behind) {
                    Some(idx)
                        if self.pieces[idx].kind == Kind::Pawn
                            && self.pieces[idx].side != mover.side =>
                    {
                        Some(idx)
                    }
                    _ => return Err(CommitError::NoEnPassantPawn(behind)),
                }
            }
            None => None,
        };

        self.pieces[mover_idx] = Piece {
            square: end.square,
            kind: end.kind,
            side: mover.side,
            has_moved: true,
        };
        let captured = victim_idx.map(|idx| {
            let victim = self.pieces.remove(idx);
            self.captured.push(victim);
            victim
        });

        let dr = end.square.rank().index() as isize - start.square.rank().index() as isize;
        self.enpassant = if mover.kind == Kind::Pawn
            && start.square.file() == end.square.file()
            && dr.abs() == 2
        {
            Some(EnPassant {
                side: mover.side,
                file: end.square.file(),
            })
        } else {
            None
        };

        Ok(captured)
    }

    fn commit_castling(&mut self, side: Side, castling: CastlingSide) -> Result<(), CommitError> {
        let king_idx = self.king_index(side).ok_or(CommitError::NoKing(side))?;
        let king = self.pieces[king_idx];
        let rook_src = king
            .square
            .with_file(geometry::castling_rook_file(castling));
        let rook_idx = self
            .index_at(rook_src)
            .filter(|&idx| {
                let rook = self.pieces[idx];
                rook.kind == Kind::Rook && rook.side == side
            })
            .ok_or(CommitError::NoCastlingRook(side, castling))?;

        let king_dst = king
            .square
            .with_file(geometry::castling_king_dst_file(castling));
        let rook_dst = king
            .square
            .with_file(geometry::castling_rook_dst_file(castling));
        for dst in [king_dst, rook_dst] {
            if let Some(idx) = self.index_at(dst) {
                if idx != king_idx && idx != rook_idx {
                    return Err(CommitError::CastlingBlocked(dst));
                }
            }
        }

        self.pieces[king_idx] = king.moved_to(king_dst);
        self.pieces[rook_idx] = self.pieces[rook_idx].moved_to(rook_dst);
        self.enpassant = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, File};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_simple() {
        let mut pos = Position::standard();
        let pawn = pos.piece_at(sq("e2")).unwrap();
        assert_eq!(pos.commit(&Move::simple(pawn, sq("e4"))), Ok(None));
        assert_eq!(pos.side(), Side::Black);
        assert_eq!(pos.piece_at(sq("e2")), None);
        assert_eq!(pos.piece_at(sq("e4")), Some(pawn.moved_to(sq("e4"))));
        assert_eq!(
            pos.enpassant(),
            Some(EnPassant {
                side: Side::White,
                file: File::E,
            })
        );
        assert_eq!(pos.enpassant_file(Side::White), Some(File::E));
        assert_eq!(pos.enpassant_file(Side::Black), None);

        let knight = pos.piece_at(sq("g8")).unwrap();
        assert_eq!(pos.commit(&Move::simple(knight, sq("f6"))), Ok(None));
        assert_eq!(pos.enpassant(), None);
        assert_eq!(pos.side(), Side::White);
        assert_eq!(pos.pieces().len(), 32);
    }

    #[test]
    fn test_capture() {
        let mut pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("d1"), Kind::Queen, Side::White),
                Piece::new(sq("d7"), Kind::Knight, Side::Black),
                Piece::new(sq("e7"), Kind::Pawn, Side::Black),
            ],
        )
        .unwrap();
        let queen = pos.piece_at(sq("d1")).unwrap();
        let knight = pos.piece_at(sq("d7")).unwrap();
        assert_eq!(pos.commit(&Move::capture(queen, sq("d7"))), Ok(Some(knight)));
        assert_eq!(pos.captured(), &[knight]);
        assert_eq!(pos.pieces().len(), 2);
        assert_eq!(pos.get(sq("d7")), queen.cell());
        // Stable order of the remaining pieces
        assert_eq!(pos.pieces()[0].square, sq("d7"));
        assert_eq!(pos.pieces()[1].square, sq("e7"));
    }

    #[test]
    fn test_promotion() {
        let mut pos = Position::from_pieces(
            Side::Black,
            [Piece::new(sq("c2"), Kind::Pawn, Side::Black).moved()],
        )
        .unwrap();
        let pawn = pos.piece_at(sq("c2")).unwrap();
        assert_eq!(
            pos.commit(&Move::promotion(pawn, sq("c1"), Kind::Queen, false)),
            Ok(None)
        );
        assert_eq!(pos.get(sq("c1")), Cell::from_parts(Side::Black, Kind::Queen));
    }

    #[test]
    fn test_enpassant() {
        let mut pos = Position::from_pieces(
            Side::Black,
            [
                Piece::new(sq("e4"), Kind::Pawn, Side::White).moved(),
                Piece::new(sq("d7"), Kind::Pawn, Side::Black),
            ],
        )
        .unwrap();
        let black = pos.piece_at(sq("d7")).unwrap();
        let white = pos.piece_at(sq("e4")).unwrap();
        pos.commit(&Move::simple(black, sq("d5"))).unwrap();
        pos.commit(&Move::simple(white, sq("e5"))).unwrap();
        assert_eq!(pos.enpassant(), None);

        let mut pos = Position::from_pieces(
            Side::Black,
            [
                Piece::new(sq("e5"), Kind::Pawn, Side::White).moved(),
                Piece::new(sq("d7"), Kind::Pawn, Side::Black),
            ],
        )
        .unwrap();
        let white = pos.piece_at(sq("e5")).unwrap();
        pos.commit(&Move::simple(black, sq("d5"))).unwrap();
        let victim = pos.piece_at(sq("d5")).unwrap();
        assert_eq!(pos.commit(&Move::capture(white, sq("d6"))), Ok(Some(victim)));
        assert_eq!(pos.piece_at(sq("d5")), None);
        assert_eq!(pos.piece_at(sq("d6")).map(|p| p.kind), Some(Kind::Pawn));
        assert_eq!(pos.captured().len(), 1);
    }

    #[test]
    fn test_castling() {
        let mut pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("e1"), Kind::King, Side::White),
                Piece::new(sq("a1"), Kind::Rook, Side::White),
                Piece::new(sq("h1"), Kind::Rook, Side::White),
            ],
        )
        .unwrap();
        let mut other = pos.clone();

        pos.commit(&Move::castling(Side::White, CastlingSide::King)).unwrap();
        assert_eq!(pos.piece_at(sq("g1")).map(|p| p.kind), Some(Kind::King));
        assert_eq!(pos.piece_at(sq("f1")).map(|p| p.kind), Some(Kind::Rook));
        assert!(pos.piece_at(sq("g1")).unwrap().has_moved);
        assert!(pos.piece_at(sq("f1")).unwrap().has_moved);
        assert!(!pos.piece_at(sq("a1")).unwrap().has_moved);

        other
            .commit(&Move::castling(Side::White, CastlingSide::Queen))
            .unwrap();
        assert_eq!(other.piece_at(sq("c1")).map(|p| p.kind), Some(Kind::King));
        assert_eq!(other.piece_at(sq("d1")).map(|p| p.kind), Some(Kind::Rook));
        assert_eq!(other.side(), Side::Black);
    }

    #[test]
    fn test_errors() {
        let base = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("e1"), Kind::King, Side::White),
                Piece::new(sq("h1"), Kind::Rook, Side::White),
                Piece::new(sq("f1"), Kind::Bishop, Side::White),
                Piece::new(sq("d5"), Kind::Pawn, Side::White).moved(),
                Piece::new(sq("e5"), Kind::Knight, Side::Black),
            ],
        )
        .unwrap();

        let cases = [
            (
                Move::simple(Piece::new(sq("a3"), Kind::Rook, Side::White), sq("a4")),
                CommitError::PieceMismatch(sq("a3")),
            ),
            (
                Move::simple(Piece::new(sq("h1"), Kind::Queen, Side::White), sq("h4")),
                CommitError::PieceMismatch(sq("h1")),
            ),
            (
                Move::simple(base.piece_at(sq("h1")).unwrap(), sq("f1")),
                CommitError::FriendlyCapture(sq("f1")),
            ),
            (
                Move::capture(base.piece_at(sq("d5")).unwrap(), sq("c6")),
                CommitError::NoEnPassantPawn(sq("c5")),
            ),
            (
                Move::castling(Side::Black, CastlingSide::King),
                CommitError::NoKing(Side::Black),
            ),
            (
                Move::castling(Side::White, CastlingSide::Queen),
                CommitError::NoCastlingRook(Side::White, CastlingSide::Queen),
            ),
            (
                Move::castling(Side::White, CastlingSide::King),
                CommitError::CastlingBlocked(sq("f1")),
            ),
        ];
        for (mv, err) in cases {
            let mut pos = base.clone();
            assert_eq!(pos.commit(&mv), Err(err));
            assert_eq!(pos, base);
        }
    }
}
