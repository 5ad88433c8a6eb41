//! Pseudo-legal move generation
//!
//! Pseudo-legal moves obey the movement rules of each piece but may leave the own king under
//! attack. See [`legal`](crate::legal) for the filtered version.

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::moves::{Move, MoveList};
use crate::position::{Piece, Position};
use crate::types::{CastlingSide, File, Kind, Square};

struct MoveGen<'a> {
    pos: &'a Position,
    piece: Piece,
    own: Bitboard,
    enemy: Bitboard,
}

impl<'a> MoveGen<'a> {
    fn new(pos: &'a Position, piece: Piece) -> Self {
        MoveGen {
            pos,
            piece,
            own: pos.occupied_by(piece.side),
            enemy: pos.occupied_by(piece.side.opposite()),
        }
    }

    #[inline]
    fn occupied(&self) -> Bitboard {
        self.own | self.enemy
    }

    fn add_pawn_move(&self, list: &mut MoveList, dst: Square, capture: bool) {
        if geometry::is_last_rank(dst.rank()) {
            for kind in Kind::PROMOTIONS {
                list.push(Move::promotion(self.piece, dst, kind, capture));
            }
        } else if capture {
            list.push(Move::capture(self.piece, dst));
        } else {
            list.push(Move::simple(self.piece, dst));
        }
    }

    fn gen_pawn(&self, list: &mut MoveList) {
        let p = self.piece;
        let fwd = geometry::pawn_forward(p.side);
        let occupied = self.occupied();

        if let Some(single) = p.square.offset(0, fwd) {
            if !occupied.has(single) {
                self.add_pawn_move(list, single, false);
                if !p.has_moved {
                    if let Some(double) = single.offset(0, fwd) {
                        if !occupied.has(double) {
                            list.push(Move::simple(p, double));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(dst) = p.square.offset(df, fwd) else {
                continue;
            };
            if self.enemy.has(dst) {
                self.add_pawn_move(list, dst, true);
            } else if self.is_enpassant(dst) {
                list.push(Move::capture(p, dst));
            }
        }
    }

    fn is_enpassant(&self, dst: Square) -> bool {
        let p = self.piece;
        let enemy = p.side.opposite();
        if p.square.rank() != geometry::enpassant_src_rank(p.side)
            || self.pos.enpassant_file(enemy) != Some(dst.file())
            || self.occupied().has(dst)
        {
            return false;
        }
        let victim = p.square.with_file(dst.file());
        self.pos
            .piece_at(victim)
            .map_or(false, |v| v.kind == Kind::Pawn && v.side == enemy)
    }

    fn gen_offsets(&self, list: &mut MoveList, offsets: &[(isize, isize)]) {
        for &(df, dr) in offsets {
            let Some(dst) = self.piece.square.offset(df, dr) else {
                continue;
            };
            if self.own.has(dst) {
                continue;
            }
            if self.enemy.has(dst) {
                list.push(Move::capture(self.piece, dst));
            } else {
                list.push(Move::simple(self.piece, dst));
            }
        }
    }

    fn gen_rays(&self, list: &mut MoveList, dirs: &[(isize, isize)]) {
        for &(df, dr) in dirs {
            let mut cur = self.piece.square.offset(df, dr);
            while let Some(dst) = cur {
                if self.own.has(dst) {
                    break;
                }
                if self.enemy.has(dst) {
                    list.push(Move::capture(self.piece, dst));
                    break;
                }
                list.push(Move::simple(self.piece, dst));
                cur = dst.offset(df, dr);
            }
        }
    }

    fn gen_castling(&self, list: &mut MoveList) {
        let king = self.piece;
        if king.has_moved {
            return;
        }
        let occupied = self.occupied();
        for rook in self.pos.side_pieces(king.side) {
            if rook.kind != Kind::Rook || rook.has_moved || rook.square.rank() != king.square.rank()
            {
                continue;
            }
            let castling = match rook.square.file() {
                File::H => CastlingSide::King,
                File::A => CastlingSide::Queen,
                _ => continue,
            };
            let king_dst = king
                .square
                .with_file(geometry::castling_king_dst_file(castling));
            let rook_dst = king
                .square
                .with_file(geometry::castling_rook_dst_file(castling));
            let path = (geometry::between(king.square, rook.square)
                | Bitboard::from_square(king_dst)
                | Bitboard::from_square(rook_dst))
            .without(king.square)
            .without(rook.square);
            if (path & occupied).is_empty() {
                list.push(Move::castling(king.side, castling));
            }
        }
    }

    fn gen(&self, list: &mut MoveList) {
        match self.piece.kind {
            Kind::Pawn => self.gen_pawn(list),
            Kind::Knight => self.gen_offsets(list, &geometry::KNIGHT_OFFSETS),
            Kind::King => {
                self.gen_offsets(list, &geometry::KING_OFFSETS);
                self.gen_castling(list);
            }
            Kind::Rook => self.gen_rays(list, &geometry::ROOK_DIRS),
            Kind::Bishop => self.gen_rays(list, &geometry::BISHOP_DIRS),
            Kind::Queen => {
                self.gen_rays(list, &geometry::ROOK_DIRS);
                self.gen_rays(list, &geometry::BISHOP_DIRS);
            }
        }
    }
}

/// Generates pseudo-legal moves of `piece`
///
/// The piece doesn't need to belong to the side to move. The moves come out in a fixed order:
/// for pawns forward moves go first, for sliders the rays are walked in direction table order,
/// castling moves go after the regular king moves.
pub fn pseudo_legal(pos: &Position, piece: &Piece) -> MoveList {
    let mut list = MoveList::new();
    MoveGen::new(pos, *piece).gen(&mut list);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::EnPassant;
    use crate::types::Side;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn dsts(list: &MoveList) -> Vec<String> {
        let mut res: Vec<_> = list
            .iter()
            .filter_map(|m| m.dst())
            .map(|s| s.to_string())
            .collect();
        res.sort();
        res.dedup();
        res
    }

    #[test]
    fn test_knight() {
        let pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("b1"), Kind::Knight, Side::White),
                Piece::new(sq("d2"), Kind::Pawn, Side::White),
                Piece::new(sq("c3"), Kind::Pawn, Side::Black),
            ],
        )
        .unwrap();
        let knight = pos.piece_at(sq("b1")).unwrap();
        let list = pseudo_legal(&pos, &knight);
        assert_eq!(dsts(&list), vec!["a3", "c3"]);
        assert_eq!(list.iter().filter(|m| m.is_capture()).count(), 1);
    }

    #[test]
    fn test_sliders() {
        let pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("a1"), Kind::Rook, Side::White),
                Piece::new(sq("a3"), Kind::Pawn, Side::White),
                Piece::new(sq("c1"), Kind::Knight, Side::Black),
                Piece::new(sq("d4"), Kind::Queen, Side::Black),
            ],
        )
        .unwrap();
        let rook = pos.piece_at(sq("a1")).unwrap();
        assert_eq!(dsts(&pseudo_legal(&pos, &rook)), vec!["a2", "b1", "c1"]);

        let queen = pos.piece_at(sq("d4")).unwrap();
        assert_eq!(pseudo_legal(&pos, &queen).len(), 27);
    }

    #[test]
    fn test_pawn() {
        let pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("e2"), Kind::Pawn, Side::White),
                Piece::new(sq("d3"), Kind::Knight, Side::Black),
                Piece::new(sq("f3"), Kind::Knight, Side::White),
                Piece::new(sq("h7"), Kind::Pawn, Side::Black),
                Piece::new(sq("h5"), Kind::Pawn, Side::White),
            ],
        )
        .unwrap();
        let pawn = pos.piece_at(sq("e2")).unwrap();
        assert_eq!(dsts(&pseudo_legal(&pos, &pawn)), vec!["d3", "e3", "e4"]);

        // Double advance lands on an occupied square
        let pawn = pos.piece_at(sq("h7")).unwrap();
        assert_eq!(dsts(&pseudo_legal(&pos, &pawn)), vec!["h6"]);

        let pawn = Piece::new(sq("e3"), Kind::Pawn, Side::White).moved();
        let pos = Position::from_pieces(Side::White, [pawn]).unwrap();
        assert_eq!(dsts(&pseudo_legal(&pos, &pawn)), vec!["e4"]);
    }

    #[test]
    fn test_promotion() {
        let pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("b7"), Kind::Pawn, Side::White).moved(),
                Piece::new(sq("a8"), Kind::Rook, Side::Black),
            ],
        )
        .unwrap();
        let pawn = pos.piece_at(sq("b7")).unwrap();
        let list = pseudo_legal(&pos, &pawn);
        assert_eq!(list.len(), 8);
        assert!(list.iter().all(|m| m.is_promotion()));
        assert_eq!(list.iter().filter(|m| m.is_capture()).count(), 4);
        let kinds: Vec<_> = list.iter().take(4).filter_map(|m| m.promote_to()).collect();
        assert_eq!(kinds, Kind::PROMOTIONS.to_vec());
    }

    #[test]
    fn test_enpassant() {
        let mut pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("e5"), Kind::Pawn, Side::White).moved(),
                Piece::new(sq("d5"), Kind::Pawn, Side::Black).moved(),
                Piece::new(sq("f5"), Kind::Pawn, Side::Black).moved(),
            ],
        )
        .unwrap();
        let pawn = pos.piece_at(sq("e5")).unwrap();
        assert_eq!(dsts(&pseudo_legal(&pos, &pawn)), vec!["e6"]);

        pos.enpassant = Some(EnPassant {
            side: Side::Black,
            file: File::D,
        });
        let list = pseudo_legal(&pos, &pawn);
        assert_eq!(dsts(&list), vec!["d6", "e6"]);
        assert!(list.contains(&Move::capture(pawn, sq("d6"))));

        // The marker of the own side gives nothing
        pos.enpassant = Some(EnPassant {
            side: Side::White,
            file: File::D,
        });
        assert_eq!(dsts(&pseudo_legal(&pos, &pawn)), vec!["e6"]);
    }

    #[test]
    fn test_castling() {
        let mut pos = Position::from_pieces(
            Side::White,
            [
                Piece::new(sq("e1"), Kind::King, Side::White),
                Piece::new(sq("a1"), Kind::Rook, Side::White),
                Piece::new(sq("h1"), Kind::Rook, Side::White),
                Piece::new(sq("b1"), Kind::Knight, Side::White),
            ],
        )
        .unwrap();
        let king = pos.piece_at(sq("e1")).unwrap();
        let list = pseudo_legal(&pos, &king);
        assert!(list.contains(&Move::castling(Side::White, CastlingSide::King)));
        assert!(!list.contains(&Move::castling(Side::White, CastlingSide::Queen)));

        pos.pieces.retain(|p| p.kind != Kind::Knight);
        let i = pos.index_at(sq("h1")).unwrap();
        pos.pieces[i] = pos.pieces[i].moved();
        let list = pseudo_legal(&pos, &king);
        assert!(!list.contains(&Move::castling(Side::White, CastlingSide::King)));
        assert!(list.contains(&Move::castling(Side::White, CastlingSide::Queen)));

        let moved_king = king.moved();
        let i = pos.index_at(sq("e1")).unwrap();
        pos.pieces[i] = moved_king;
        assert!(!pseudo_legal(&pos, &moved_king)
            .iter()
            .any(|m| m.is_castling()));
    }
}
