use crate::bitboard::Bitboard;
use crate::types::{CastlingSide, File, Rank, Side, Square};

/// Rank direction in which pawns of side `s` advance
pub const fn pawn_forward(s: Side) -> isize {
    match s {
        Side::White => 1,
        Side::Black => -1,
    }
}

/// Rank holding the king and rooks of side `s` in the initial position
pub const fn home_rank(s: Side) -> Rank {
    match s {
        Side::White => Rank::R1,
        Side::Black => Rank::R8,
    }
}

pub const fn pawn_rank(s: Side) -> Rank {
    match s {
        Side::White => Rank::R2,
        Side::Black => Rank::R7,
    }
}

/// Rank on which a pawn of side `s` must stand to capture en passant
pub const fn enpassant_src_rank(s: Side) -> Rank {
    match s {
        Side::White => Rank::R5,
        Side::Black => Rank::R4,
    }
}

pub const fn is_last_rank(r: Rank) -> bool {
    matches!(r, Rank::R1 | Rank::R8)
}

/// File of the rook taking part in castling to side `c`
pub const fn castling_rook_file(c: CastlingSide) -> File {
    match c {
        CastlingSide::King => File::H,
        CastlingSide::Queen => File::A,
    }
}

/// File the king crosses while castling to side `c`
pub const fn castling_transit_file(c: CastlingSide) -> File {
    match c {
        CastlingSide::King => File::F,
        CastlingSide::Queen => File::D,
    }
}

pub const fn castling_king_dst_file(c: CastlingSide) -> File {
    match c {
        CastlingSide::King => File::G,
        CastlingSide::Queen => File::C,
    }
}

pub const fn castling_rook_dst_file(c: CastlingSide) -> File {
    match c {
        CastlingSide::King => File::F,
        CastlingSide::Queen => File::D,
    }
}

pub const ROOK_DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(isize, isize); 4] = [(1, -1), (-1, 1), (1, 1), (-1, -1)];

pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

pub const KING_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns `true` if `a` and `b` are distinct and share a file or a rank
pub fn is_line_aligned(a: Square, b: Square) -> bool {
    a != b && (a.file() == b.file() || a.rank() == b.rank())
}

/// Returns `true` if `a` and `b` are distinct and share a diagonal
pub fn is_diag_aligned(a: Square, b: Square) -> bool {
    a != b && (a.diag() == b.diag() || a.antidiag() == b.antidiag())
}

/// Returns the squares strictly between `a` and `b`
///
/// If the squares are not on a common file, rank or diagonal, the result is empty.
/// The endpoints are never included.
pub fn between(a: Square, b: Square) -> Bitboard {
    if !is_line_aligned(a, b) && !is_diag_aligned(a, b) {
        return Bitboard::EMPTY;
    }
    let df = (b.file().index() as isize - a.file().index() as isize).signum();
    let dr = (b.rank().index() as isize - a.rank().index() as isize).signum();
    let mut res = Bitboard::EMPTY;
    let mut cur = a.offset(df, dr);
    while let Some(sq) = cur {
        if sq == b {
            break;
        }
        res.set(sq);
        cur = sq.offset(df, dr);
    }
    res
}
