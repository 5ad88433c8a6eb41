//! Position and related things

use crate::attack;
use crate::bitboard::Bitboard;
use crate::geometry;
use crate::types::{CastlingRights, CastlingSide, Cell, File, Kind, Rank, Side, Square};

use std::fmt;

use thiserror::Error;

/// Maximum number of pieces a side may own, counting both live and captured ones
pub const MAX_PIECES_PER_SIDE: usize = 16;

/// Position validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king
    #[error("no king of side {0}")]
    NoKing(Side),
    /// One of the sides has more than one king
    #[error("more than one king of side {0}")]
    TooManyKings(Side),
    /// Too many pieces of given side
    ///
    /// No more than 16 pieces of each side are allowed, live and captured together.
    #[error("too many pieces of side {0}")]
    TooManyPieces(Side),
    /// Two pieces stand on the same square
    #[error("more than one piece on square {0}")]
    SquareOverlap(Square),
    /// There is an unmoved pawn outside of its initial rank, or a pawn on the first or the last rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Square),
    /// Both kings are in check at the same time
    #[error("both kings are in check")]
    BothKingsAttacked,
    /// En passant marker belongs to the side to move
    #[error("en passant marker of side {0} set while it is its move")]
    InvalidEnpassant(Side),
}

/// Error placing a piece on a position
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlaceError {
    /// The target square is already occupied
    #[error("square {0} is already occupied")]
    Occupied(Square),
    /// The side already owns the maximum number of pieces
    #[error("too many pieces of side {0}")]
    TooManyPieces(Side),
}

/// A piece standing on the board
///
/// Pieces have no identity apart from their square: no two live pieces may share a square.
/// Moves carry snapshots of pieces, so all the fields take part in comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Square the piece stands on
    pub square: Square,
    /// Piece kind
    pub kind: Kind,
    /// Side owning the piece
    pub side: Side,
    /// Whether the piece has made at least one move
    ///
    /// Once set, the flag is never cleared. It gates the pawn double advance and castling.
    pub has_moved: bool,
}

impl Piece {
    /// Creates a piece which has not moved yet
    #[inline]
    pub const fn new(square: Square, kind: Kind, side: Side) -> Piece {
        Piece {
            square,
            kind,
            side,
            has_moved: false,
        }
    }

    /// Returns the same piece with its moved flag set
    #[inline]
    pub const fn moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }

    /// Returns the snapshot of this piece after moving to `square`
    #[inline]
    pub const fn moved_to(self, square: Square) -> Piece {
        Piece {
            square,
            has_moved: true,
            ..self
        }
    }

    #[inline]
    pub const fn cell(&self) -> Cell {
        Cell::from_parts(self.side, self.kind)
    }
}

/// En passant marker
///
/// It is set right after a pawn of `side` advanced two squares on file `file`, and only lives
/// until the next move is committed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EnPassant {
    /// Side which made the double advance
    pub side: Side,
    /// File of the advanced pawn
    pub file: File,
}

/// Key identifying a position for the purpose of repetition detection
///
/// Two positions have equal signatures iff they have the same piece placement, the same side
/// to move, the same en passant marker and the same castling rights.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    cells: [Cell; 64],
    side: Side,
    enpassant: Option<EnPassant>,
    castling: CastlingRights,
}

/// Chess position
///
/// Contains live pieces, captured pieces, side to move and en passant marker. The order of
/// live pieces is stable, which makes move generation deterministic.
///
/// The position can be changed only by placing pieces on it while building a fixture (see
/// [`Position::place()`]) or by committing moves (see [`Position::commit()`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) captured: Vec<Piece>,
    pub(crate) side: Side,
    pub(crate) enpassant: Option<EnPassant>,
}

impl Position {
    /// Returns an empty position with White to move
    pub fn empty() -> Position {
        Position {
            pieces: Vec::new(),
            captured: Vec::new(),
            side: Side::White,
            enpassant: None,
        }
    }

    /// Returns the standard initial position
    pub fn standard() -> Position {
        const BACK_RANK: [Kind; 8] = [
            Kind::Rook,
            Kind::Knight,
            Kind::Bishop,
            Kind::Queen,
            Kind::King,
            Kind::Bishop,
            Kind::Knight,
            Kind::Rook,
        ];
        let mut pieces = Vec::with_capacity(2 * MAX_PIECES_PER_SIDE);
        for side in Side::iter() {
            let home = geometry::home_rank(side);
            let pawns = geometry::pawn_rank(side);
            for (file, kind) in File::iter().zip(BACK_RANK) {
                pieces.push(Piece::new(Square::from_parts(file, home), kind, side));
            }
            for file in File::iter() {
                pieces.push(Piece::new(Square::from_parts(file, pawns), Kind::Pawn, side));
            }
        }
        Position {
            pieces,
            ..Position::empty()
        }
    }

    /// Builds a position from the side to move and a list of pieces
    ///
    /// This is a convenience wrapper over [`Position::place()`].
    pub fn from_pieces<I>(side: Side, pieces: I) -> Result<Position, PlaceError>
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut res = Position {
            side,
            ..Position::empty()
        };
        for piece in pieces {
            res.place(piece)?;
        }
        Ok(res)
    }

    /// Places `piece` on the board
    ///
    /// Fails if the square is occupied or the side already owns 16 pieces. The resulting
    /// position is not validated, see [`Position::validate()`].
    pub fn place(&mut self, piece: Piece) -> Result<(), PlaceError> {
        if self.index_at(piece.square).is_some() {
            return Err(PlaceError::Occupied(piece.square));
        }
        if self.owned_count(piece.side) >= MAX_PIECES_PER_SIDE {
            return Err(PlaceError::TooManyPieces(piece.side));
        }
        self.pieces.push(piece);
        Ok(())
    }

    fn owned_count(&self, side: Side) -> usize {
        self.pieces
            .iter()
            .chain(self.captured.iter())
            .filter(|p| p.side == side)
            .count()
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns all the live pieces in their stable order
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns all the live pieces of side `s`
    pub fn side_pieces(&self, s: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.side == s)
    }

    /// Returns the captured pieces in the order they were captured
    #[inline]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Returns the en passant marker, if any
    #[inline]
    pub fn enpassant(&self) -> Option<EnPassant> {
        self.enpassant
    }

    /// Returns the file of the en passant marker set by side `s`
    ///
    /// At most one of the sides can have its marker set at a time.
    #[inline]
    pub fn enpassant_file(&self, s: Side) -> Option<File> {
        self.enpassant.filter(|ep| ep.side == s).map(|ep| ep.file)
    }

    /// Returns the index of the piece on `sq` in [`Position::pieces()`]
    #[inline]
    pub fn index_at(&self, sq: Square) -> Option<usize> {
        self.pieces.iter().position(|p| p.square == sq)
    }

    /// Returns a copy of the piece standing on `sq`
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pieces.iter().find(|p| p.square == sq).copied()
    }

    /// Returns the contents of square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.piece_at(sq).map_or(Cell::EMPTY, |p| p.cell())
    }

    pub(crate) fn king_index(&self, s: Side) -> Option<usize> {
        self.pieces
            .iter()
            .position(|p| p.kind == Kind::King && p.side == s)
    }

    /// Returns the king of side `s`
    ///
    /// Test fixtures may lack a king, so callers must handle `None` as a separate condition.
    #[inline]
    pub fn king(&self, s: Side) -> Option<Piece> {
        self.king_index(s).map(|i| self.pieces[i])
    }

    /// Returns the set of all occupied squares
    pub fn occupied(&self) -> Bitboard {
        self.pieces.iter().map(|p| p.square).collect()
    }

    /// Returns the set of squares occupied by side `s`
    pub fn occupied_by(&self, s: Side) -> Bitboard {
        self.side_pieces(s).map(|p| p.square).collect()
    }

    /// Returns the castling rights derived from the moved flags
    ///
    /// A side can castle to some side only if its king has not moved and an unmoved rook of the
    /// same side stands in the corresponding corner of the king's rank. A captured rook drops out
    /// of the live pieces, so the right disappears along with it.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut res = CastlingRights::EMPTY;
        for side in Side::iter() {
            let king = match self.king(side) {
                Some(k) if !k.has_moved => k,
                _ => continue,
            };
            for c in CastlingSide::iter() {
                let corner = king.square.with_file(geometry::castling_rook_file(c));
                if self.piece_at(corner).map_or(false, |r| {
                    r.kind == Kind::Rook && r.side == side && !r.has_moved
                }) {
                    res.set(side, c);
                }
            }
        }
        res
    }

    /// Returns the repetition signature of the position
    pub fn signature(&self) -> Signature {
        let mut cells = [Cell::EMPTY; 64];
        for p in &self.pieces {
            cells[p.square.index()] = p.cell();
        }
        Signature {
            cells,
            side: self.side,
            enpassant: self.enpassant,
            castling: self.castling_rights(),
        }
    }

    /// Checks that the position is a valid chess position
    ///
    /// Move generation works on any position, including fixtures without kings. Game logic
    /// requires positions that pass this check.
    pub fn validate(&self) -> Result<(), ValidateError> {
        let mut seen = Bitboard::EMPTY;
        for p in &self.pieces {
            if seen.has(p.square) {
                return Err(ValidateError::SquareOverlap(p.square));
            }
            seen.set(p.square);
        }

        for side in Side::iter() {
            if self.owned_count(side) > MAX_PIECES_PER_SIDE {
                return Err(ValidateError::TooManyPieces(side));
            }
            match self
                .side_pieces(side)
                .filter(|p| p.kind == Kind::King)
                .count()
            {
                0 => return Err(ValidateError::NoKing(side)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(side)),
            }
        }

        for p in self.pieces.iter().filter(|p| p.kind == Kind::Pawn) {
            let rank = p.square.rank();
            if geometry::is_last_rank(rank) || (!p.has_moved && rank != geometry::pawn_rank(p.side))
            {
                return Err(ValidateError::InvalidPawn(p.square));
            }
        }

        if let Some(ep) = self.enpassant {
            if ep.side == self.side {
                return Err(ValidateError::InvalidEnpassant(ep.side));
            }
        }

        if attack::is_attacked(self, Side::White) && attack::is_attacked(self, Side::Black) {
            return Err(ValidateError::BothKingsAttacked);
        }

        Ok(())
    }
}

impl Default for Position {
    #[inline]
    fn default() -> Position {
        Position::standard()
    }
}

/// Pretty-prints the position as an ASCII diagram
///
/// # Example
///
/// ```
/// # use gambit::Position;
/// #
/// let res = r#"
/// 8|rnbqkbnr
/// 7|pppppppp
/// 6|........
/// 5|........
/// 4|........
/// 3|........
/// 2|PPPPPPPP
/// 1|RNBQKBNR
/// -+--------
/// W|abcdefgh
/// "#;
/// assert_eq!(Position::standard().to_string().trim(), res.trim());
/// ```
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut cells = [Cell::EMPTY; 64];
        for p in &self.pieces {
            cells[p.square.index()] = p.cell();
        }
        for rank in Rank::iter().rev() {
            write!(f, "{}|", rank)?;
            for file in File::iter() {
                write!(f, "{}", cells[Square::from_parts(file, rank).index()])?;
            }
            writeln!(f)?;
        }
        writeln!(f, "-+--------")?;
        let indicator = match self.side {
            Side::White => 'W',
            Side::Black => 'B',
        };
        write!(f, "{}|", indicator)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)
    }
}
