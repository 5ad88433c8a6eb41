use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => panic!("file index must be between 0 and 7"),
        }
    }

    pub const fn try_from_index(val: isize) -> Option<Self> {
        if val < 0 || val >= 8 {
            return None;
        }
        Some(Self::from_index(val as usize))
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File::from_index(c as usize - 'a' as usize)),
            _ => None,
        }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..8).map(File::from_index)
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank, counted from White's side
///
/// `R1` has index 0 and is White's home rank, `R8` has index 7.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        match val {
            0 => Rank::R1,
            1 => Rank::R2,
            2 => Rank::R3,
            3 => Rank::R4,
            4 => Rank::R5,
            5 => Rank::R6,
            6 => Rank::R7,
            7 => Rank::R8,
            _ => panic!("rank index must be between 0 and 7"),
        }
    }

    pub const fn try_from_index(val: isize) -> Option<Self> {
        if val < 0 || val >= 8 {
            return None;
        }
        Some(Self::from_index(val as usize))
    }

    pub fn as_char(&self) -> char {
        (b'1' + *self as u8) as char
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Rank::from_index(c as usize - '1' as usize)),
            _ => None,
        }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..8).map(Rank::from_index)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board
///
/// Squares are numbered rank by rank starting from `a1`, so `a1` has index 0,
/// `h1` has index 7 and `h8` has index 63.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const fn from_index(val: usize) -> Square {
        assert!(val < 64, "square index must be between 0 and 63");
        Square(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Square {
        Square(((rank as u8) << 3) | file as u8)
    }

    /// Builds a square from raw file and rank numbers, returning `None` when
    /// they fall outside the board
    pub const fn from_coords(file: isize, rank: isize) -> Option<Square> {
        match (File::try_from_index(file), Rank::try_from_index(rank)) {
            (Some(file), Some(rank)) => Some(Square::from_parts(file, rank)),
            _ => None,
        }
    }

    pub const fn file(&self) -> File {
        File::from_index((self.0 & 7) as usize)
    }

    pub const fn rank(&self) -> Rank {
        Rank::from_index((self.0 >> 3) as usize)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the square shifted by `df` files and `dr` ranks, or `None` if it leaves the board
    pub const fn offset(&self, df: isize, dr: isize) -> Option<Square> {
        Square::from_coords(
            self.file().index() as isize + df,
            self.rank().index() as isize + dr,
        )
    }

    /// Index of the `a1`-`h8` direction diagonal the square lies on
    pub const fn diag(&self) -> isize {
        self.file().index() as isize - self.rank().index() as isize
    }

    /// Index of the `a8`-`h1` direction diagonal the square lies on
    pub const fn antidiag(&self) -> usize {
        self.file().index() + self.rank().index()
    }

    pub const fn with_file(self, file: File) -> Square {
        Square::from_parts(file, self.rank())
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Square)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Square({})", self)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_ch), Some(rank_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(SquareParseError::BadLength);
        };
        Ok(Square::from_parts(
            File::from_char(file_ch).ok_or(SquareParseError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(SquareParseError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    pub const fn opposite(&self) -> Side {
        match *self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [Side::White, Side::Black].into_iter()
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    King = 4,
    Queen = 5,
}

impl Kind {
    pub const COUNT: usize = 6;

    /// Kinds a pawn may promote to, in generation order
    pub const PROMOTIONS: [Kind; 4] = [Kind::Rook, Kind::Knight, Kind::Bishop, Kind::Queen];

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn as_char(&self) -> char {
        b"prnbkq"[self.index()] as char
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Kind::Pawn,
            Kind::Rook,
            Kind::Knight,
            Kind::Bishop,
            Kind::King,
            Kind::Queen,
        ]
        .into_iter()
    }
}

/// Contents of a single square: either empty or a piece kind of some side
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn from_parts(s: Side, k: Kind) -> Cell {
        Cell(1 + (s as u8) * Kind::COUNT as u8 + k as u8)
    }

    pub const fn side(&self) -> Option<Side> {
        match self.0 {
            0 => None,
            1..=6 => Some(Side::White),
            _ => Some(Side::Black),
        }
    }

    pub const fn kind(&self) -> Option<Kind> {
        match self.0 {
            0 => None,
            1 | 7 => Some(Kind::Pawn),
            2 | 8 => Some(Kind::Rook),
            3 | 9 => Some(Kind::Knight),
            4 | 10 => Some(Kind::Bishop),
            5 | 11 => Some(Kind::King),
            _ => Some(Kind::Queen),
        }
    }

    pub fn as_char(&self) -> char {
        match (self.side(), self.kind()) {
            (Some(Side::White), Some(k)) => k.as_char().to_ascii_uppercase(),
            (Some(Side::Black), Some(k)) => k.as_char(),
            _ => '.',
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Cell({})", self.as_char())
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

impl CastlingSide {
    pub fn iter() -> impl Iterator<Item = Self> {
        [CastlingSide::King, CastlingSide::Queen].into_iter()
    }
}

/// Set of castling rights for both sides
///
/// The engine never stores this set, it is always derived from the moved flags of
/// kings and rooks.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const fn to_index(s: Side, c: CastlingSide) -> u8 {
        ((s as u8) << 1) | c as u8
    }

    pub const EMPTY: CastlingRights = CastlingRights(0);
    pub const FULL: CastlingRights = CastlingRights(15);

    pub const fn has(&self, s: Side, c: CastlingSide) -> bool {
        ((self.0 >> Self::to_index(s, c)) & 1) != 0
    }

    pub const fn with(self, s: Side, c: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | (1_u8 << Self::to_index(s, c)))
    }

    pub fn set(&mut self, s: Side, c: CastlingSide) {
        *self = self.with(s, c)
    }

    pub fn unset(&mut self, s: Side, c: CastlingSide) {
        self.0 &= !(1_u8 << Self::to_index(s, c))
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "CastlingRights({})", self)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if *self == Self::EMPTY {
            return write!(f, "-");
        }
        for (s, c, ch) in [
            (Side::White, CastlingSide::King, 'K'),
            (Side::White, CastlingSide::Queen, 'Q'),
            (Side::Black, CastlingSide::King, 'k'),
            (Side::Black, CastlingSide::Queen, 'q'),
        ] {
            if self.has(s, c) {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}
