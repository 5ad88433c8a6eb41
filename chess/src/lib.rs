//! Legal move generation and game state tracking for chess
//!
//! The crate works on a piece-list [`Position`]. Moves are generated per piece by
//! [`movegen`], filtered for legality by [`legal`] (which simulates each move on a copy of the
//! position) and applied with [`Position::commit()`]. [`Game`] adds the rules which span many
//! moves: check tracking, mate and stalemate, draw offers, the fifty move rule and repetitions.
//!
//! # Example
//!
//! ```
//! use gambit::{Game, GameState, Side};
//!
//! let mut game = Game::new();
//! for (src, dst) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     let mv = game
//!         .find_move(src.parse().unwrap(), dst.parse().unwrap(), None)
//!         .unwrap();
//!     game.submit_move(&mv).unwrap();
//! }
//! assert_eq!(game.state(), GameState::BlackCheckmate);
//! assert_eq!(game.winner(), Some(Side::Black));
//! ```

pub mod attack;
pub mod commit;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod position;
pub mod types;

pub use gambit_base::{bitboard, geometry};

pub use bitboard::Bitboard;
pub use commit::CommitError;
pub use game::{Game, MoveError, Rules};
pub use moves::{Move, MoveList};
pub use position::{EnPassant, Piece, PlaceError, Position, Signature, ValidateError};
pub use types::{CastlingRights, CastlingSide, Cell, File, GameState, Kind, Rank, Side, Square};
