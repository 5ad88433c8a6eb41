//! Core types
//!
//! Most of them are re-exported from `gambit_base`. Game-level types that only make sense for
//! the engine live here.

pub use gambit_base::types::*;

/// State of a game
///
/// [`GameState::InPlay`] is the initial state, all the other states are terminal.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Game is running
    #[default]
    InPlay,
    /// Black is checkmated, White wins
    WhiteCheckmate,
    /// White is checkmated, Black wins
    BlackCheckmate,
    /// White has no legal moves while not in check
    WhiteStalemate,
    /// Black has no legal moves while not in check
    BlackStalemate,
    /// White resigned
    WhiteResigned,
    /// Black resigned
    BlackResigned,
    /// Both sides agreed to a draw
    DrawAgreed,
    /// Draw by the fifty move rule
    Draw50Moves,
    /// Draw by threefold repetition
    Draw3Fold,
}

impl GameState {
    /// State in which `winner` has checkmated the opponent
    pub const fn checkmate(winner: Side) -> GameState {
        match winner {
            Side::White => GameState::WhiteCheckmate,
            Side::Black => GameState::BlackCheckmate,
        }
    }

    /// State in which `side` is stalemated
    pub const fn stalemate(side: Side) -> GameState {
        match side {
            Side::White => GameState::WhiteStalemate,
            Side::Black => GameState::BlackStalemate,
        }
    }

    /// State in which `side` has resigned
    pub const fn resigned(side: Side) -> GameState {
        match side {
            Side::White => GameState::WhiteResigned,
            Side::Black => GameState::BlackResigned,
        }
    }

    pub const fn is_finished(&self) -> bool {
        !matches!(*self, GameState::InPlay)
    }

    pub const fn winner(&self) -> Option<Side> {
        match *self {
            GameState::WhiteCheckmate | GameState::BlackResigned => Some(Side::White),
            GameState::BlackCheckmate | GameState::WhiteResigned => Some(Side::Black),
            _ => None,
        }
    }

    /// Returns `true` if the game ended without a winner
    ///
    /// Stalemates count as draws.
    pub const fn is_draw(&self) -> bool {
        matches!(
            *self,
            GameState::WhiteStalemate
                | GameState::BlackStalemate
                | GameState::DrawAgreed
                | GameState::Draw50Moves
                | GameState::Draw3Fold
        )
    }
}
