//! Game state machine
//!
//! [`Game`] wraps a position and drives it through a game: it validates submitted moves, keeps
//! the move history, tracks checks, draw offers, the moves-since-capture counter and position
//! repetitions, and detects when the game ends.

use crate::attack;
use crate::commit::CommitError;
use crate::geometry;
use crate::legal;
use crate::moves::{Move, MoveList};
use crate::position::{Piece, Position, Signature, ValidateError};
use crate::types::{GameState, Kind, Side, Square};

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace, warn};

/// Error submitting a move or a side operation
///
/// The variants are listed in the order in which the checks are done. On error, the game is
/// left unchanged.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// The game is already finished
    #[error("game has already ended")]
    GameEnded,
    /// The moving piece would end up owned by the other side
    #[error("piece cannot change its side")]
    DisloyaltyForbidden,
    /// The move belongs to the side not on move
    #[error("it is the other side's move")]
    WrongSide,
    /// No live piece matches the moving piece of the move
    #[error("moving piece not found")]
    PieceNotFound,
    /// The move is not among the legal moves of the piece
    #[error("move is not legal")]
    InvalidMove,
    /// The position rejected the move
    #[error("cannot commit move: {0}")]
    AfraidOfCommitment(#[from] CommitError),
}

/// Rules which may vary between games
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Number of half-moves without capture which ends the game in a draw
    pub fifty_move_limit: u32,
    /// Number of occurrences of the same position which ends the game in a draw
    pub repetition_limit: usize,
    /// Whether pawn moves reset the moves-since-capture counter, as in FIDE rules
    pub reset_on_pawn_move: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            fifty_move_limit: 50,
            repetition_limit: 3,
            reset_on_pawn_move: false,
        }
    }
}

/// Occurrence counts of position signatures
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Repetitions(HashMap<Signature, usize>);

impl Repetitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `pos` and returns its occurrence count
    pub fn push(&mut self, pos: &Position) -> usize {
        let count = self.0.entry(pos.signature()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn repeat_count(&self, pos: &Position) -> usize {
        *self.0.get(&pos.signature()).unwrap_or(&0)
    }
}

/// Chess game
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<Move>,
    state: GameState,
    check: [bool; 2],
    draw_offers: [bool; 2],
    moves_since_capture: u32,
    repeat: Repetitions,
    rules: Rules,
}

impl Game {
    /// Creates a game from the standard initial position with the default rules
    pub fn new() -> Game {
        Game::with_rules(Rules::default())
    }

    /// Creates a game from the standard initial position
    pub fn with_rules(rules: Rules) -> Game {
        Game::start(Position::standard(), rules)
    }

    /// Creates a game from an arbitrary position
    ///
    /// The position must be valid. If the side to move is already checkmated or stalemated, the
    /// game starts in a finished state.
    pub fn from_position(position: Position, rules: Rules) -> Result<Game, ValidateError> {
        position.validate()?;
        let mut res = Game::start(position, rules);
        let side = res.position.side();
        if !legal::has_legal_moves(&res.position, side) {
            res.state = res.mate_state(side);
            debug!(state = ?res.state, "game starts in a finished state");
        }
        Ok(res)
    }

    fn start(position: Position, rules: Rules) -> Game {
        let mut res = Game {
            position,
            history: Vec::new(),
            state: GameState::InPlay,
            check: [false; 2],
            draw_offers: [false; 2],
            moves_since_capture: 0,
            repeat: Repetitions::new(),
            rules,
        };
        res.repeat.push(&res.position);
        res.update_checks();
        res
    }

    fn update_checks(&mut self) {
        for side in Side::iter() {
            self.check[side.index()] = attack::is_attacked(&self.position, side);
        }
    }

    fn mate_state(&self, stuck: Side) -> GameState {
        if self.check[stuck.index()] {
            GameState::checkmate(stuck.opposite())
        } else {
            GameState::stalemate(stuck)
        }
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Returns all the committed moves, in order
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.position.side()
    }

    #[inline]
    pub fn is_in_check(&self, s: Side) -> bool {
        self.check[s.index()]
    }

    #[inline]
    pub fn captured(&self) -> &[Piece] {
        self.position.captured()
    }

    /// Returns the number of half-moves since the last capture
    #[inline]
    pub fn moves_since_capture(&self) -> u32 {
        self.moves_since_capture
    }

    #[inline]
    pub fn draw_offered(&self, s: Side) -> bool {
        self.draw_offers[s.index()]
    }

    /// Returns how many times the current position has occurred in this game
    pub fn repetition_count(&self) -> usize {
        self.repeat.repeat_count(&self.position)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.state.is_draw()
    }

    /// Returns the legal moves of the piece on `sq`
    ///
    /// Moves of the side not to move are returned as well, though they cannot be submitted.
    pub fn legal_moves(&self, sq: Square) -> MoveList {
        legal::legal_moves(&self.position, sq)
    }

    /// Returns all the legal moves of the side to move
    pub fn all_legal_moves(&self) -> MoveList {
        legal::all_legal_moves(&self.position, self.position.side())
    }

    /// Finds the legal move of the side to move which goes from `src` to `dst`
    ///
    /// Castling is found by the source and destination squares of the king. For promotions,
    /// `promote` selects the new kind; without it, no promotion is found.
    pub fn find_move(&self, src: Square, dst: Square, promote: Option<Kind>) -> Option<Move> {
        let piece = self.position.piece_at(src)?;
        if piece.side != self.position.side() {
            return None;
        }
        legal::legal_moves_for(&self.position, &piece)
            .into_iter()
            .find(|mv| match *mv {
                Move::Simple { end, .. } => end.square == dst && mv.promote_to() == promote,
                Move::Castling { castling, .. } => {
                    promote.is_none()
                        && dst == src.with_file(geometry::castling_king_dst_file(castling))
                }
            })
    }

    fn check_move(&self, mv: &Move) -> Result<(), MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameEnded);
        }
        if let Move::Simple { start, end, .. } = *mv {
            if start.side != end.side {
                return Err(MoveError::DisloyaltyForbidden);
            }
        }
        if mv.side() != self.position.side() {
            return Err(MoveError::WrongSide);
        }
        let piece = match *mv {
            Move::Simple { start, .. } => self
                .position
                .piece_at(start.square)
                .filter(|p| p.kind == start.kind && p.side == start.side),
            Move::Castling { side, .. } => self.position.king(side),
        }
        .ok_or(MoveError::PieceNotFound)?;
        if !legal::legal_moves_for(&self.position, &piece).contains(mv) {
            return Err(MoveError::InvalidMove);
        }
        Ok(())
    }

    /// Submits move `mv` of the side to move
    ///
    /// After the move is committed, the game checks for mate and stalemate first. A move which
    /// ends the game this way leaves the moves-since-capture counter and the repetition table
    /// untouched. Otherwise, the counter and the table are updated, and the game checks for the
    /// fifty move rule and then for repetitions.
    pub fn submit_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        if let Err(e) = self.check_move(mv) {
            trace!(?mv, error = %e, "move rejected");
            return Err(e);
        }
        let captured = self.position.commit(mv).map_err(|e| {
            warn!(?mv, error = %e, "legal move failed to commit");
            MoveError::from(e)
        })?;

        if cfg!(feature = "selftest") {
            if let Err(e) = self.position.validate() {
                panic!("invalid position after move {:?}: {}", mv, e);
            }
        }

        self.history.push(*mv);
        self.update_checks();
        debug!(?mv, ?captured, "move committed");

        let side = self.position.side();
        if !legal::has_legal_moves(&self.position, side) {
            self.state = self.mate_state(side);
        } else {
            if captured.is_some() || (self.rules.reset_on_pawn_move && mv.is_pawn_move()) {
                self.moves_since_capture = 0;
            } else {
                self.moves_since_capture += 1;
            }
            let repeats = self.repeat.push(&self.position);
            if self.moves_since_capture >= self.rules.fifty_move_limit {
                self.state = GameState::Draw50Moves;
            } else if repeats >= self.rules.repetition_limit {
                self.state = GameState::Draw3Fold;
            }
        }
        if self.is_finished() {
            debug!(state = ?self.state, "game finished");
        }
        Ok(())
    }

    /// Resigns the game on behalf of side `s`
    pub fn resign(&mut self, s: Side) -> Result<(), MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameEnded);
        }
        self.state = GameState::resigned(s);
        debug!(side = %s, "side resigned");
        Ok(())
    }

    /// Offers a draw on behalf of side `s`
    ///
    /// Offers stay valid until rescinded. When both sides have offered a draw, the game ends.
    pub fn offer_draw(&mut self, s: Side) -> Result<(), MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameEnded);
        }
        self.draw_offers[s.index()] = true;
        if self.draw_offers.iter().all(|&x| x) {
            self.state = GameState::DrawAgreed;
            debug!("draw agreed");
        }
        Ok(())
    }

    /// Rescinds the draw offer of side `s`
    pub fn rescind_draw(&mut self, s: Side) -> Result<(), MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameEnded);
        }
        self.draw_offers[s.index()] = false;
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
