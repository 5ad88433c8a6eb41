//! Legal move generation
//!
//! Legality is checked by simulation: the move is committed on a copy of the position, and then
//! the own king is tested for attacks.

use crate::attack;
use crate::geometry;
use crate::movegen;
use crate::moves::{Move, MoveList};
use crate::position::{Piece, Position};
use crate::types::{CastlingSide, Side, Square};

use tracing::{trace, warn};

fn is_castling_legal(pos: &Position, side: Side, castling: CastlingSide) -> bool {
    if attack::is_attacked(pos, side) {
        return false;
    }
    let Some(king_idx) = pos.king_index(side) else {
        return false;
    };

    let mut transit = pos.clone();
    let king = &mut transit.pieces[king_idx];
    king.square = king
        .square
        .with_file(geometry::castling_transit_file(castling));
    if attack::is_attacked(&transit, side) {
        return false;
    }

    let mut next = pos.clone();
    next.commit(&Move::castling(side, castling)).is_ok() && !attack::is_attacked(&next, side)
}

/// Checks the legality of a pseudo-legal move
fn is_pseudo_legal_move_legal(pos: &Position, mv: &Move) -> bool {
    match *mv {
        Move::Simple { start, .. } => {
            let mut next = pos.clone();
            next.commit(mv).is_ok() && !attack::is_attacked(&next, start.side)
        }
        Move::Castling { side, castling } => is_castling_legal(pos, side, castling),
    }
}

/// Returns the legal moves of `piece`
///
/// The moves are generated regardless of the side to move.
pub fn legal_moves_for(pos: &Position, piece: &Piece) -> MoveList {
    let mut list = movegen::pseudo_legal(pos, piece);
    list.retain(|mv| {
        let legal = is_pseudo_legal_move_legal(pos, mv);
        if !legal {
            trace!(?mv, "rejecting move which exposes the king");
        }
        legal
    });
    list
}

/// Returns the legal moves of the piece standing on `sq`
///
/// If the square is empty, returns an empty list.
pub fn legal_moves(pos: &Position, sq: Square) -> MoveList {
    match pos.piece_at(sq) {
        Some(piece) => legal_moves_for(pos, &piece),
        None => MoveList::new(),
    }
}

/// Returns all the legal moves of side `s`, in the order of the pieces in the position
pub fn all_legal_moves(pos: &Position, s: Side) -> MoveList {
    let mut res = MoveList::new();
    for piece in pos.side_pieces(s) {
        let moves = legal_moves_for(pos, piece);
        if res.try_extend_from_slice(&moves).is_err() {
            warn!(side = %s, "move list overflow, truncating");
            break;
        }
    }
    res
}

/// Returns `true` if side `s` has at least one legal move
pub fn has_legal_moves(pos: &Position, s: Side) -> bool {
    pos.side_pieces(s).any(|piece| {
        movegen::pseudo_legal(pos, piece)
            .iter()
            .any(|mv| is_pseudo_legal_move_legal(pos, mv))
    })
}

/// Returns `true` if `mv` is legal in `pos`
///
/// The side to move is not taken into account, i.e. the move is checked as if it was the move
/// of `mv.side()`.
pub fn is_legal(pos: &Position, mv: &Move) -> bool {
    let piece = match *mv {
        Move::Simple { start, .. } => match pos.piece_at(start.square) {
            Some(p) if p == start => p,
            _ => return false,
        },
        Move::Castling { side, .. } => match pos.king(side) {
            Some(k) => k,
            None => return false,
        },
    };
    movegen::pseudo_legal(pos, &piece).contains(mv) && is_pseudo_legal_move_legal(pos, mv)
}

/// Returns `true` if side `s` is checkmated
pub fn is_checkmate(pos: &Position, s: Side) -> bool {
    attack::is_attacked(pos, s) && !has_legal_moves(pos, s)
}

/// Returns `true` if side `s` is stalemated
pub fn is_stalemate(pos: &Position, s: Side) -> bool {
    !attack::is_attacked(pos, s) && !has_legal_moves(pos, s)
}
