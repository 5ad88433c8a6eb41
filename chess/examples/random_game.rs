// Plays a random game and prints the final position

use gambit::{Game, GameState, Move};
use rand::seq::SliceRandom;

fn describe(mv: &Move) -> String {
    match *mv {
        Move::Simple { start, end, .. } => {
            let mut res = format!("{}{}", start.square, end.square);
            if let Some(kind) = mv.promote_to() {
                res.push(kind.as_char());
            }
            res
        }
        Move::Castling { castling, .. } => format!("castling ({:?})", castling),
    }
}

fn main() {
    let mut rng = rand::thread_rng();
    let mut game = Game::new();

    while !game.is_finished() {
        let moves = game.all_legal_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        println!("{}: {}", game.side_to_move(), describe(mv));
        game.submit_move(mv).unwrap();
    }

    println!();
    println!("{}", game.position());
    let verdict = match game.state() {
        GameState::Draw50Moves => "draw by the fifty move rule".to_string(),
        GameState::Draw3Fold => "draw by repetition".to_string(),
        state => match game.winner() {
            Some(side) => format!("{} wins ({:?})", side, state),
            None => format!("draw ({:?})", state),
        },
    };
    println!("Game finished after {} moves: {}", game.history().len(), verdict);
    println!("Captured: {}", game.captured().len());
}
