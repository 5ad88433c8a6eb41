use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gambit::{attack, legal, Game, Kind, Piece, Position, Side, Square};

const OPENINGS: [(&str, &[(&str, &str)]); 2] = [
    (
        "italian",
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("f8", "c5"),
        ],
    ),
    (
        "sicilian",
        &[
            ("e2", "e4"),
            ("c7", "c5"),
            ("g1", "f3"),
            ("d7", "d6"),
            ("d2", "d4"),
            ("c5", "d4"),
            ("f3", "d4"),
            ("g8", "f6"),
            ("b1", "c3"),
            ("a7", "a6"),
        ],
    ),
];

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn fixture(side: Side, pieces: &[(&str, Kind, Side)]) -> Position {
    Position::from_pieces(
        side,
        pieces
            .iter()
            .map(|&(s, kind, side)| Piece::new(sq(s), kind, side).moved()),
    )
    .unwrap()
}

fn positions() -> Vec<(&'static str, Position)> {
    let mut res = vec![("initial", Position::standard())];
    for (name, moves) in OPENINGS {
        let mut game = Game::new();
        for &(src, dst) in moves {
            let mv = game.find_move(sq(src), sq(dst), None).unwrap();
            game.submit_move(&mv).unwrap();
        }
        res.push((name, game.position().clone()));
    }
    res.push((
        "queen",
        fixture(
            Side::White,
            [
                ("g8", Kind::King, Side::White),
                ("b5", Kind::King, Side::Black),
                ("f5", Kind::Queen, Side::Black),
                ("d4", Kind::Queen, Side::White),
            ]
            .as_slice(),
        ),
    ));
    res.push((
        "pawn_promote",
        fixture(
            Side::White,
            [
                ("e5", Kind::King, Side::White),
                ("c5", Kind::King, Side::Black),
                ("a7", Kind::Pawn, Side::White),
                ("b7", Kind::Pawn, Side::White),
                ("g7", Kind::Pawn, Side::White),
                ("h7", Kind::Pawn, Side::White),
                ("a2", Kind::Pawn, Side::Black),
                ("h2", Kind::Pawn, Side::Black),
            ]
            .as_slice(),
        ),
    ));
    res
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for (name, pos) in positions() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(legal::all_legal_moves(&pos, pos.side()).len()))
        });
    }
}

fn bench_has_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_legal_moves");
    for (name, pos) in positions() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(legal::has_legal_moves(&pos, pos.side())))
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, pos) in positions() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(attack::is_attacked(&pos, pos.side())))
        });
    }
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit");
    for (name, pos) in positions() {
        let moves = legal::all_legal_moves(&pos, pos.side());
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    let mut next = pos.clone();
                    black_box(next.commit(mv).unwrap());
                }
            })
        });
    }
}

criterion_group!(
    chess,
    bench_legal_moves,
    bench_has_legal_moves,
    bench_is_attacked,
    bench_commit
);
criterion_main!(chess);
