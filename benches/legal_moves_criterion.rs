use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use chessboard_rules::game_state::position::Position;
use chessboard_rules::move_generation::legal_move_checks::is_in_check;
use chessboard_rules::move_generation::legal_move_generator::{legal_moves, pseudo_legal_moves};
use chessboard_rules::session::game_session::GameSession;

const POSITIONS: &[(&str, &str)] = &[
    ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    ("kiwipete", "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
    ("in_check", "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
];

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_generation");

    for (name, fen) in POSITIONS {
        let position = Position::from_fen(fen).expect("benchmark FEN should parse");
        group.bench_function(format!("{name}_pseudo_legal"), |b| {
            b.iter(|| black_box(pseudo_legal_moves(black_box(&position)).len()))
        });
        group.bench_function(format!("{name}_legal"), |b| {
            b.iter(|| black_box(legal_moves(black_box(&position)).len()))
        });
        group.bench_function(format!("{name}_is_in_check"), |b| {
            b.iter(|| black_box(is_in_check(black_box(&position), position.side_to_move())))
        });
    }

    group.finish();
}

fn bench_session_moves(c: &mut Criterion) {
    let line = ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6", "e1g1"];

    c.bench_function("session_play_opening_line", |b| {
        b.iter(|| {
            let mut session = GameSession::default();
            for lan in line {
                session.play_notation(black_box(lan)).expect("opening move is legal");
            }
            black_box(session.status())
        })
    });
}

criterion_group!(legal_move_benches, bench_generation, bench_session_moves);
criterion_main!(legal_move_benches);
