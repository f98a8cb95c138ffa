use chess_academy::catalog::ALEKHINE_FOUR_PAWNS;
use chess_academy::utils::perft;
use chess_academy::{Board, Color, Game, Replay};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("legal moves from start", |b| {
        b.iter(|| black_box(Board::default()).all_legal_moves(Color::White, None))
    });
    c.bench_function("build replay", |b| {
        b.iter(|| Replay::from_script(black_box(&ALEKHINE_FOUR_PAWNS)))
    });
    c.bench_function("perft 2", |b| {
        b.iter(|| perft(black_box(&Game::default()), 2))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
