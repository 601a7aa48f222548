use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tandem_core::{Board, CellKind, Difficulty, SeededRandom};

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &difficulty, |b, &difficulty| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let mut rng = SeededRandom::new(seed);
                black_box(Board::generate(difficulty.board_config(), &mut rng))
            });
        });
    }
    group.finish();
}

fn flood(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood");
    for difficulty in Difficulty::ALL {
        let board = Board::generate(difficulty.board_config(), &mut SeededRandom::new(1)).unwrap();
        let Some(start) = board.positions().find(|&coords| board[coords].kind == CellKind::Empty) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &board, |b, board| {
            b.iter(|| {
                let mut board = board.clone();
                black_box(board.reveal_zero_region(start))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, generate, flood);
criterion_main!(benches);
