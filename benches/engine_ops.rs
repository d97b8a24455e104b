use grid_2048::engine::{self, Direction, Grid};
use grid_2048::game::{Game, GameConfig};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn corpus() -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut grids = Vec::new();
    // Empty and two-tile starts
    grids.push(Grid::EMPTY);
    let mut g = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    grids.push(g);
    // Derive a variety of densities deterministically
    let seq = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
    for i in 0..40 {
        g = g.make_move(seq[i % seq.len()], &mut rng);
        grids.push(g);
    }
    grids
}

fn bench_shift(c: &mut Criterion) {
    let grids = corpus();
    for dir in Direction::ALL {
        c.bench_function(&format!("shift/{dir}"), |bch| {
            bch.iter(|| {
                let mut acc = 0u64;
                for &g in &grids {
                    acc ^= g.shift(dir).tile_sum();
                }
                black_box(acc)
            })
        });
    }
    c.bench_function("line/slide_and_merge", |bch| {
        bch.iter(|| black_box(engine::slide_and_merge_line(black_box(&[2u32, 2, 4, 4][..]))))
    });
}

fn bench_spawn_and_play(c: &mut Criterion) {
    c.bench_function("grid/with_random_tile", |bch| {
        bch.iter_batched(
            || (Grid::EMPTY, StdRng::seed_from_u64(7)),
            |(mut g, mut rng)| {
                for _ in 0..16 {
                    g = g.with_random_tile(&mut rng);
                }
                black_box(g)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("game/apply_cycle", |bch| {
        bch.iter_batched(
            || Game::seeded(9, GameConfig::default()),
            |mut game| {
                for i in 0..64 {
                    game.apply(Direction::ALL[i % 4]);
                }
                black_box(game.grid())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    let grids = corpus();
    c.bench_function("query/has_legal_move", |bch| {
        bch.iter(|| {
            let mut n = 0usize;
            for &g in &grids {
                n += g.has_legal_move() as usize;
            }
            black_box(n)
        })
    });
    c.bench_function("query/empty_cells", |bch| {
        bch.iter(|| {
            let mut n = 0usize;
            for &g in &grids {
                n += g.empty_cells().len();
            }
            black_box(n)
        })
    });
}

criterion_group!(engine_ops, bench_shift, bench_spawn_and_play, bench_queries);
criterion_main!(engine_ops);
