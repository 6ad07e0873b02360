use criterion::{Criterion, criterion_group, criterion_main};
use hexmines_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn placement(c: &mut Criterion) {
    c.bench_function("place 180 mines on 30x30", |b| {
        let mut rng = SmallRng::seed_from_u64(0);
        b.iter(|| {
            let mut board = Board::new((30, 30)).unwrap();
            board.place_mines(black_box(180), &mut rng).unwrap();
            board
        })
    });
}

fn recompute(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut board = Board::new((30, 30)).unwrap();
    board.place_mines(180, &mut rng).unwrap();

    c.bench_function("recompute counts 30x30", |b| {
        b.iter(|| black_box(&mut board).recompute_counts())
    });
}

fn cascade(c: &mut Criterion) {
    let board = Board::load_from_definition((30, 30), &[(29, 29)]).unwrap();

    c.bench_function("cascade across 30x30", |b| {
        b.iter(|| {
            let mut board = board.clone();
            board.open(black_box((0, 0)), true).unwrap()
        })
    });
}

criterion_group!(benches, placement, recompute, cascade);
criterion_main!(benches);
