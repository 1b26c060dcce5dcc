use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use common::board::{map_to_grid, Topology, PIECES_PER_PLAYER};
use common::movability::is_movable_on;

fn map_every_piece_position(topology: Topology) {
    for seat in topology.seats() {
        for position in -1..=topology.finish_position() {
            for piece in 0..PIECES_PER_PLAYER {
                black_box(map_to_grid(position, *seat, piece, topology));
            }
        }
    }
}

fn predict_every_roll(topology: Topology) {
    for position in -1..=topology.finish_position() {
        for roll in 1..=6 {
            black_box(is_movable_on(topology, position, roll));
        }
    }
}

fn board_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("board");

    group.bench_function("map_cross_board", |b| {
        b.iter(|| map_every_piece_position(Topology::Cross4))
    });

    group.bench_function("map_star_board", |b| {
        b.iter(|| map_every_piece_position(Topology::Star8))
    });

    group.bench_function("predict_star_board", |b| {
        b.iter(|| predict_every_roll(Topology::Star8))
    });

    group.finish();
}

criterion_group!(benches, board_bench);
criterion_main!(benches);
