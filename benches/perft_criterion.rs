use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_arena::game_state::game_state::GameState;
use plum_arena::move_generation::perft::{perft, perft_parallel};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    position: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "start",
        position: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "kiwipete",
        position: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "position_3",
        position: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
        expected_nodes: &[14, 191, 2812],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let game =
            GameState::from_position_text(case.position).expect("benchmark position should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before timing.
            assert_eq!(
                perft(&game, depth).nodes,
                *expected_nodes,
                "node mismatch for {} depth {}",
                case.name,
                depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &depth,
                |b, &depth| b.iter(|| black_box(perft(black_box(&game), depth).nodes)),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{}_parallel", case.name), depth),
                &depth,
                |b, &depth| b.iter(|| black_box(perft_parallel(black_box(&game), depth).nodes)),
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
