// ============================================================================
// Clearing Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Clearing Pass - One day through the engine at several population sizes
// 2. Algorithm Comparison - Peer-to-peer against central-only
// 3. Full Run - Roll-over, clearing and recording over a short horizon
// ============================================================================

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use energy_market::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::Arc;

/// Population of `n` prosumers plus a book where roughly half sell
fn market(n: u32, seed: u64) -> (Vec<Prosumer>, OrderBook) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut prosumers = Vec::with_capacity(n as usize);
    let mut book = OrderBook::new();

    for i in 0..n {
        let id = ParticipantId::new(i);
        prosumers.push(Prosumer::new(
            id,
            ProsumerProfile {
                house_type: HouseType::MultiFamily,
                panels: 0,
                base_demand: 0.0,
                initial_sell_price: Decimal::new(15, 2),
                sensitivity: Decimal::new(1, 2),
            },
        ));

        let amount = Decimal::new(rng.gen_range(100..2000), 3);
        let order = if rng.gen_bool(0.5) {
            Order::sell(OrderId::new(u64::from(i)), id, amount, Decimal::new(rng.gen_range(5..30), 2))
        } else {
            Order::buy(OrderId::new(u64::from(i)), id, amount)
        };
        book.submit(order).expect("valid order");
    }

    (prosumers, book)
}

// ============================================================================
// Clearing Pass Benchmarks
// ============================================================================

fn benchmark_clear_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear_day");
    let engine =
        create_from_config(MarketConfig::dutch_retail(), Arc::new(NoOpEventHandler)).unwrap();

    for n in [50u32, 200, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("PeerToPeer", n), n, |b, &n| {
            b.iter_batched(
                || market(n, 42),
                |(mut prosumers, book)| {
                    let mut central = CentralAgent::new(*engine.prices());
                    let mut rng = StdRng::seed_from_u64(7);
                    black_box(
                        engine
                            .clear_day(book, &mut prosumers, &mut central, &mut rng)
                            .unwrap(),
                    )
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// Algorithm Comparison
// ============================================================================

fn benchmark_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");
    let prices = MarketConfig::dutch_retail().central_prices();

    let algorithms: Vec<(&str, Box<dyn ClearingAlgorithm>)> = vec![
        ("PeerToPeer", Box::new(PeerToPeer::new())),
        ("CentralOnly", Box::new(CentralOnly::new())),
    ];

    for (name, algorithm) in algorithms.iter() {
        group.bench_function(*name, |b| {
            b.iter_batched(
                || market(500, 1).1,
                |mut book| {
                    let mut rng = StdRng::seed_from_u64(3);
                    black_box(algorithm.match_orders(&mut book, &prices, &mut rng).unwrap())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// Full Run
// ============================================================================

fn benchmark_simulation_run(c: &mut Criterion) {
    let config = SimulationConfig::default()
        .with_agents(200)
        .with_runs(1)
        .with_days(30)
        .with_seed(11);
    let sim = Simulation::with_event_handler(config, Arc::new(NoOpEventHandler)).unwrap();

    c.bench_function("simulation_run_30_days", |b| {
        b.iter(|| black_box(sim.run(0).unwrap()));
    });
}

criterion_group!(
    benches,
    benchmark_clear_day,
    benchmark_algorithms,
    benchmark_simulation_run,
);
criterion_main!(benches);
