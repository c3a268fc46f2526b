use criterion::{Criterion, criterion_group, criterion_main};
use plansheet::entities::{Footprint, Part, PartCategory};
use rrg::config::RRGConfig;
use rrg::opt::RRGOptimizer;

fn bench_parts() -> Vec<Part> {
    vec![
        Part::new(
            "front".to_string(),
            "front".to_string(),
            PartCategory::FrontView,
            Footprint::new(2, 2),
        ),
        Part::new(
            "side".to_string(),
            "side".to_string(),
            PartCategory::SideView,
            Footprint::new(1, 2),
        ),
        Part::new(
            "top".to_string(),
            "top".to_string(),
            PartCategory::TopView,
            Footprint::new(2, 1),
        ),
        Part::new(
            "detail".to_string(),
            "detail".to_string(),
            PartCategory::Detail,
            Footprint::new(1, 1),
        ),
    ]
}

fn rrg_optimize_bench(c: &mut Criterion) {
    let parts = bench_parts();
    let config = RRGConfig {
        n_trials: 100,
        prng_seed: Some(0),
        ..RRGConfig::default()
    };

    c.bench_function("rrg_optimize_100_trials", |b| {
        b.iter(|| {
            let mut optimizer = RRGOptimizer::new(config.clone());
            optimizer.optimize(&parts)
        })
    });
}

criterion_group!(benches, rrg_optimize_bench);
criterion_main!(benches);
