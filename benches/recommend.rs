use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sugerir::data::Interaction;
use sugerir::recommend::Sar;
use sugerir::similarity::SimilarityMetric;

/// Synthetic interaction log: `n_events` events over a user universe of
/// n_events/10 and an item universe of 500, Zipf-ish item skew so the
/// co-occurrence matrix has realistic hot rows.
fn generate_interactions(n_events: usize) -> Vec<Interaction> {
    let mut rng = StdRng::seed_from_u64(42);
    let n_users = (n_events / 10).max(10);
    let n_items = 500;

    (0..n_events)
        .map(|_| {
            let user = rng.gen_range(0..n_users);
            // Square the draw to skew toward low item indices.
            let raw: f64 = rng.gen();
            let item = ((raw * raw) * n_items as f64) as usize;
            let weight = rng.gen_range(1.0f32..5.0);
            let timestamp = rng.gen_range(0.0f64..10_000.0);
            Interaction::new(format!("user_{user}"), format!("item_{item}"))
                .with_weight(weight)
                .with_timestamp(timestamp)
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("sar_fit");

    for size in [1_000, 10_000, 50_000].iter() {
        let events = generate_interactions(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut model = Sar::new()
                    .with_similarity_type(SimilarityMetric::Jaccard)
                    .with_time_decay(1_000.0);
                model.fit(black_box(&events)).expect("fit succeeds");
                black_box(model)
            });
        });
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("sar_recommend");

    for size in [10_000, 50_000].iter() {
        let events = generate_interactions(*size);
        let mut model = Sar::new()
            .with_similarity_type(SimilarityMetric::Jaccard)
            .with_remove_seen(true);
        model.fit(&events).expect("fit succeeds");

        let users: Vec<String> = model
            .user_vocab()
            .expect("fitted")
            .iter()
            .take(100)
            .map(String::from)
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let recs = model
                    .recommend_k_items(black_box(&users), 10)
                    .expect("fitted");
                black_box(recs)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_recommend);
criterion_main!(benches);
