use criterion::{Criterion, criterion_group, criterion_main};
use tee2like::Predictor;
use tee2like::synthetic::{self, COLORS};
use tee2like::training::{self, TrainConfig, TrainingRecord};

fn predictor() -> Predictor {
    let records: Vec<TrainingRecord> = synthetic::generate(5000, 42)
        .into_iter()
        .map(TrainingRecord::from)
        .collect();
    let trained = training::train(&records, &TrainConfig::default()).unwrap();
    Predictor::new(trained.model, trained.encoder).unwrap()
}

fn bench_predict_single(c: &mut Criterion) {
    let predictor = predictor();

    c.bench_function("predict 300 Red", |b| {
        b.iter(|| {
            let _ = predictor.predict(300.0, "Red");
        })
    });
}

fn bench_bulk_prediction(c: &mut Criterion) {
    let predictor = predictor();
    let items: Vec<(f64, &str)> = (0..10_000)
        .map(|i| (199.0 + (i % 1300) as f64, COLORS[i % COLORS.len()]))
        .collect();

    c.bench_function("bulk predict 10k items", |b| {
        b.iter(|| {
            for (price, color) in &items {
                let _ = predictor.predict(*price, color);
            }
        });
    });
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate 5k synthetic rows", |b| {
        b.iter(|| synthetic::generate(5000, 42))
    });
}

criterion_group!(
    benches,
    bench_predict_single,
    bench_bulk_prediction,
    bench_generate
);
criterion_main!(benches);
