use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Array2};
use tabulearn::dataset::{Column, Dataset};
use tabulearn::model::{LinearRegression, MatrixSamples, UpdateRule};
use tabulearn::preprocessing::{Max, Mean};

fn synthetic(n: usize) -> (Array2<f64>, Array1<f64>) {
    let x = Array2::from_shape_fn((n, 3), |(i, j)| match j {
        0 => 1.0,
        1 => (i % 97) as f64 / 97.0,
        _ => (i % 13) as f64 / 13.0,
    });
    let y = x.rows().into_iter().map(|r| 0.3 + 2.0 * r[1] - r[2]).collect();
    (x, y)
}

fn bench_train_step(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        let (x, y) = synthetic(*size);
        for rule in [UpdateRule::Sequential, UpdateRule::Simultaneous] {
            let id = BenchmarkId::new(format!("train_step/{:?}", rule), size);
            c.bench_with_input(id, size, |b, _| {
                let samples = MatrixSamples::new(x.view(), y.view()).unwrap();
                let mut model = LinearRegression::new().with_update_rule(rule);
                model.begin(3);
                b.iter(|| model.train(black_box(0.01), &samples).unwrap());
            });
        }
    }
}

fn bench_prepare_columns(c: &mut Criterion) {
    let csv: String = (0..5000)
        .map(|i| match i % 10 {
            0 => format!("area{},\n", i % 7),
            _ => format!("area{},{}\n", i % 7, i),
        })
        .collect();

    c.bench_function("load_fill_normalize_5000", |b| {
        b.iter(|| {
            let mut ds = Dataset::new();
            ds.add_column(Column::string("area", 0)).unwrap();
            ds.add_column(Column::int("sold", 1)).unwrap();
            ds.load_csv(black_box(csv.as_bytes()), false).unwrap();
            ds.fill("sold", &Mean).unwrap();
            ds.normalize("sold", &Max).unwrap();
            ds.normalize_string_by_one_hot("area").unwrap();
            ds.add_x0().unwrap();
            black_box(ds.len());
        });
    });
}

criterion_group!(benches, bench_train_step, bench_prepare_columns);
criterion_main!(benches);
