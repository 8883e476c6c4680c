//! Recovers `y = a*x + b` from noisy samples with both update rules.

use ndarray::{Array1, Array2};
use rand::Rng;
use tabulearn::model::{LinearRegression, MatrixSamples, UpdateRule};
use tabulearn::trainer::Trainer;
use tracing_subscriber::EnvFilter;

const A: f64 = 3.0;
const B: f64 = -1.5;
const SAMPLES: usize = 10_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = rand::thread_rng();
    let xs: Vec<f64> = (0..SAMPLES).map(|_| rng.gen_range(0.0..2.0)).collect();
    let y: Array1<f64> = xs
        .iter()
        .map(|x| A * x + B + rng.gen_range(-0.5..0.5))
        .collect();
    let x = Array2::from_shape_fn((SAMPLES, 2), |(i, j)| if j == 0 { 1.0 } else { xs[i] });
    let samples = MatrixSamples::new(x.view(), y.view())?;

    let trainer = Trainer::builder(0.01).max_epochs(5000).log_every(500).build();
    for rule in [UpdateRule::Sequential, UpdateRule::Simultaneous] {
        let mut model = LinearRegression::new().with_update_rule(rule);
        let history = trainer.fit(&mut model, &samples)?;
        println!(
            "{:?}: b={:.4} a={:.4} (true b={} a={}) after {} epochs",
            rule, history.final_params[0], history.final_params[1], B, A, history.epochs
        );
    }
    Ok(())
}
