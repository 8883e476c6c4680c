//! Batch gradient-descent training loop.
//!
//! ```rust
//! use ndarray::array;
//! use tabulearn::model::{LinearRegression, MatrixSamples};
//! use tabulearn::trainer::Trainer;
//!
//! let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
//! let y = array![1.0, 3.0, 5.0];
//! let samples = MatrixSamples::new(x.view(), y.view()).unwrap();
//!
//! let mut model = LinearRegression::new();
//! let trainer = Trainer::builder(0.1).max_epochs(2000).build();
//! let history = trainer.fit(&mut model, &samples).unwrap();
//!
//! assert!(history.losses.last().unwrap() < &1e-6);
//! ```

use crate::error::{Error, Result};
use crate::loss::Loss;
use crate::model::{Link, Regressor, Samples};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Training hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub learning_rate: f64,
    pub max_epochs: usize,
    /// Log the loss every this many epochs; 0 disables progress logs.
    pub log_every: usize,
    /// Stop once the loss changes by less than this between epochs.
    pub tolerance: Option<f64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            max_epochs: 1000,
            log_every: 100,
            tolerance: None,
        }
    }
}

impl TrainerConfig {
    /// Parses a JSON object; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Record of one [`Trainer::fit`] run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrainingHistory {
    /// Loss after each completed epoch.
    pub losses: Vec<f64>,
    pub epochs: usize,
    pub final_params: Vec<f64>,
}

pub struct Trainer {
    config: TrainerConfig,
}

pub struct TrainerBuilder {
    config: TrainerConfig,
}

impl TrainerBuilder {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            config: TrainerConfig {
                learning_rate,
                ..TrainerConfig::default()
            },
        }
    }

    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.config.max_epochs = epochs;
        self
    }

    pub fn log_every(mut self, epochs: usize) -> Self {
        self.config.log_every = epochs;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Trainer {
        Trainer {
            config: self.config,
        }
    }
}

impl Trainer {
    pub fn builder(learning_rate: f64) -> TrainerBuilder {
        TrainerBuilder::new(learning_rate)
    }

    pub fn from_config(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Runs up to `max_epochs` full-batch steps on `model`.
    ///
    /// θ is reset to zeros when it is not sized for `samples`; otherwise
    /// training resumes from the current parameters.
    pub fn fit<K, L, S>(&self, model: &mut Regressor<K, L>, samples: &S) -> Result<TrainingHistory>
    where
        K: Link,
        L: Loss,
        S: Samples,
    {
        if samples.is_empty() {
            return Err(Error::EmptySamples);
        }
        if model.n_features() != samples.n_features() {
            debug!(n_features = samples.n_features(), "initializing parameters");
            model.begin(samples.n_features());
        }

        let cfg = &self.config;
        let mut losses: Vec<f64> = Vec::with_capacity(cfg.max_epochs);
        for epoch in 0..cfg.max_epochs {
            model.train(cfg.learning_rate, samples)?;
            let loss = model.loss(samples)?;

            if cfg.log_every > 0 && (epoch + 1) % cfg.log_every == 0 {
                info!(epoch = epoch + 1, loss, "training progress");
            }
            let converged = match (cfg.tolerance, losses.last()) {
                (Some(tol), Some(previous)) => (previous - loss).abs() < tol,
                _ => false,
            };
            losses.push(loss);
            if converged {
                info!(epoch = epoch + 1, loss, "loss converged");
                break;
            }
        }

        Ok(TrainingHistory {
            epochs: losses.len(),
            losses,
            final_params: model.params().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearRegression, MatrixSamples};
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::io::Write;

    #[test]
    fn test_config_defaults_and_json() {
        assert_eq!(TrainerConfig::default().learning_rate, 0.01);

        let cfg = TrainerConfig::from_json_str(r#"{"learning_rate": 0.5, "tolerance": 1e-9}"#).unwrap();
        assert_eq!(cfg.learning_rate, 0.5);
        assert_eq!(cfg.max_epochs, 1000);
        assert_eq!(cfg.tolerance, Some(1e-9));

        assert!(matches!(
            TrainerConfig::from_json_str("{\"max_epochs\": -1}"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_epochs": 7, "log_every": 0}}"#).unwrap();
        let cfg = TrainerConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.max_epochs, 7);
        assert_eq!(cfg.log_every, 0);
    }

    #[test]
    fn test_builder() {
        let trainer = Trainer::builder(0.2).max_epochs(10).log_every(5).tolerance(1e-3).build();
        assert_eq!(
            trainer.config(),
            &TrainerConfig {
                learning_rate: 0.2,
                max_epochs: 10,
                log_every: 5,
                tolerance: Some(1e-3),
            }
        );
    }

    #[test]
    fn test_fit_sizes_params_and_records_losses() {
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
        let y = array![1.0, 3.0, 5.0];
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new();
        let history = Trainer::builder(0.1)
            .max_epochs(3000)
            .build()
            .fit(&mut model, &samples)
            .unwrap();

        assert_eq!(history.epochs, 3000);
        assert_eq!(history.losses.len(), 3000);
        assert!(history.losses.windows(2).all(|w| w[1] <= w[0] + 1e-12));
        assert_abs_diff_eq!(history.final_params[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(history.final_params[1], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fit_stops_on_tolerance() {
        let x = array![[1.0], [1.0]];
        let y = array![2.0, 2.0];
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new();
        let history = Trainer::builder(0.5)
            .max_epochs(1000)
            .tolerance(1e-12)
            .build()
            .fit(&mut model, &samples)
            .unwrap();
        assert!(history.epochs < 1000);
    }

    #[test]
    fn test_fit_empty_samples() {
        let x = ndarray::Array2::<f64>::zeros((0, 1));
        let y = ndarray::Array1::<f64>::zeros(0);
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();
        let mut model = LinearRegression::new();
        assert!(matches!(
            Trainer::builder(0.1).build().fit(&mut model, &samples),
            Err(Error::EmptySamples)
        ));
    }
}
