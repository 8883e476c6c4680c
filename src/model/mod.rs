//! Gradient-descent regressors.
//!
//! A [`Regressor`] is a parameter vector θ plus two strategies fixed at the
//! type level: a [`Link`] mapping the linear score `θ·x` to a prediction, and
//! a [`Loss`] used for reporting. [`LinearRegression`] and
//! [`LogisticRegression`] differ only in their link.
//!
//! There is no implicit intercept: add a constant feature (for datasets,
//! [`Dataset::add_x0`](crate::dataset::Dataset::add_x0)) to learn one.

pub mod linear;
pub mod logistic;
pub mod samples;

pub use linear::{Identity, LinearRegression};
pub use logistic::{LogisticRegression, Sigmoid};
pub use samples::{ColumnSamples, MatrixSamples, Samples};

use crate::error::{Error, Result};
use crate::loss::{Loss, SquaredError};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Maps the linear score `θ·x` to a prediction.
pub trait Link {
    fn apply(z: f64) -> f64;
}

/// Order in which one training step writes θ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateRule {
    /// Each θ_j is updated before the gradient of θ_(j+1) is computed, so
    /// later dimensions see the already-moved earlier ones.
    #[default]
    Sequential,
    /// The full gradient is computed from the current θ, then applied at once.
    Simultaneous,
}

/// Full-batch gradient-descent regressor over a link function `K`.
#[derive(Clone, Debug)]
pub struct Regressor<K: Link, L: Loss = SquaredError> {
    theta: Array1<f64>,
    rule: UpdateRule,
    loss_fn: L,
    _link: PhantomData<K>,
}

impl<K: Link, L: Loss + Default> Default for Regressor<K, L> {
    fn default() -> Self {
        Self::with_loss(L::default())
    }
}

impl<K: Link, L: Loss + Default> Regressor<K, L> {
    /// Unsized regressor with the default loss; call [`begin`](Self::begin)
    /// (or let the trainer do it) before training.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Link, L: Loss> Regressor<K, L> {
    pub fn with_loss(loss_fn: L) -> Self {
        Self {
            theta: Array1::zeros(0),
            rule: UpdateRule::default(),
            loss_fn,
            _link: PhantomData,
        }
    }

    pub fn with_update_rule(mut self, rule: UpdateRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn update_rule(&self) -> UpdateRule {
        self.rule
    }

    /// Resets θ to `n` zeros.
    pub fn begin(&mut self, n: usize) {
        self.theta = Array1::zeros(n);
    }

    pub fn params(&self) -> ArrayView1<'_, f64> {
        self.theta.view()
    }

    /// Number of features θ is sized for.
    pub fn n_features(&self) -> usize {
        self.theta.len()
    }

    /// Prediction for one feature vector: `K(θ·x)`.
    ///
    /// # Errors
    ///
    /// [`Error::FeatureMismatch`] when `x` and θ differ in length.
    pub fn predict(&self, x: &[f64]) -> Result<f64> {
        self.check(x.len())?;
        Ok(self.predict_unchecked(x))
    }

    /// Predictions for every row of `samples`.
    pub fn predict_all(&self, samples: &impl Samples) -> Result<Array1<f64>> {
        self.check(samples.n_features())?;
        let mut buf = Vec::with_capacity(samples.n_features());
        Ok((0..samples.len())
            .map(|row| {
                samples.features_into(row, &mut buf);
                self.predict_unchecked(&buf)
            })
            .collect())
    }

    /// Loss over every sample.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySamples`] without rows, [`Error::FeatureMismatch`] when
    /// θ is not sized for the samples.
    pub fn loss(&self, samples: &impl Samples) -> Result<f64> {
        if samples.is_empty() {
            return Err(Error::EmptySamples);
        }
        let predictions = self.predict_all(samples)?;
        let labels: Array1<f64> = (0..samples.len()).map(|row| samples.label(row)).collect();
        Ok(self.loss_fn.loss(predictions.view(), labels.view()))
    }

    /// One full-batch gradient step with learning rate `rate`.
    ///
    /// For each dimension j the step is `θ_j -= rate * Σ(pred - y) x_j / n`.
    /// The order in which θ is written follows the configured
    /// [`UpdateRule`].
    pub fn train(&mut self, rate: f64, samples: &impl Samples) -> Result<()> {
        if samples.is_empty() {
            return Err(Error::EmptySamples);
        }
        self.check(samples.n_features())?;
        let n = samples.len() as f64;
        let mut buf = Vec::with_capacity(samples.n_features());

        match self.rule {
            UpdateRule::Sequential => {
                for j in 0..self.theta.len() {
                    let mut grad = 0.0;
                    for row in 0..samples.len() {
                        samples.features_into(row, &mut buf);
                        grad += (self.predict_unchecked(&buf) - samples.label(row)) * buf[j];
                    }
                    self.theta[j] -= rate * grad / n;
                }
            }
            UpdateRule::Simultaneous => {
                let mut grad = Array1::<f64>::zeros(self.theta.len());
                for row in 0..samples.len() {
                    samples.features_into(row, &mut buf);
                    let residual = self.predict_unchecked(&buf) - samples.label(row);
                    grad.scaled_add(residual, &ArrayView1::from(buf.as_slice()));
                }
                self.theta.scaled_add(-rate / n, &grad);
            }
        }
        Ok(())
    }

    fn check(&self, got: usize) -> Result<()> {
        if got != self.theta.len() {
            return Err(Error::FeatureMismatch {
                expected: self.theta.len(),
                got,
            });
        }
        Ok(())
    }

    fn predict_unchecked(&self, x: &[f64]) -> f64 {
        K::apply(self.theta.dot(&ArrayView1::from(x)))
    }
}
