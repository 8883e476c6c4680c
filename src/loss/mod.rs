//! Loss functions reported by [`Regressor::loss`](crate::model::Regressor::loss).
//!
//! A loss only evaluates; the gradient step in
//! [`Regressor::train`](crate::model::Regressor::train) is the squared-error
//! form for every link, so the loss choice changes what is reported and what
//! the trainer's tolerance check sees.

use ndarray::ArrayView1;

/// A scalar loss over a batch of predictions and their labels.
///
/// Both views have the same length, at least one.
pub trait Loss {
    fn loss(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64;
}

/// Half mean squared error: `L = Σ(pred_i - y_i)^2 / (2n)`
///
/// The factor of 1/2 cancels with the derivative, so the gradient w.r.t. a
/// prediction is `(pred - y) / n`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredError;

impl Loss for SquaredError {
    fn loss(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64 {
        let diff = &predictions - &labels;
        diff.dot(&diff) / (2.0 * predictions.len() as f64)
    }
}

/// Binary cross-entropy on probabilities:
/// `L = -(1/n) Σ(y log p + (1 - y) log(1 - p))`
///
/// Probabilities are clamped to `[eps, 1 - eps]` so saturated predictions
/// stay finite.
#[derive(Clone, Copy, Debug)]
pub struct CrossEntropy {
    pub eps: f64,
}

impl Default for CrossEntropy {
    fn default() -> Self {
        Self { eps: 1e-12 }
    }
}

impl Loss for CrossEntropy {
    fn loss(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64 {
        let total: f64 = predictions
            .iter()
            .zip(labels.iter())
            .map(|(&p, &y)| {
                let p = p.clamp(self.eps, 1.0 - self.eps);
                y * p.ln() + (1.0 - y) * (1.0 - p).ln()
            })
            .sum();
        -total / predictions.len() as f64
    }
}
