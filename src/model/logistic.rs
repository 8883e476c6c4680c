//! Logistic regression by gradient descent.

use crate::error::Result;
use crate::loss::Loss;
use crate::model::{Link, Regressor};

/// The logistic link `1 / (1 + e^-z)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Link for Sigmoid {
    fn apply(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }
}

/// Logistic regression: `h(x) = σ(θ·x)`.
///
/// Trained with the same step as
/// [`LinearRegression`](crate::model::LinearRegression). Swap the reported
/// loss with `Regressor::<Sigmoid, CrossEntropy>::new()`.
pub type LogisticRegression = Regressor<Sigmoid>;

impl<L: Loss> Regressor<Sigmoid, L> {
    /// Whether the predicted probability reaches `threshold`.
    pub fn classify(&self, x: &[f64], threshold: f64) -> Result<bool> {
        Ok(self.predict(x)? >= threshold)
    }
}
