//! Ordinary least-squares regression by gradient descent.

use crate::model::{Link, Regressor};

/// The identity link: predictions are the raw score `θ·x`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Link for Identity {
    fn apply(z: f64) -> f64 {
        z
    }
}

/// Linear regression: `h(x) = θ·x`.
pub type LinearRegression = Regressor<Identity>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{MatrixSamples, UpdateRule};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_predict_is_dot_product() {
        let mut model = LinearRegression::new();
        model.begin(2);
        assert_eq!(model.predict(&[3.0, 4.0]).unwrap(), 0.0);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(Error::FeatureMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_single_sequential_step() {
        // x0 = 1 bias, one feature, theta starts at zero
        let x = array![[1.0, 1.0], [1.0, 2.0]];
        let y = array![2.0, 4.0];
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new();
        model.begin(2);
        model.train(0.1, &samples).unwrap();

        // theta_0: grad = ((0-2)*1 + (0-4)*1)/2 = -3  -> 0.3
        // theta_1 sees theta_0 = 0.3: preds 0.3, 0.3
        //   grad = ((0.3-2)*1 + (0.3-4)*2)/2 = -4.55 -> 0.455
        let theta = model.params();
        assert_relative_eq!(theta[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(theta[1], 0.455, epsilon = 1e-12);
    }

    #[test]
    fn test_single_simultaneous_step() {
        let x = array![[1.0, 1.0], [1.0, 2.0]];
        let y = array![2.0, 4.0];
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new().with_update_rule(UpdateRule::Simultaneous);
        model.begin(2);
        model.train(0.1, &samples).unwrap();

        // grad = [(-2 - 4)/2, (-2 - 8)/2] = [-3, -5]
        let theta = model.params();
        assert_relative_eq!(theta[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(theta[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_loss_is_half_mse() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new();
        model.begin(1);
        // (1 + 4) / (2 * 2)
        assert_relative_eq!(model.loss(&samples).unwrap(), 1.25);
    }

    #[test]
    fn test_train_before_begin() {
        let x = array![[1.0]];
        let y = array![1.0];
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new();
        assert!(matches!(
            model.train(0.01, &samples),
            Err(Error::FeatureMismatch { expected: 0, got: 1 })
        ));
    }

    #[test]
    fn test_empty_samples() {
        let x = ndarray::Array2::<f64>::zeros((0, 2));
        let y = ndarray::Array1::<f64>::zeros(0);
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new();
        model.begin(2);
        assert!(matches!(model.loss(&samples), Err(Error::EmptySamples)));
        assert!(matches!(model.train(0.01, &samples), Err(Error::EmptySamples)));
    }

    #[test]
    fn test_loss_decreases_over_steps() {
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let y = array![1.0, 3.0, 5.0, 7.0];
        let samples = MatrixSamples::new(x.view(), y.view()).unwrap();

        let mut model = LinearRegression::new();
        model.begin(2);
        let mut previous = model.loss(&samples).unwrap();
        for _ in 0..50 {
            model.train(0.05, &samples).unwrap();
            let current = model.loss(&samples).unwrap();
            assert!(current <= previous);
            previous = current;
        }
    }
}
