use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Sum of squared error loss function. Not averaged over the output dimension.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Sse;

impl Sse {
    /// Returns a new `Sse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Sse {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        (&y_pred - &y).mapv(|d| d * d).sum()
    }

    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        (&y - &y_pred) * 2.
    }
}
