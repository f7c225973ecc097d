use ndarray::{Array1, ArrayView1};

pub trait LossFn {
    /// The loss of a single prediction against its target.
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;

    /// The error signal that starts the backward pass.
    ///
    /// Implementations return the *descent direction*, `-dL/dy_pred`, so the accumulated
    /// gradients get added to the parameters when updating.
    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;
}
