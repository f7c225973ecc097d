use ndarray::{Array1, ArrayView1};

/// Everything a forward pass computes for one sample.
///
/// `Mlp::backward` takes the trace by value, so a trace backs exactly one backward pass and
/// can't outlive the sample it was computed for.
#[derive(Debug, Clone)]
pub struct Trace<'x> {
    /// The input sample.
    pub x: ArrayView1<'x, f64>,
    /// Hidden pre-activation, `W1 x + b1`.
    pub s1: Array1<f64>,
    /// Hidden activation, `tanh(s1)`.
    pub x1: Array1<f64>,
    /// Output pre-activation, `W2 x1 + b2`.
    pub s2: Array1<f64>,
    /// Network output, `tanh(s2)`.
    pub x2: Array1<f64>,
}

impl Trace<'_> {
    /// Borrows the network output.
    pub fn output(&self) -> ArrayView1<'_, f64> {
        self.x2.view()
    }

    /// Drops the intermediate values, keeping only the network output.
    pub fn into_output(self) -> Array1<f64> {
        self.x2
    }
}
