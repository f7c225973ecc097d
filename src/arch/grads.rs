use ndarray::{Array1, Array2};

use super::Dims;

/// Per-epoch gradient accumulators, one per parameter of the network.
///
/// `Mlp::backward` only ever adds into them, the owner resets them with `zero`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grads {
    pub(super) dw1: Array2<f64>,
    pub(super) db1: Array1<f64>,
    pub(super) dw2: Array2<f64>,
    pub(super) db2: Array1<f64>,
}

impl Grads {
    /// Creates zeroed accumulators shaped after `dims`.
    pub fn zeros(dims: Dims) -> Self {
        let Dims {
            input,
            hidden,
            output,
        } = dims;

        Self {
            dw1: Array2::zeros((hidden, input)),
            db1: Array1::zeros(hidden),
            dw2: Array2::zeros((output, hidden)),
            db2: Array1::zeros(output),
        }
    }

    /// The dimensions of the network these accumulators belong to.
    pub fn dims(&self) -> Dims {
        Dims::new(self.dw1.ncols(), self.dw1.nrows(), self.dw2.nrows())
    }

    /// Resets every accumulator to zero, keeping their shapes.
    pub fn zero(&mut self) {
        self.dw1.fill(0.);
        self.db1.fill(0.);
        self.dw2.fill(0.);
        self.db2.fill(0.);
    }

    /// Whether every accumulated value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.dw1.iter().all(|&g| g == 0.)
            && self.db1.iter().all(|&g| g == 0.)
            && self.dw2.iter().all(|&g| g == 0.)
            && self.db2.iter().all(|&g| g == 0.)
    }

    /// The euclidean norm of all the accumulators taken as a single vector.
    pub fn norm(&self) -> f64 {
        let sq = |a: f64, &g: &f64| a + g * g;

        (self.dw1.iter().fold(0., sq)
            + self.db1.iter().fold(0., sq)
            + self.dw2.iter().fold(0., sq)
            + self.db2.iter().fold(0., sq))
        .sqrt()
    }

    pub fn dw1(&self) -> &Array2<f64> {
        &self.dw1
    }

    pub fn db1(&self) -> &Array1<f64> {
        &self.db1
    }

    pub fn dw2(&self) -> &Array2<f64> {
        &self.dw2
    }

    pub fn db2(&self) -> &Array1<f64> {
        &self.db2
    }
}
