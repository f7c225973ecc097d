use ndarray::{linalg, Array1, Array2, ArrayView1, Axis};
use rand::Rng;

use super::{
    activations::Tanh,
    loss::{LossFn, Sse},
    Grads, Trace,
};
use crate::{initialization::ParamInit, MlpErr, Result};

/// The sizes of the three layers of an `Mlp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub input: usize,
    pub hidden: usize,
    pub output: usize,
}

impl Dims {
    pub fn new(input: usize, hidden: usize, output: usize) -> Self {
        Self {
            input,
            hidden,
            output,
        }
    }
}

/// A two layer fully connected network, `input -> hidden -> output`, with `tanh` applied on
/// both layers.
///
/// Gradients are derived by hand in `backward`, there's no autodiff graph behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array2<f64>,
    b2: Array1<f64>,
    act_fn: Tanh,
    loss_fn: Sse,
}

impl Mlp {
    /// Creates a network with every parameter set to zero.
    pub fn zeros(dims: Dims) -> Self {
        let Dims {
            input,
            hidden,
            output,
        } = dims;

        Self::new_unchecked(
            Array2::zeros((hidden, input)),
            Array1::zeros(hidden),
            Array2::zeros((output, hidden)),
            Array1::zeros(output),
        )
    }

    /// Creates a network from explicit parameters.
    ///
    /// # Arguments
    /// * `w1` - Hidden layer weights, `hidden x input`.
    /// * `b1` - Hidden layer biases, `hidden`.
    /// * `w2` - Output layer weights, `output x hidden`.
    /// * `b2` - Output layer biases, `output`.
    ///
    /// # Returns
    /// The network, or `MlpErr::SizeMismatch` if the shapes aren't consistent with each other.
    pub fn from_params(
        w1: Array2<f64>,
        b1: Array1<f64>,
        w2: Array2<f64>,
        b2: Array1<f64>,
    ) -> Result<Self> {
        check_len("b1", b1.len(), w1.nrows())?;
        check_len("w2 columns", w2.ncols(), w1.nrows())?;
        check_len("b2", b2.len(), w2.nrows())?;

        Ok(Self::new_unchecked(w1, b1, w2, b2))
    }

    /// Creates a network sampling every parameter from `init`.
    ///
    /// # Arguments
    /// * `dims` - The sizes of the layers.
    /// * `init` - How to generate the initial values.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// The network, or `MlpErr::InvalidInit` if `init` can't generate values.
    pub fn init<R: Rng + ?Sized>(dims: Dims, init: &ParamInit, rng: &mut R) -> Result<Self> {
        let Dims {
            input,
            hidden,
            output,
        } = dims;

        let w1 = init.generate((hidden, input), rng)?;
        let b1 = init.generate(hidden, rng)?;
        let w2 = init.generate((output, hidden), rng)?;
        let b2 = init.generate(output, rng)?;

        Ok(Self::new_unchecked(w1, b1, w2, b2))
    }

    fn new_unchecked(
        w1: Array2<f64>,
        b1: Array1<f64>,
        w2: Array2<f64>,
        b2: Array1<f64>,
    ) -> Self {
        Self {
            w1,
            b1,
            w2,
            b2,
            act_fn: Tanh::new(),
            loss_fn: Sse::new(),
        }
    }

    pub fn dims(&self) -> Dims {
        Dims::new(self.w1.ncols(), self.w1.nrows(), self.w2.nrows())
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `x` - The input sample.
    ///
    /// # Returns
    /// The trace of the pass, or `MlpErr::SizeMismatch` if `x` doesn't fit the input layer.
    pub fn forward<'x>(&self, x: ArrayView1<'x, f64>) -> Result<Trace<'x>> {
        check_len("input", x.len(), self.w1.ncols())?;

        let act_fn = self.act_fn;

        let s1 = self.w1.dot(&x) + &self.b1;
        let x1 = s1.mapv(|z| act_fn.f(z));
        let s2 = self.w2.dot(&x1) + &self.b2;
        let x2 = s2.mapv(|z| act_fn.f(z));

        Ok(Trace { x, s1, x1, s2, x2 })
    }

    /// Computes the network output for `x`.
    pub fn predict(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        Ok(self.forward(x)?.into_output())
    }

    /// The loss of the network output against a target.
    pub fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        check_len("target", y.len(), y_pred.len())?;
        Ok(self.loss_fn.loss(y_pred, y))
    }

    /// Backpropagates the error of one sample, **adding** its gradients into `grads`.
    ///
    /// The accumulated values are the descent direction (`-dL/dp`), so `update` adds them.
    ///
    /// # Arguments
    /// * `t` - The target of the sample.
    /// * `trace` - The forward pass of the same sample, consumed here.
    /// * `grads` - The accumulators, shaped after this network.
    ///
    /// # Returns
    /// `MlpErr::SizeMismatch` if `t`, `trace` or `grads` don't match the network.
    pub fn backward(
        &self,
        t: ArrayView1<f64>,
        trace: Trace<'_>,
        grads: &mut Grads,
    ) -> Result<()> {
        let dims = self.dims();
        check_len("target", t.len(), dims.output)?;
        check_len("trace input", trace.x.len(), dims.input)?;
        check_len("trace hidden", trace.s1.len(), dims.hidden)?;
        check_len("trace hidden activation", trace.x1.len(), dims.hidden)?;
        check_len("trace output", trace.s2.len(), dims.output)?;
        check_len("trace output activation", trace.x2.len(), dims.output)?;
        check_grads(dims, grads)?;

        let act_fn = self.act_fn;
        let Trace { x, s1, x1, s2, x2 } = trace;

        let mut d_s2 = self.loss_fn.loss_prime(x2.view(), t);
        d_s2.zip_mut_with(&s2, |d, &z| *d *= act_fn.df(z));

        let mut d_s1 = self.w2.t().dot(&d_s2);
        d_s1.zip_mut_with(&s1, |d, &z| *d *= act_fn.df(z));

        grads.db1 += &d_s1;
        grads.db2 += &d_s2;

        // outer products, accumulated in place (beta = 1)
        let d_s1 = d_s1.insert_axis(Axis(1));
        let d_s2 = d_s2.insert_axis(Axis(1));
        linalg::general_mat_mul(1., &d_s1, &x.insert_axis(Axis(0)), 1., &mut grads.dw1);
        linalg::general_mat_mul(1., &d_s2, &x1.insert_axis(Axis(0)), 1., &mut grads.dw2);

        Ok(())
    }

    /// Makes a step of length `step` along the accumulated gradients, `p += step * dp` for
    /// every parameter.
    ///
    /// # Returns
    /// `MlpErr::SizeMismatch` if `grads` doesn't match the network.
    pub fn update(&mut self, grads: &Grads, step: f64) -> Result<()> {
        check_grads(self.dims(), grads)?;

        self.w1.scaled_add(step, &grads.dw1);
        self.b1.scaled_add(step, &grads.db1);
        self.w2.scaled_add(step, &grads.dw2);
        self.b2.scaled_add(step, &grads.db2);

        Ok(())
    }

    pub fn w1(&self) -> &Array2<f64> {
        &self.w1
    }

    pub fn b1(&self) -> &Array1<f64> {
        &self.b1
    }

    pub fn w2(&self) -> &Array2<f64> {
        &self.w2
    }

    pub fn b2(&self) -> &Array1<f64> {
        &self.b2
    }
}

fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(MlpErr::SizeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

fn check_grads(dims: Dims, grads: &Grads) -> Result<()> {
    let got = grads.dims();
    check_len("grads input", got.input, dims.input)?;
    check_len("grads hidden", got.hidden, dims.hidden)?;
    check_len("grads output", got.output, dims.output)
}
