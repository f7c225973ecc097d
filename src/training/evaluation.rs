use ndarray::ArrayView1;

use crate::{arch::Mlp, dataset::Dataset, Result};

/// Loss and misclassifications of a model over a whole dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Sum of the per-sample losses.
    pub loss: f64,
    /// Samples whose predicted class differs from the target class.
    pub errors: usize,
    pub samples: usize,
}

impl Evaluation {
    /// The fraction of misclassified samples.
    pub fn error_rate(&self) -> f64 {
        if self.samples == 0 {
            return 0.;
        }

        self.errors as f64 / self.samples as f64
    }
}

/// Runs the forward pass over every sample of `dataset`, no gradients are computed.
///
/// A sample is misclassified when `argmax(prediction) != argmax(target)`.
///
/// # Errors
/// Returns `MlpErr::SizeMismatch` if the samples don't fit the model.
pub fn evaluate(model: &Mlp, dataset: &Dataset) -> Result<Evaluation> {
    let mut loss = 0.;
    let mut errors = 0;

    for (x, t) in dataset.samples() {
        let y_pred = model.predict(x)?;
        loss += model.loss(y_pred.view(), t)?;

        if argmax(y_pred.view()) != argmax(t) {
            errors += 1;
        }
    }

    Ok(Evaluation {
        loss,
        errors,
        samples: dataset.len(),
    })
}

/// Index of the largest value, the first one wins on ties.
///
/// A `NaN` counts as larger than anything, so a diverged output is reported at its first
/// `NaN`.
pub fn argmax(v: ArrayView1<f64>) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &x)| {
            if best.is_nan() || !(x.is_nan() || x > best) {
                (best_i, best)
            } else {
                (i, x)
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::arch::Dims;

    #[test]
    fn argmax_first_wins() {
        assert_eq!(argmax(array![0.1, 0.9, 0.3].view()), 1);
        assert_eq!(argmax(array![0.5, 0.5, 0.1].view()), 0);
        assert_eq!(argmax(array![0., 0.].view()), 0);
    }

    #[test]
    fn argmax_nan_is_the_largest() {
        assert_eq!(argmax(array![f64::NAN, -1., 2.].view()), 0);
        assert_eq!(argmax(array![1., f64::NAN, 2., f64::NAN].view()), 1);
        assert_eq!(argmax(array![f64::NEG_INFINITY, -1.].view()), 1);
    }

    #[test]
    fn error_rate() {
        let eval = Evaluation {
            loss: 0.,
            errors: 1,
            samples: 4,
        };
        assert_eq!(eval.error_rate(), 0.25);
    }

    #[test]
    fn evaluate_zero_network() {
        // every output is 0, so every prediction is class 0
        let mlp = Mlp::zeros(Dims::new(2, 3, 2));
        let dataset = Dataset::new(
            array![[1., 0.], [0., 1.], [1., 1.]],
            array![[1., 0.], [0., 1.], [0., 1.]],
        )
        .unwrap();

        let eval = evaluate(&mlp, &dataset).unwrap();

        assert_eq!(eval.samples, 3);
        assert_eq!(eval.errors, 2);
        assert_eq!(eval.loss, 3.);
    }

    #[test]
    fn evaluate_rejects_mismatched_dataset() {
        let mlp = Mlp::zeros(Dims::new(2, 3, 2));
        let dataset = Dataset::new(array![[1., 0., 0.]], array![[1., 0.]]).unwrap();

        assert!(evaluate(&mlp, &dataset).is_err());
    }
}
