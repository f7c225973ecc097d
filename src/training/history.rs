use std::{
    fmt::{self, Display},
    num::NonZeroUsize,
    time::Duration,
};

use super::Evaluation;

/// What a single epoch left behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// Zero based epoch index.
    pub epoch: usize,
    pub train: Evaluation,
    pub test: Evaluation,
    /// Wall-clock time since training started.
    pub elapsed: Duration,
}

impl Display for EpochReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch {} : loss {}, error {:.2} %, test error: {:.2} %, elapsed time: {}s",
            self.epoch,
            self.train.loss,
            100. * self.train.error_rate(),
            100. * self.test.error_rate(),
            self.elapsed.as_secs()
        )
    }
}

/// Every report of a training run, in epoch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    reports: Vec<EpochReport>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            reports: Vec::with_capacity(epochs),
        }
    }

    pub fn push(&mut self, report: EpochReport) {
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[EpochReport] {
        &self.reports
    }

    pub fn last(&self) -> Option<&EpochReport> {
        self.reports.last()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Samples the test error at `points` evenly spaced reports.
    ///
    /// The `i`-th report (zero based, in push order) is sampled when `i + 1` is a multiple of
    /// `len / points`, taking the division as exact. When `points` doesn't divide the amount
    /// of reports fewer points come back, when it exceeds it every report does.
    ///
    /// # Returns
    /// `(epoch, test error rate)` pairs.
    pub fn learning_curve(&self, points: NonZeroUsize) -> Vec<(usize, f64)> {
        let len = self.reports.len();
        let points = points.get().min(len);

        self.reports
            .iter()
            .enumerate()
            .filter(|(i, _)| ((i + 1) * points) % len == 0)
            .map(|(_, r)| (r.epoch, r.test.error_rate()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(epoch: usize, test_errors: usize) -> EpochReport {
        let eval = |errors| Evaluation {
            loss: 1.5,
            errors,
            samples: 10,
        };

        EpochReport {
            epoch,
            train: eval(0),
            test: eval(test_errors),
            elapsed: Duration::from_millis(2500),
        }
    }

    fn history(epochs: usize) -> History {
        let mut history = History::new();
        (0..epochs).for_each(|e| history.push(report(e, e % 10)));
        history
    }

    fn points(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn display() {
        assert_eq!(
            report(3, 1).to_string(),
            "epoch 3 : loss 1.5, error 0.00 %, test error: 10.00 %, elapsed time: 2s"
        );
    }

    #[test]
    fn learning_curve_evenly_spaced() {
        let curve = history(50).learning_curve(points(10));
        let epochs: Vec<_> = curve.iter().map(|&(e, _)| e).collect();

        assert_eq!(epochs, vec![4, 9, 14, 19, 24, 29, 34, 39, 44, 49]);
        assert_eq!(curve[0].1, 0.4);
    }

    #[test]
    fn learning_curve_single_point_is_last_epoch() {
        assert_eq!(history(7).learning_curve(points(1)), vec![(6, 0.6)]);
    }

    #[test]
    fn learning_curve_uneven() {
        let epochs: Vec<_> = history(10)
            .learning_curve(points(4))
            .into_iter()
            .map(|(e, _)| e)
            .collect();

        assert_eq!(epochs, vec![4, 9]);
        assert_eq!(history(2).learning_curve(points(4)).len(), 2);
    }

    #[test]
    fn learning_curve_follows_push_order() {
        let mut history = History::new();
        (1..10).for_each(|e| history.push(report(e, e)));

        let epochs: Vec<_> = history
            .learning_curve(points(3))
            .into_iter()
            .map(|(e, _)| e)
            .collect();
        assert_eq!(epochs, vec![3, 6, 9]);
    }

    #[test]
    fn learning_curve_huge_point_count() {
        assert_eq!(history(4).learning_curve(points(usize::MAX)).len(), 4);
    }

    #[test]
    fn learning_curve_empty() {
        assert!(History::new().learning_curve(points(3)).is_empty());
    }
}
