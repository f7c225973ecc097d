use std::time::Instant;

use log::{debug, info};

use super::{evaluate, EpochReport, History};
use crate::{
    arch::{Dims, Grads, Mlp},
    config::TrainingConfig,
    dataset::Dataset,
    MlpErr, Result,
};

/// Where a `Trainer` stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No epoch has run yet.
    Initialized,
    /// `completed` epochs have run and there are more to go.
    Running { completed: usize },
    /// Every configured epoch has run.
    Completed,
}

/// Full-batch gradient descent over a fixed amount of epochs.
///
/// Each epoch zeroes the accumulators, adds the gradient of every training sample in order,
/// steps the parameters once by `learning_rate / N` and evaluates both datasets.
#[derive(Debug, Clone)]
pub struct Trainer {
    model: Mlp,
    grads: Grads,
    config: TrainingConfig,
    phase: Phase,
    history: History,
    start: Option<Instant>,
}

impl Trainer {
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `model` - The network to train, owned by the trainer until `into_model`.
    /// * `config` - The hyper-parameters, fixed for the whole run.
    pub fn new(model: Mlp, config: TrainingConfig) -> Self {
        let grads = Grads::zeros(model.dims());
        let history = History::with_capacity(config.epochs.get());

        Self {
            model,
            grads,
            config,
            phase: Phase::Initialized,
            history,
            start: None,
        }
    }

    /// Resets the accumulators and adds the contribution of every sample of `train`.
    ///
    /// # Errors
    /// Returns `MlpErr::SizeMismatch` if a sample doesn't fit the model.
    pub fn accumulate(&mut self, train: &Dataset) -> Result<()> {
        self.grads.zero();

        for (x, t) in train.samples() {
            let trace = self.model.forward(x)?;
            self.model.backward(t, trace, &mut self.grads)?;
        }

        debug!(
            "accumulated gradients: samples={} norm={:e}",
            train.len(),
            self.grads.norm()
        );

        Ok(())
    }

    /// Runs a single epoch.
    ///
    /// # Arguments
    /// * `train` - The samples the gradients are computed from, already scaled by `zeta`.
    /// * `test` - The samples only evaluated.
    ///
    /// # Returns
    /// The report of the epoch, also kept in the trainer's history.
    ///
    /// # Errors
    /// Returns `MlpErr::TrainingCompleted` if every configured epoch has already run, or
    /// `MlpErr::SizeMismatch` if a dataset doesn't fit the model. Nothing changes on error.
    pub fn epoch(&mut self, train: &Dataset, test: &Dataset) -> Result<EpochReport> {
        let epochs = self.config.epochs.get();
        let epoch = match self.phase {
            Phase::Initialized => 0,
            Phase::Running { completed } => completed,
            Phase::Completed => return Err(MlpErr::TrainingCompleted { epochs }),
        };

        let dims = self.model.dims();
        check_dataset(dims, train)?;
        check_dataset(dims, test)?;

        let step = self.config.learning_rate / train.len() as f64;
        let start = *self.start.get_or_insert_with(|| {
            info!(
                "training: input={} hidden={} output={} train_samples={} test_samples={} epochs={epochs} step={step:e}",
                dims.input,
                dims.hidden,
                dims.output,
                train.len(),
                test.len()
            );
            Instant::now()
        });

        self.accumulate(train)?;
        self.model.update(&self.grads, step)?;

        let report = EpochReport {
            epoch,
            train: evaluate(&self.model, train)?,
            test: evaluate(&self.model, test)?,
            elapsed: start.elapsed(),
        };
        info!("{report}");
        self.history.push(report);

        self.phase = if epoch + 1 == epochs {
            info!("training finished after {epochs} epochs");
            Phase::Completed
        } else {
            Phase::Running {
                completed: epoch + 1,
            }
        };

        Ok(report)
    }

    /// Runs every remaining epoch.
    ///
    /// # Returns
    /// The history of every epoch run so far, including those run before this call.
    pub fn run(&mut self, train: &Dataset, test: &Dataset) -> Result<&History> {
        while self.phase != Phase::Completed {
            self.epoch(train, test)?;
        }

        Ok(&self.history)
    }

    pub fn model(&self) -> &Mlp {
        &self.model
    }

    pub fn into_model(self) -> Mlp {
        self.model
    }

    /// The accumulators as left by the last epoch.
    pub fn grads(&self) -> &Grads {
        &self.grads
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

fn check_dataset(dims: Dims, dataset: &Dataset) -> Result<()> {
    if dataset.x_size() != dims.input {
        return Err(MlpErr::SizeMismatch {
            what: "dataset inputs",
            got: dataset.x_size(),
            expected: dims.input,
        });
    }

    if dataset.y_size() != dims.output {
        return Err(MlpErr::SizeMismatch {
            what: "dataset targets",
            got: dataset.y_size(),
            expected: dims.output,
        });
    }

    Ok(())
}
