use std::{env, process};

use anyhow::{Context, Result};
use env_logger::Env;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use tanh_backprop::{
    arch::{Dims, Mlp},
    config::{load_config, DatasetConfig},
    dataset::Dataset,
    training::Trainer,
};

fn load_dataset(config: &DatasetConfig) -> Result<Dataset> {
    Dataset::load_csv(&config.path, config.x_size, config.y_size)
        .with_context(|| format!("loading dataset {}", config.path.display()))
}

/// Builds a logger reading its filter from `env`, falling back to `info` so every epoch
/// report gets printed.
fn logger(env: Env) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

/// The config path out of the arguments following the program name.
fn config_path(args: &[String]) -> Option<&str> {
    match args {
        [path] => Some(path.as_str()),
        _ => None,
    }
}

fn main() -> Result<()> {
    logger(Env::default()).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = config_path(&args) else {
        eprintln!("Usage: {} <config.json>", env!("CARGO_PKG_NAME"));
        process::exit(1);
    };

    let config = load_config(path).with_context(|| format!("loading config {path}"))?;
    let training = config.training;

    let mut train = load_dataset(&config.train)?;
    let test = load_dataset(&config.test)?;
    train.scale_targets(training.zeta);

    let mut rng = match training.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let dims = Dims::new(train.x_size(), training.hidden_size, train.y_size());
    let model = Mlp::init(dims, &training.init, &mut rng).context("initializing parameters")?;
    info!("initialized parameters: seed={:?} init={:?}", training.seed, training.init);

    let curve_points = training.learning_curve_points;
    let mut trainer = Trainer::new(model, training);
    let history = trainer.run(&train, &test).context("training")?;

    if let Some(points) = curve_points {
        let curve = history.learning_curve(points);
        if curve.len() != points.get() {
            warn!(
                "learning curve has {} points, {} were requested",
                curve.len(),
                points
            );
        }

        for (epoch, error) in curve {
            info!("learning curve: epoch={epoch} test_error={:.2}%", 100. * error);
        }
    }

    if let Some(last) = history.last() {
        println!(
            "final test error: {:.2} % ({} of {} samples)",
            100. * last.test.error_rate(),
            last.test.errors,
            last.test.samples
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::*;

    #[test]
    fn logs_epochs_by_default() {
        let env = Env::new().filter("TANH_BACKPROP_UNSET_LOG_FILTER");
        assert_eq!(logger(env).build().filter(), LevelFilter::Info);
    }

    #[test]
    fn takes_a_single_config_path() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(config_path(&args(&["run.json"])), Some("run.json"));
        assert_eq!(config_path(&args(&[])), None);
        assert_eq!(config_path(&args(&["a.json", "b.json"])), None);
    }
}
