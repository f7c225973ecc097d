use ndarray::{Array, Dimension, ShapeBuilder};
use ndarray_rand::{rand_distr::Normal, RandomExt};
use rand::Rng;
use serde::Deserialize;

use crate::{MlpErr, Result};

/// How the parameters of a network get their initial values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamInit {
    /// Every parameter starts with the same value.
    Const { value: f64 },

    /// Parameters are sampled from a normal distribution.
    Normal { mean: f64, std_dev: f64 },
}

impl Default for ParamInit {
    /// Small values around zero: `N(0, 1e-6)`.
    fn default() -> Self {
        Self::Normal {
            mean: 0.,
            std_dev: 1e-6,
        }
    }
}

impl ParamInit {
    /// Checks the initialization can actually generate values.
    ///
    /// # Errors
    /// Returns `MlpErr::InvalidInit` for non finite values or a negative standard deviation.
    pub fn validate(&self) -> Result<()> {
        match *self {
            ParamInit::Const { value } if !value.is_finite() => {
                Err(MlpErr::InvalidInit(format!("constant {value} is not finite")))
            }
            ParamInit::Normal { mean, .. } if !mean.is_finite() => {
                Err(MlpErr::InvalidInit(format!("mean {mean} is not finite")))
            }
            ParamInit::Normal { std_dev, .. } if !(std_dev >= 0.) || !std_dev.is_finite() => {
                Err(MlpErr::InvalidInit(format!(
                    "standard deviation {std_dev} must be finite and non negative"
                )))
            }
            ParamInit::Normal { mean, std_dev } => Normal::new(mean, std_dev)
                .map(|_| ())
                .map_err(MlpErr::from),
            ParamInit::Const { .. } => Ok(()),
        }
    }

    /// Generates an array of the given shape.
    ///
    /// # Arguments
    /// * `shape` - The shape of the generated array.
    /// * `rng` - The random number generator to sample from, untouched by `Const`.
    ///
    /// # Returns
    /// The generated array or an error if the distribution is invalid.
    pub fn generate<Sh, D, R>(&self, shape: Sh, rng: &mut R) -> Result<Array<f64, D>>
    where
        Sh: ShapeBuilder<Dim = D>,
        D: Dimension,
        R: Rng + ?Sized,
    {
        self.validate()?;

        match *self {
            ParamInit::Const { value } => Ok(Array::from_elem(shape, value)),
            ParamInit::Normal { mean, std_dev } => {
                let normal = Normal::new(mean, std_dev)?;
                Ok(Array::random_using(shape, normal, rng))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn constant() {
        let init = ParamInit::Const { value: 0.25 };
        let params: Array2<f64> = init.generate((3, 2), &mut seeded_rng()).unwrap();

        assert_eq!(params.dim(), (3, 2));
        assert!(params.iter().all(|&p| p == 0.25));
    }

    #[test]
    fn normal_is_reproducible() {
        let init = ParamInit::Normal {
            mean: 0.,
            std_dev: 1.,
        };

        let a: Array1<f64> = init.generate(16, &mut seeded_rng()).unwrap();
        let b: Array1<f64> = init.generate(16, &mut seeded_rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn default_is_small() {
        let params: Array1<f64> = ParamInit::default()
            .generate(1000, &mut seeded_rng())
            .unwrap();

        assert!(params.iter().all(|p| p.abs() < 1e-4));
        assert!(params.iter().any(|&p| p != 0.));
    }

    #[test]
    fn invalid_std_dev() {
        let init = ParamInit::Normal {
            mean: 0.,
            std_dev: -1.,
        };

        assert!(matches!(init.validate(), Err(MlpErr::InvalidInit(_))));
        assert!(matches!(
            init.generate(4, &mut seeded_rng()),
            Err(MlpErr::InvalidInit(_))
        ));

        let init = ParamInit::Normal {
            mean: 0.,
            std_dev: f64::NAN,
        };
        assert!(matches!(init.validate(), Err(MlpErr::InvalidInit(_))));

        let init = ParamInit::Normal {
            mean: 0.,
            std_dev: 0.,
        };
        assert!(init.validate().is_ok());
    }

    #[test]
    fn deserialize() {
        let init: ParamInit =
            serde_json::from_str(r#"{ "kind": "normal", "mean": 0.0, "std_dev": 0.5 }"#).unwrap();
        assert_eq!(
            init,
            ParamInit::Normal {
                mean: 0.,
                std_dev: 0.5
            }
        );

        let init: ParamInit = serde_json::from_str(r#"{ "kind": "const", "value": 0.0 }"#).unwrap();
        assert_eq!(init, ParamInit::Const { value: 0. });
    }
}
