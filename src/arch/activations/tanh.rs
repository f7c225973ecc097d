/// Hyperbolic tangent activation, applied elementwise by the network.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tanh;

impl Tanh {
    /// Returns a new `Tanh`.
    pub fn new() -> Self {
        Self
    }

    /// The activation itself, `tanh(z)`.
    pub fn f(&self, z: f64) -> f64 {
        z.tanh()
    }

    /// The derivative of the activation evaluated at the pre-activation `z`, that is
    /// `1 / cosh(z)^2`.
    pub fn df(&self, z: f64) -> f64 {
        1. / z.cosh().powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_at_zero() {
        assert_eq!(Tanh.f(0.), 0.);
        assert_eq!(Tanh.df(0.), 1.);
    }

    #[test]
    fn df_matches_one_minus_tanh_squared() {
        for z in [-3., -1.2, -0.5, 0.1, 0.7, 2.5] {
            let expected = 1. - Tanh.f(z).powi(2);
            assert!((Tanh.df(z) - expected).abs() < 1e-12, "z = {z}");
        }
    }

    #[test]
    fn saturates() {
        assert!((Tanh.f(50.) - 1.).abs() < 1e-12);
        assert!((Tanh.f(-50.) + 1.).abs() < 1e-12);
        assert_eq!(Tanh.df(1000.), 0.);
    }
}
