//! A two layer `tanh` perceptron trained with hand written backpropagation.
//!
//! `arch::Mlp` holds the parameters and computes the forward and backward passes,
//! `training::Trainer` drives full-batch gradient descent over a fixed amount of epochs and
//! evaluates the network on a training and a test set after every one of them.

pub mod arch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod initialization;
pub mod training;

pub use error::{MlpErr, Result};
