pub mod activations;
mod grads;
pub mod loss;
mod mlp;
mod trace;

pub use grads::Grads;
pub use mlp::{Dims, Mlp};
pub use trace::Trace;
