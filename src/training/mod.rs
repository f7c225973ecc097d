mod evaluation;
mod history;
mod trainer;

pub use evaluation::{argmax, evaluate, Evaluation};
pub use history::{EpochReport, History};
pub use trainer::{Phase, Trainer};
