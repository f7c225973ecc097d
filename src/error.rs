use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

use ndarray_rand::rand_distr::NormalError;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MlpErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum MlpErr {
    /// A shape invariant was violated (e.g. an input sample that doesn't match the first layer).
    SizeMismatch {
        /// Human-readable context for the mismatch (e.g. "input", "target").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },

    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),

    /// A dataset without samples, training over it would divide by zero.
    EmptyDataset,

    /// The training configuration has an invalid value.
    InvalidConfig(String),

    /// The parameter initialization could not be built.
    InvalidInit(String),

    /// All the configured epochs have already been run.
    TrainingCompleted { epochs: usize },

    /// A dataset file has a malformed line.
    Dataset { line: usize, msg: String },

    /// Failed to read a file.
    Io { path: PathBuf, source: io::Error },

    /// Failed to parse a JSON document.
    Json(serde_json::Error),
}

impl Display for MlpErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlpErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            MlpErr::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MlpErr::EmptyDataset => write!(f, "the dataset has no samples"),
            MlpErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            MlpErr::InvalidInit(msg) => write!(f, "invalid parameter initialization: {msg}"),
            MlpErr::TrainingCompleted { epochs } => {
                write!(f, "training already completed its {epochs} epochs")
            }
            MlpErr::Dataset { line, msg } => write!(f, "dataset line {line}: {msg}"),
            MlpErr::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            MlpErr::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl Error for MlpErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlpErr::Io { source, .. } => Some(source),
            MlpErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MlpErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<NormalError> for MlpErr {
    fn from(e: NormalError) -> Self {
        Self::InvalidInit(e.to_string())
    }
}
