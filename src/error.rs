use thiserror::Error;

/// Errors raised at the edges of the engine: leaf mutation, configuration and fitting.
/// Building a graph and running `backward` never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradError {
    #[error("Cannot set value to non-leaf nodes")]
    NotALeaf,

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Dataset length mismatch: {xs} inputs, {ys} targets")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Env var {key}={value:?}: {message}")]
    EnvParse {
        key: String,
        value: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, GradError>;
