use thiserror::Error;

/// Failures that abort a projection run. None of them leaves a partial
/// table behind: every variant is raised before the sink is touched, except
/// the I/O and CSV variants, which come from the sink itself.
#[derive(Debug, Error)]
pub enum Error {

    /// A required provider setting was absent (or blank) when the
    /// configuration was assembled.
    #[error("Missing env var: {0}")]
    Configuration(String),

    /// The embedding provider could not produce a vector for a label.
    #[error("Embedding request for '{label}' failed: {message}")]
    Provider {
        label : String,
        message : String
    },

    /// Samples do not share a common vector length.
    #[error("Sample '{label}' has dimension {actual}, but the table dimension is {expected}")]
    DimensionMismatch {
        label : String,
        expected : usize,
        actual : usize
    },

    /// Fewer source dimensions than requested output components.
    #[error("Cannot project {dim}-dimensional samples onto {components} principal directions")]
    Dimension {
        dim : usize,
        components : usize
    },

    #[error("Singular value decomposition did not converge")]
    Decomposition,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error)

}

pub type Result<T> = std::result::Result<T, Error>;
