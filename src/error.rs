use thiserror::Error;

/// Errors surfaced by the prediction core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Batting and bowling sides are the same team.
    #[error("Batting and bowling teams must be different (both set to {team})")]
    InvalidMatchup { team: String },

    /// The model collaborator failed for a feature row.
    #[error("Model inference failed: {0}")]
    ModelInference(String),

    /// A form field fell outside the accepted input domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A what-if was requested before any base prediction was made.
    #[error("No base prediction available; run a prediction first")]
    NoBasePrediction,
}

pub type PredictResult<T> = std::result::Result<T, PredictError>;
