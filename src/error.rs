use thiserror::Error;

/// Failures while loading a plan or evaluating a calculation.
#[derive(Error, Debug)]
pub enum PayForgeError {
    #[error("Plan File Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rank Table CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Plan/Input JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Compensation plan settings the engines cannot run with.
    #[error("Plan Configuration Error: {0}")]
    Config(String),

    /// User-entered calculator input refused at the boundary.
    #[error("Invalid Input: {0}")]
    Validation(String),
}

pub type PfResult<T> = Result<T, PayForgeError>;
