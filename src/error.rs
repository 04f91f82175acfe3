use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, OptimError>;

/// Errors produced by optimizer construction and update rules.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimError {
    /// A fixed learning rate was negative or non-finite.
    InvalidLearningRate { got: f64 },

    /// A normal initializer was configured with a non-finite mean or an
    /// invalid standard deviation.
    InvalidDistribution { mu: f64, sigma: f64 },

    /// A gradient refers to a parameter that is absent from the weight vector.
    MissingParameter { key: String },
}

impl Display for OptimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimError::InvalidLearningRate { got } => {
                write!(f, "learning rate must be finite and non-negative, got {got}")
            }
            OptimError::InvalidDistribution { mu, sigma } => {
                write!(f, "invalid normal distribution: mu = {mu}, sigma = {sigma}")
            }
            OptimError::MissingParameter { key } => {
                write!(f, "gradient key {key:?} is not present in the weight vector")
            }
        }
    }
}

impl Error for OptimError {}
