use thiserror::Error;

/// Error returned when the neighbour search hyperparameters are invalid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnnParamsError {
    #[error("number of neighbours must be at least 1")]
    NNeighbors,
}

#[derive(Error, Debug)]
pub enum KnnError {
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] KnnParamsError),
    #[error(transparent)]
    MlplayError(#[from] mlplay::Error),
}

pub type Result<T> = std::result::Result<T, KnnError>;
