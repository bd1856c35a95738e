use thiserror::Error;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    MlplayError(#[from] mlplay::Error),
    #[error("threshold must be a number between 0.0 and 1.0")]
    InvalidThreshold,
    #[error("a probability field needs at least 2 cells per side, got {0}")]
    InvalidGridSize(usize),
}
