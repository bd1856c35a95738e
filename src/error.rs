//! Error types in mlplay
//!

use thiserror::Error;

use crate::dataset::PointId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("duplicate point identifier {0}")]
    DuplicateId(PointId),
    #[error("expected inputs of equal length, got {0} != {1}")]
    MismatchedLengths(usize, usize),
}
