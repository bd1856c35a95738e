use thiserror::Error;

/// An error when building a k-means session with an invalid hyperparameter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansParamsError {
    #[error("n_clusters cannot be 0")]
    NClusters,
    #[error("tolerance must be greater than 0")]
    Tolerance,
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
    #[error("init bounds must satisfy 0 <= low < high <= 1")]
    InitBounds,
}

/// An error when driving a k-means session
#[derive(Error, Debug)]
pub enum KMeansError {
    /// When any of the hyperparameters are set the wrong value
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] KMeansParamsError),
    /// When an update step is requested without a fresh assignment
    #[error("update requires an assign step right before it")]
    NoAssignment,
    /// When centroids do not form a non-empty `(n_clusters, 2)` matrix
    #[error("centroids must have shape (n_clusters, 2) with n_clusters > 0, got ({0}, {1})")]
    CentroidShape(usize, usize),
    #[error(transparent)]
    MlplayError(#[from] mlplay::Error),
}
