use mlplay::{Dataset, Float, ParamGuard};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{KnnParamsError, Result};
use crate::knn::KNearestNeighbors;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for the
/// [k-nearest-neighbours classifier](crate::KNearestNeighbors).
pub struct KNearestNeighborsValidParams {
    /// Number of neighbours consulted for every prediction.
    n_neighbors: usize,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
/// A helper struct used to construct a set of [valid hyperparameters](KNearestNeighborsValidParams)
/// for the [k-nearest-neighbours classifier](crate::KNearestNeighbors).
pub struct KNearestNeighborsParams(KNearestNeighborsValidParams);

impl KNearestNeighborsParams {
    pub fn new(n_neighbors: usize) -> Self {
        Self(KNearestNeighborsValidParams { n_neighbors })
    }

    /// Change the value of `n_neighbors`
    pub fn n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.0.n_neighbors = n_neighbors;
        self
    }

    /// Check the hyperparameters and bind the classifier to `dataset`
    pub fn fit<'a, F: Float>(&self, dataset: &'a Dataset<F>) -> Result<KNearestNeighbors<'a, F>> {
        Ok(self.check_ref()?.fit(dataset))
    }
}

impl Default for KNearestNeighborsParams {
    /// Five neighbours
    fn default() -> Self {
        Self::new(5)
    }
}

impl ParamGuard for KNearestNeighborsParams {
    type Checked = KNearestNeighborsValidParams;
    type Error = KnnParamsError;

    fn check_ref(&self) -> std::result::Result<&Self::Checked, Self::Error> {
        if self.0.n_neighbors == 0 {
            Err(KnnParamsError::NNeighbors)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> std::result::Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl KNearestNeighborsValidParams {
    /// Number of neighbours consulted for every prediction
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Bind the classifier to `dataset`
    ///
    /// There is nothing to learn, the dataset is borrowed and searched on every query.
    pub fn fit<'a, F: Float>(&self, dataset: &'a Dataset<F>) -> KNearestNeighbors<'a, F> {
        KNearestNeighbors::new(*self, dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<KNearestNeighborsParams>();
        has_autotraits::<KNearestNeighborsValidParams>();
    }

    #[test]
    fn n_neighbors_cannot_be_zero() {
        let res = KNearestNeighborsParams::new(0).check();
        assert!(matches!(res, Err(KnnParamsError::NNeighbors)));
    }

    #[test]
    fn default_is_five() {
        let params = KNearestNeighborsParams::default().check_unwrap();
        assert_eq!(params.n_neighbors(), 5);
        assert_eq!(
            KNearestNeighborsParams::default()
                .n_neighbors(3)
                .check_unwrap()
                .n_neighbors(),
            3
        );
    }
}
