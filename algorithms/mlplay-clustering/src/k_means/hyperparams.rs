use mlplay::{Float, ParamGuard};
use ndarray_rand::rand::Rng;

use super::algorithm::KMeans;
use super::errors::{KMeansError, KMeansParamsError};
use super::init::InitBounds;

#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for a [k-means session](crate::KMeans).
pub struct KMeansValidParams<F: Float, R: Rng> {
    /// The number of clusters the session partitions the points into.
    n_clusters: usize,
    /// `run` stops as soon as the SSE changes by at most `tolerance` between two cycles.
    tolerance: F,
    /// `run` stops after `max_n_iterations` cycles even if the `tolerance` convergence
    /// condition has not been met.
    max_n_iterations: u64,
    /// Box in which fresh and reseeded centroids are drawn.
    init_bounds: InitBounds<F>,
    /// The random number generator
    rng: R,
}

#[derive(Clone, Debug, PartialEq)]
/// A helper struct used to construct a set of [valid hyperparameters](KMeansValidParams) for
/// a [k-means session](crate::KMeans) (using the builder pattern).
pub struct KMeansParams<F: Float, R: Rng>(KMeansValidParams<F, R>);

impl<F: Float, R: Rng> KMeansParams<F, R> {
    /// `new` lets us configure the session:
    /// * we will be looking for `n_clusters` clusters;
    /// * `run` is considered converged if the SSE changes by at most `tolerance` between two
    ///   consecutive cycles;
    /// * `run` gives up after `max_n_iterations` cycles.
    ///
    /// Defaults are provided if optional parameters are not specified:
    /// * `tolerance = 1e-8`
    /// * `max_n_iterations = 100`
    /// * `init_bounds = [0.1, 0.9]`
    pub fn new(n_clusters: usize, rng: R) -> Self {
        Self(KMeansValidParams {
            n_clusters,
            tolerance: F::cast(1e-8),
            max_n_iterations: 100,
            init_bounds: InitBounds::default(),
            rng,
        })
    }

    /// Change the value of `tolerance`
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Change the value of `max_n_iterations`
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }

    /// Change the box random centroids are drawn from
    pub fn init_bounds(mut self, low: F, high: F) -> Self {
        self.0.init_bounds = InitBounds::new(low, high);
        self
    }

    /// Check the hyperparameters and open a session with random centroids
    pub fn start(self) -> Result<KMeans<F, R>, KMeansError> {
        Ok(KMeans::new(self.check()?))
    }
}

impl<F: Float, R: Rng> ParamGuard for KMeansParams<F, R> {
    type Checked = KMeansValidParams<F, R>;
    type Error = KMeansParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.n_clusters == 0 {
            Err(KMeansParamsError::NClusters)
        } else if !(self.0.tolerance > F::zero()) {
            Err(KMeansParamsError::Tolerance)
        } else if self.0.max_n_iterations == 0 {
            Err(KMeansParamsError::MaxIterations)
        } else if !self.0.init_bounds.is_valid() {
            Err(KMeansParamsError::InitBounds)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng> KMeansValidParams<F, R> {
    /// The number of clusters the session partitions the points into.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// `run` is considered converged once the SSE changes by at most `tolerance`.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// Upper limit on the number of cycles performed by `run`.
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    pub fn init_bounds(&self) -> &InitBounds<F> {
        &self.init_bounds
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Open a session with random centroids
    pub fn start(self) -> KMeans<F, R> {
        KMeans::new(self)
    }

    pub(crate) fn set_n_clusters(&mut self, n_clusters: usize) {
        self.n_clusters = n_clusters;
    }

    pub(crate) fn bounds_and_rng(&mut self) -> (&InitBounds<F>, &mut R) {
        (&self.init_bounds, &mut self.rng)
    }
}
