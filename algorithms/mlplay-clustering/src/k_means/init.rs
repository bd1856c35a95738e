use mlplay::Float;
use ndarray::Array2;
use ndarray_rand::rand::Rng;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Box in which random centroids are drawn, the same interval on both axes
///
/// Keeping away from the border of the unit square places fresh centroids where points usually
/// are.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitBounds<F> {
    pub low: F,
    pub high: F,
}

impl<F: Float> InitBounds<F> {
    pub fn new(low: F, high: F) -> Self {
        InitBounds { low, high }
    }

    /// `0 <= low < high <= 1`
    pub fn is_valid(&self) -> bool {
        self.low >= F::zero() && self.low < self.high && self.high <= F::one()
    }

    /// Uniform sample in `[low, high)`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> F {
        self.low + (self.high - self.low) * F::cast(rng.gen::<f64>())
    }
}

impl<F: Float> Default for InitBounds<F> {
    fn default() -> Self {
        InitBounds::new(F::cast(0.1), F::cast(0.9))
    }
}

/// `n_clusters` centroids drawn uniformly from `bounds` on both axes
pub fn random_centroids<F: Float, R: Rng>(
    n_clusters: usize,
    bounds: &InitBounds<F>,
    rng: &mut R,
) -> Array2<F> {
    Array2::from_shape_fn((n_clusters, 2), |_| bounds.sample(rng))
}
