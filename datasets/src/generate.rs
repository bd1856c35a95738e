//! Utility functions for randomly generating datasets

use mlplay::{ClassLabel, Dataset, Float, Point, PointId};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::{Distribution, Uniform};
use tracing::warn;

/// Center of a synthetic cluster together with the label its samples receive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterSpec<F> {
    pub x: F,
    pub y: F,
    pub label: Option<ClassLabel>,
}

impl<F: Float> CenterSpec<F> {
    pub fn new(x: F, y: F, label: Option<ClassLabel>) -> Self {
        CenterSpec { x, y, label }
    }

    /// A center whose samples carry `label`
    pub fn labelled(x: F, y: F, label: ClassLabel) -> Self {
        CenterSpec::new(x, y, Some(label))
    }

    /// A center whose samples are unlabelled
    pub fn unlabelled(x: F, y: F) -> Self {
        CenterSpec::new(x, y, None)
    }
}

fn clamp_unit<F: Float>(value: F) -> F {
    value.max(F::zero()).min(F::one())
}

/// Generate `count` points scattered around `centers`.
///
/// Sample `i` is drawn around `centers[i % centers.len()]`, so the clusters receive points in
/// turn. Each coordinate gets independent uniform noise in `[-spread, spread]` and is then clamped
/// into `[0, 1]`. Points are numbered `0..count`.
///
/// `generate_clusters` is the quickest way to assemble a playground dataset:
///
/// ```rust
/// use mlplay::ClassLabel;
/// use mlplay_datasets::generate::{generate_clusters, CenterSpec};
/// use rand_isaac::Isaac64Rng;
/// use ndarray_rand::rand::SeedableRng;
///
/// let mut rng = Isaac64Rng::seed_from_u64(42);
/// let centers = [
///     CenterSpec::labelled(0.3, 0.7, ClassLabel::A),
///     CenterSpec::labelled(0.7, 0.3, ClassLabel::B),
/// ];
/// let dataset = generate_clusters(10, &centers, 0.12, &mut rng);
///
/// assert_eq!(dataset.len(), 10);
/// assert_eq!(dataset.points()[1].label, Some(ClassLabel::B));
/// ```
pub fn generate_clusters<F: Float>(
    count: usize,
    centers: &[CenterSpec<F>],
    spread: F,
    rng: &mut impl Rng,
) -> Dataset<F> {
    if centers.is_empty() {
        if count > 0 {
            warn!(count, "no cluster centers given, generating an empty dataset");
        }
        return Dataset::new();
    }

    let spread = if spread.is_finite() {
        spread.abs()
    } else {
        F::zero()
    };
    let noise = Uniform::new_inclusive(-spread, spread);

    let points = (0..count)
        .map(|i| {
            let center = &centers[i % centers.len()];
            let x = clamp_unit(center.x + noise.sample(rng));
            let y = clamp_unit(center.y + noise.sample(rng));

            Point::new(PointId(i as u64), x, y, center.label)
        })
        .collect::<Vec<_>>();

    // identifiers are `0..count` and therefore unique
    Dataset::from_points(points).unwrap_or_default()
}
