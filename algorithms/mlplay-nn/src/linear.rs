//! Exhaustive neighbour search
//!
//! The playground holds at most a few hundred points, a linear scan is all it takes.
use std::cmp::Ordering;

use mlplay::{Coordinates, Dataset, Float, Point, PointId};

use crate::distance::squared_distance;
use crate::error::{KnnParamsError, Result};

/// Sort `points` by squared distance to `query` and keep the first `k`
///
/// The sort is stable, so points at equal distance keep their dataset order.
pub(crate) fn nearest<'a, F, I>(points: I, query: &impl Coordinates<F>, k: usize) -> Vec<&'a Point<F>>
where
    F: Float,
    I: Iterator<Item = &'a Point<F>>,
{
    let mut candidates = points
        .map(|point| (squared_distance(point, query), point))
        .collect::<Vec<_>>();
    candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    candidates
        .into_iter()
        .take(k)
        .map(|(_, point)| point)
        .collect()
}

/// The `k` points of `dataset` closest to `query`, closest first
///
/// Returns `min(k, dataset.len())` points. Points at equal distance are returned in dataset
/// order. Fails if `k` is zero.
///
/// ```rust
/// use mlplay::{ClassLabel, Dataset};
/// use mlplay_nn::k_nearest;
///
/// let mut dataset = Dataset::new();
/// dataset.push(0.1, 0.1, Some(ClassLabel::A));
/// let far = dataset.push(0.9, 0.9, Some(ClassLabel::B));
///
/// let neighbors = k_nearest(&dataset, &[0.8, 0.8], 1).unwrap();
/// assert_eq!(neighbors[0].id, far);
/// ```
pub fn k_nearest<'a, F: Float>(
    dataset: &'a Dataset<F>,
    query: &impl Coordinates<F>,
    k: usize,
) -> Result<Vec<&'a Point<F>>> {
    if k == 0 {
        return Err(KnnParamsError::NNeighbors.into());
    }

    Ok(nearest(dataset.iter(), query, k))
}

/// Same as [`k_nearest`] with the point `excluded` removed from the dataset
pub fn k_nearest_excluding<'a, F: Float>(
    dataset: &'a Dataset<F>,
    query: &impl Coordinates<F>,
    k: usize,
    excluded: PointId,
) -> Result<Vec<&'a Point<F>>> {
    if k == 0 {
        return Err(KnnParamsError::NNeighbors.into());
    }

    Ok(nearest(
        dataset.iter().filter(|point| point.id != excluded),
        query,
        k,
    ))
}
