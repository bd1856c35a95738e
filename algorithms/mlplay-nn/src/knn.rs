use mlplay::metrics::{BinaryClassification, EvaluationValidParams, MetricsSnapshot};
use mlplay::traits::Classify;
use mlplay::{ClassCounts, ClassLabel, Coordinates, Dataset, Float, Point};
use ndarray::Array1;
use tracing::debug;

use crate::error::Result;
use crate::hyperparams::{KNearestNeighborsParams, KNearestNeighborsValidParams};
use crate::linear::nearest;

/// k-nearest-neighbours classifier
///
/// A query is labelled by majority vote among the `k` dataset points closest to it. Unlabelled
/// neighbours take up a slot but cast no vote. When both classes receive the same number of votes
/// the label met first in distance order wins, which is the label of the closest voting
/// neighbour.
///
/// The classifier borrows its dataset, adding a point is a matter of fitting again.
///
/// ## Example
///
/// ```rust
/// use mlplay::{ClassLabel, Dataset};
/// use mlplay_nn::KNearestNeighbors;
///
/// let mut dataset = Dataset::new();
/// dataset.push(0.1, 0.1, Some(ClassLabel::A));
/// dataset.push(0.2, 0.2, Some(ClassLabel::A));
/// dataset.push(0.8, 0.8, Some(ClassLabel::B));
/// dataset.push(0.9, 0.9, Some(ClassLabel::B));
///
/// let model = KNearestNeighbors::params(1).fit(&dataset).unwrap();
///
/// assert_eq!(model.classify(&[0.15, 0.15]), Some(ClassLabel::A));
/// assert_eq!(model.classify(&[0.85, 0.85]), Some(ClassLabel::B));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KNearestNeighbors<'a, F> {
    params: KNearestNeighborsValidParams,
    dataset: &'a Dataset<F>,
}

impl KNearestNeighbors<'static, f64> {
    /// Hyperparameters with `n_neighbors` neighbours
    ///
    /// The hyperparameters carry no float type, they fit `f32` and `f64` datasets alike.
    pub fn params(n_neighbors: usize) -> KNearestNeighborsParams {
        KNearestNeighborsParams::new(n_neighbors)
    }
}

impl<'a, F: Float> KNearestNeighbors<'a, F> {
    pub(crate) fn new(params: KNearestNeighborsValidParams, dataset: &'a Dataset<F>) -> Self {
        KNearestNeighbors { params, dataset }
    }

    pub fn n_neighbors(&self) -> usize {
        self.params.n_neighbors()
    }

    pub fn dataset(&self) -> &'a Dataset<F> {
        self.dataset
    }

    /// The neighbours consulted for `query`, closest first
    pub fn neighbors(&self, query: &impl Coordinates<F>) -> Vec<&'a Point<F>> {
        nearest(self.dataset.iter(), query, self.n_neighbors())
    }

    /// Vote tally of the neighbours of `query`, in the order the labels were met
    pub fn votes(&self, query: &impl Coordinates<F>) -> ClassCounts<ClassLabel> {
        self.neighbors(query)
            .into_iter()
            .filter_map(|point| point.label)
            .collect()
    }

    /// Majority label among the neighbours of `query`
    ///
    /// Returns `None` if no neighbour carries a label, in particular for an empty dataset.
    pub fn classify(&self, query: &impl Coordinates<F>) -> Option<ClassLabel> {
        self.votes(query).most_frequent().copied()
    }

    /// Leave-one-out scores for `positive`
    ///
    /// For every point, the fraction of its `min(k, n - 1)` nearest neighbours among the other
    /// points which carry `positive`. Datasets with less than two points have no scores.
    ///
    /// The denominator is the number of neighbours found, not `k`. With three points and
    /// `k = 5` every point has two neighbours, so its score is `0`, `0.5` or `1` rather than a
    /// fraction of five.
    pub fn leave_one_out_scores(&self, positive: ClassLabel) -> Array1<F> {
        if self.dataset.len() < 2 {
            return Array1::zeros(0);
        }

        self.dataset
            .iter()
            .map(|point| {
                let neighbors = nearest(
                    self.dataset.iter().filter(|other| other.id != point.id),
                    point,
                    self.n_neighbors(),
                );
                let hits = neighbors.iter().filter(|n| n.has_label(positive)).count();

                F::cast(hits) / F::cast(neighbors.len())
            })
            .collect()
    }

    /// Evaluate the leave-one-out scores against the labels of the dataset
    ///
    /// Unlabelled points count as negatives.
    pub fn leave_one_out_metrics(
        &self,
        positive: ClassLabel,
        params: &EvaluationValidParams<F>,
    ) -> Result<MetricsSnapshot<F>> {
        let scores = self.leave_one_out_scores(positive);
        let targets = if scores.is_empty() {
            Vec::new()
        } else {
            self.dataset.binary_targets(positive)
        };

        let snapshot = scores.evaluate(&targets, params)?;
        debug!(
            n_points = targets.len(),
            k = self.n_neighbors(),
            accuracy = %snapshot.accuracy,
            roc_auc = %snapshot.roc_auc,
            "leave-one-out evaluation"
        );

        Ok(snapshot)
    }
}

impl<'a, F: Float> Classify<F> for KNearestNeighbors<'a, F> {
    fn classify(&self, point: &Point<F>) -> Option<ClassLabel> {
        KNearestNeighbors::classify(self, point)
    }
}
