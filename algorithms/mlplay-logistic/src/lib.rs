//! # Logistic Model
//!
//! ## The Big Picture
//!
//! `mlplay-logistic` is the probabilistic classifier of the playground. Its weights are not
//! learned, students set them with sliders and watch the probability field tilt and shift.
//!
//! ## Current state
//! `mlplay-logistic` provides a two class [logistic model](LogisticModel) over the unit square,
//! the probability field and decision boundary used to draw it, and its evaluation against the
//! labels of a dataset.
//!

pub mod error;

use crate::error::{Error, Result};
use mlplay::metrics::{BinaryClassification, EvaluationValidParams, MetricsSnapshot};
use mlplay::traits::{Classify, PredictProbability};
use mlplay::{ClassLabel, Coordinates, Dataset, Float, Point};
use ndarray::{array, Array1, Array2};
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A two-class logistic model with fixed weights.
///
/// The model combines a linear function of the coordinates with the sigmoid function
/// `sigm(z) = 1/(1+exp(-z))`, mapping the unit square to `[0,1]`:
///
/// `p(x, y) = sigm(w0 + w1 x + w2 y)`
///
/// The value is read as the probability that a point belongs to class `A`. A threshold decides
/// the minimum probability needed to classify a point as `A`, which defaults to `0.5`.
///
/// ## Examples
///
/// ```rust
/// use mlplay::ClassLabel;
/// use mlplay_logistic::LogisticModel;
///
/// // class A lives in the upper left corner
/// let model = LogisticModel::new(0.0, -8.0, 8.0).with_threshold(0.7).unwrap();
///
/// assert_eq!(model.classify(&[0.2, 0.8]), ClassLabel::A);
/// assert_eq!(model.classify(&[0.8, 0.2]), ClassLabel::B);
/// assert_eq!(model.decision_boundary().map(|(slope, _)| slope), Some(1.0));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticModel<F: Float> {
    threshold: F,
    intercept: F,
    params: Array1<F>,
}

impl<F: Float> Default for LogisticModel<F> {
    /// The starting weights of the playground, `w0 = 0`, `w1 = 8`, `w2 = -8`
    fn default() -> Self {
        LogisticModel::new(F::zero(), F::cast(8.0), F::cast(-8.0))
    }
}

impl<F: Float> LogisticModel<F> {
    pub fn new(w0: F, w1: F, w2: F) -> Self {
        LogisticModel {
            threshold: F::cast(0.5),
            intercept: w0,
            params: array![w1, w2],
        }
    }

    /// Set the probability threshold for which class `A` will be predicted.
    ///
    /// Fails unless `threshold` lies in `[0, 1]`.
    pub fn with_threshold(mut self, threshold: F) -> Result<Self> {
        if !(threshold >= F::zero() && threshold <= F::one()) {
            return Err(Error::InvalidThreshold);
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn threshold(&self) -> F {
        self.threshold
    }

    /// The bias `w0`
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// The coordinate weights `[w1, w2]`
    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    /// Probability that `query` belongs to class `A`
    pub fn predict_probability(&self, query: &impl Coordinates<F>) -> F {
        let [x, y] = query.coords();
        logistic(self.intercept + self.params[0] * x + self.params[1] * y)
    }

    /// Probabilities of class `A` for every point of `dataset`, in dataset order
    pub fn predict_probabilities(&self, dataset: &Dataset<F>) -> Array1<F> {
        let mut probs = dataset.records().dot(&self.params) + self.intercept;
        probs.mapv_inplace(logistic);
        probs
    }

    /// `A` if the probability reaches the threshold, `B` otherwise
    pub fn classify(&self, query: &impl Coordinates<F>) -> ClassLabel {
        if self.predict_probability(query) >= self.threshold {
            ClassLabel::A
        } else {
            ClassLabel::B
        }
    }

    /// Fraction of labelled points whose label is predicted correctly
    ///
    /// Returns zero if no point carries a label.
    pub fn accuracy(&self, dataset: &Dataset<F>) -> F {
        let (hits, labelled) = dataset
            .iter()
            .filter_map(|point| point.label.map(|label| (point, label)))
            .fold((0usize, 0usize), |(hits, labelled), (point, label)| {
                let hit = self.classify(point) == label;
                (hits + hit as usize, labelled + 1)
            });

        if labelled == 0 {
            F::zero()
        } else {
            F::cast(hits) / F::cast(labelled)
        }
    }

    /// Probabilities on a regular `cells x cells` grid spanning the unit square
    ///
    /// `field[[i, j]]` is the probability at `x = i / (cells - 1)`, `y = j / (cells - 1)`, so the
    /// corners of the grid lie on the corners of the square. Fails for less than two cells.
    pub fn probability_field(&self, cells: usize) -> Result<Array2<F>> {
        if cells < 2 {
            return Err(Error::InvalidGridSize(cells));
        }

        let steps = F::cast(cells - 1);
        Ok(Array2::from_shape_fn((cells, cells), |(i, j)| {
            self.predict_probability(&[F::cast(i) / steps, F::cast(j) / steps])
        }))
    }

    /// The line on which the probability equals the threshold, as `(slope, intercept)` of
    /// `y = slope * x + intercept`
    ///
    /// Returns `None` if the line is vertical (`w2 = 0`) or does not exist because the threshold
    /// is `0` or `1`.
    pub fn decision_boundary(&self) -> Option<(F, F)> {
        let (w1, w2) = (self.params[0], self.params[1]);
        let logit = (self.threshold / (F::one() - self.threshold)).ln();

        if w2 == F::zero() || !logit.is_finite() {
            return None;
        }

        Some((-w1 / w2, (logit - self.intercept) / w2))
    }

    /// Evaluate the current weights against the labels of `dataset`
    ///
    /// For `positive = B` the probabilities of `B`, `1 - p`, are evaluated. Unlabelled points
    /// count as negatives.
    pub fn evaluate(
        &self,
        dataset: &Dataset<F>,
        positive: ClassLabel,
        params: &EvaluationValidParams<F>,
    ) -> Result<MetricsSnapshot<F>> {
        let mut probs = self.predict_probabilities(dataset);
        if positive == ClassLabel::B {
            probs.mapv_inplace(|p| F::one() - p);
        }

        let snapshot = probs.evaluate(&dataset.binary_targets(positive), params)?;
        debug!(
            intercept = %self.intercept,
            accuracy = %snapshot.accuracy,
            roc_auc = %snapshot.roc_auc,
            "evaluated logistic weights"
        );

        Ok(snapshot)
    }
}

impl<F: Float> PredictProbability<F> for LogisticModel<F> {
    fn predict_probability(&self, point: &Point<F>) -> F {
        LogisticModel::predict_probability(self, point)
    }

    fn predict_probabilities(&self, dataset: &Dataset<F>) -> Array1<F> {
        LogisticModel::predict_probabilities(self, dataset)
    }
}

impl<F: Float> Classify<F> for LogisticModel<F> {
    fn classify(&self, point: &Point<F>) -> Option<ClassLabel> {
        Some(LogisticModel::classify(self, point))
    }
}

/// The logistic function
fn logistic<F: Float>(x: F) -> F {
    F::one() / (F::one() + (-x).exp())
}
