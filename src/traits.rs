//! Provide traits for the playground models
//!
//! Every model exposes its outputs through these traits, so the evaluation and the rendering
//! layer can treat them uniformly.
use ndarray::Array1;

use crate::dataset::{ClassLabel, Dataset, Float, Point};

/// Models producing a probability of the positive class for a point
pub trait PredictProbability<F: Float> {
    /// Probability in `[0, 1]` that `point` belongs to the positive class
    fn predict_probability(&self, point: &Point<F>) -> F;

    /// Probabilities for every point of `dataset`, in dataset order
    fn predict_probabilities(&self, dataset: &Dataset<F>) -> Array1<F> {
        dataset
            .iter()
            .map(|point| self.predict_probability(point))
            .collect()
    }
}

/// Models assigning a class label to a point
///
/// `None` means the model has no basis for a prediction, for example a neighbour search over an
/// empty dataset.
pub trait Classify<F: Float> {
    fn classify(&self, point: &Point<F>) -> Option<ClassLabel>;

    /// Predictions for every point of `dataset`, in dataset order
    fn classify_all(&self, dataset: &Dataset<F>) -> Vec<Option<ClassLabel>> {
        dataset.iter().map(|point| self.classify(point)).collect()
    }
}
