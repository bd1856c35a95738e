use mlplay::traits::Classify;
use mlplay::{ClassLabel, Coordinates, Dataset, Float, Point, SplitAxis};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::algorithm::{best_split, SplitEvaluation};

/// A decision tree of depth one
///
/// Points with `value <= threshold` along `axis` receive the majority label of the left side of
/// the split, the others the majority label of the right side. A side without labelled points
/// falls back to the majority of the whole dataset.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionStump<F> {
    axis: SplitAxis,
    threshold: F,
    left: Option<ClassLabel>,
    right: Option<ClassLabel>,
}

impl<F: Float> DecisionStump<F> {
    /// Stump predicting the majority label on each side of `split`
    pub fn from_split(split: &SplitEvaluation<F>) -> Self {
        let fallback = split.parent_counts.most_frequent().copied();

        DecisionStump {
            axis: split.axis,
            threshold: split.threshold,
            left: split.left_counts.most_frequent().copied().or(fallback),
            right: split.right_counts.most_frequent().copied().or(fallback),
        }
    }

    /// Stump on the split with the highest information gain
    ///
    /// Returns `None` if the points cannot be split, for example when there are less than two
    /// of them.
    pub fn fit(dataset: &Dataset<F>) -> Option<Self> {
        best_split(dataset).map(|split| Self::from_split(&split))
    }

    pub fn axis(&self) -> SplitAxis {
        self.axis
    }

    pub fn threshold(&self) -> F {
        self.threshold
    }

    /// Predictions of the left and the right side
    pub fn predictions(&self) -> (Option<ClassLabel>, Option<ClassLabel>) {
        (self.left, self.right)
    }

    pub fn classify(&self, query: &impl Coordinates<F>) -> Option<ClassLabel> {
        let [x, y] = query.coords();
        let value = match self.axis {
            SplitAxis::X => x,
            SplitAxis::Y => y,
        };

        if value <= self.threshold {
            self.left
        } else {
            self.right
        }
    }
}

impl<F: Float> Classify<F> for DecisionStump<F> {
    fn classify(&self, point: &Point<F>) -> Option<ClassLabel> {
        DecisionStump::classify(self, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_split;

    #[test]
    fn predicts_majority_per_side() {
        let mut dataset = Dataset::new();
        dataset.push(0.1, 0.5, Some(ClassLabel::A));
        dataset.push(0.2, 0.5, Some(ClassLabel::A));
        dataset.push(0.3, 0.5, Some(ClassLabel::B));
        dataset.push(0.7, 0.5, Some(ClassLabel::B));
        dataset.push(0.9, 0.5, Some(ClassLabel::B));

        let stump = DecisionStump::from_split(&evaluate_split(&dataset, SplitAxis::X, 0.4));
        assert_eq!(stump.predictions(), (Some(ClassLabel::A), Some(ClassLabel::B)));
        assert_eq!(stump.classify(&[0.4, 0.0]), Some(ClassLabel::A));
        assert_eq!(stump.classify(&[0.41, 0.0]), Some(ClassLabel::B));
    }

    #[test]
    fn empty_side_falls_back_to_parent_majority() {
        let mut dataset = Dataset::new();
        dataset.push(0.1, 0.5, Some(ClassLabel::B));
        dataset.push(0.2, 0.5, Some(ClassLabel::B));
        dataset.push(0.3, 0.5, Some(ClassLabel::A));

        let stump = DecisionStump::from_split(&evaluate_split(&dataset, SplitAxis::X, 0.95));
        assert_eq!(stump.predictions(), (Some(ClassLabel::B), Some(ClassLabel::B)));
    }

    #[test]
    fn fitted_stump_separates_the_diagonal() {
        let mut dataset = Dataset::new();
        dataset.push(0.1, 0.1, Some(ClassLabel::A));
        dataset.push(0.2, 0.2, Some(ClassLabel::A));
        dataset.push(0.8, 0.8, Some(ClassLabel::B));
        dataset.push(0.9, 0.9, Some(ClassLabel::B));

        let stump = DecisionStump::fit(&dataset).unwrap();
        assert_eq!(stump.axis(), SplitAxis::X);
        assert_eq!(
            Classify::classify_all(&stump, &dataset),
            dataset.labels()
        );
    }

    #[test]
    fn single_point_cannot_be_split() {
        let mut dataset = Dataset::new();
        dataset.push(0.5, 0.5, Some(ClassLabel::A));
        assert!(DecisionStump::fit(&dataset).is_none());
    }
}
