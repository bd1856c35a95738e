//! Impurity of class tallies and the quality of a single split
use mlplay::{ClassCounts, ClassLabel, Dataset, Float, Label, SplitAxis};
use tracing::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Given the class frequencies calculates the gini impurity of the subset.
///
/// `Σ p_i (1 - p_i)` over the class proportions `p_i`. A pure subset scores `0`, two balanced
/// classes score `0.5`. An empty subset scores `0`.
pub fn gini_impurity<F: Float, L: Label>(counts: &ClassCounts<L>) -> F {
    let n_samples = counts.total();
    if n_samples == 0 {
        return F::zero();
    }

    let n_samples = F::cast(n_samples);
    counts
        .iter()
        .map(|(_, count)| F::cast(count) / n_samples)
        .map(|p| p * (F::one() - p))
        .sum()
}

/// Outcome of splitting a dataset at `threshold` along `axis`
///
/// Points with `value <= threshold` go left, the others go right.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct SplitEvaluation<F> {
    pub axis: SplitAxis,
    pub threshold: F,
    /// Number of points on the left, labelled or not
    pub n_left: usize,
    /// Number of points on the right, labelled or not
    pub n_right: usize,
    pub parent_counts: ClassCounts<ClassLabel>,
    pub left_counts: ClassCounts<ClassLabel>,
    pub right_counts: ClassCounts<ClassLabel>,
    pub gini_parent: F,
    pub gini_left: F,
    pub gini_right: F,
    /// `gini_parent - w_l gini_left - w_r gini_right`, where the weights are the shares of
    /// labelled points, `w_l = left_counts.total() / parent_counts.total()` and likewise for
    /// `w_r`. Unlabelled points in `n_left` and `n_right` do not enter the weights.
    pub information_gain: F,
}

/// Evaluate the split of `dataset` at `threshold` along `axis`
///
/// Unlabelled points are counted in the side sizes but carry no class, so they take no part in
/// the impurities. The gain weighs each side by its share of labelled points and is zero when no
/// point is labelled.
///
/// ```rust
/// use mlplay::{ClassLabel, Dataset, SplitAxis};
/// use mlplay_trees::evaluate_split;
///
/// let mut dataset = Dataset::new();
/// dataset.push(0.1, 0.1, Some(ClassLabel::A));
/// dataset.push(0.2, 0.2, Some(ClassLabel::A));
/// dataset.push(0.8, 0.8, Some(ClassLabel::B));
/// dataset.push(0.9, 0.9, Some(ClassLabel::B));
///
/// let split = evaluate_split(&dataset, SplitAxis::X, 0.5);
/// assert_eq!(split.gini_parent, 0.5);
/// assert_eq!(split.information_gain, 0.5);
/// ```
pub fn evaluate_split<F: Float>(dataset: &Dataset<F>, axis: SplitAxis, threshold: F) -> SplitEvaluation<F> {
    let mut left_counts = ClassCounts::new();
    let mut right_counts = ClassCounts::new();
    let mut parent_counts = ClassCounts::new();
    let (mut n_left, mut n_right) = (0, 0);

    for point in dataset.iter() {
        let goes_left = point.value(axis) <= threshold;
        if goes_left {
            n_left += 1;
        } else {
            n_right += 1;
        }

        if let Some(label) = point.label {
            parent_counts.add(label);
            if goes_left {
                left_counts.add(label);
            } else {
                right_counts.add(label);
            }
        }
    }

    let gini_parent = gini_impurity(&parent_counts);
    let gini_left = gini_impurity(&left_counts);
    let gini_right = gini_impurity(&right_counts);

    let information_gain = if parent_counts.is_empty() {
        F::zero()
    } else {
        let n_parent = F::cast(parent_counts.total());
        let w_left = F::cast(left_counts.total()) / n_parent;
        let w_right = F::cast(right_counts.total()) / n_parent;

        gini_parent - w_left * gini_left - w_right * gini_right
    };

    SplitEvaluation {
        axis,
        threshold,
        n_left,
        n_right,
        parent_counts,
        left_counts,
        right_counts,
        gini_parent,
        gini_left,
        gini_right,
        information_gain,
    }
}

/// Midpoints between consecutive distinct values along `axis`
pub fn candidate_thresholds<F: Float>(dataset: &Dataset<F>, axis: SplitAxis) -> Vec<F> {
    let mut values = dataset.iter().map(|p| p.value(axis)).collect::<Vec<_>>();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Greater));
    values.dedup();

    values
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) / F::cast(2.0))
        .collect()
}

/// The split with the highest information gain over both axes
///
/// This is the greedy choice a decision tree makes at each node. Candidates are the midpoints
/// between consecutive distinct coordinates, the X axis is scanned before the Y axis and the
/// first of several equally good splits is kept. Returns `None` if no axis has two distinct
/// values.
pub fn best_split<F: Float>(dataset: &Dataset<F>) -> Option<SplitEvaluation<F>> {
    let mut best: Option<SplitEvaluation<F>> = None;

    for &axis in &[SplitAxis::X, SplitAxis::Y] {
        for threshold in candidate_thresholds(dataset, axis) {
            let split = evaluate_split(dataset, axis, threshold);
            trace!(?axis, threshold = %threshold, gain = %split.information_gain, "candidate split");

            // override best when the gain improved
            best = match best.take() {
                None => Some(split),
                Some(current) if split.information_gain > current.information_gain => Some(split),
                current => current,
            };
        }
    }

    best
}
