//! Common metrics for performance evaluation of binary classifiers
//!
//! Every playground model reduces to a probability of the positive class per sample. This module
//! turns those probabilities and the binary ground truth into a confusion matrix, the usual scalar
//! metrics, and ROC / precision-recall curves whose area is integrated with the trapezoidal rule.
use std::cmp::Ordering;

use ndarray::{ArrayBase, Data, Ix1};
use tracing::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::Float;
use crate::error::{Error, Result};
use crate::param_guard::ParamGuard;

/// Ratio where a zero denominator is replaced by one, so that the ratio becomes zero instead of
/// undefined.
fn guarded_ratio<F: Float>(numerator: F, denominator: F) -> F {
    if denominator == F::zero() {
        numerator
    } else {
        numerator / denominator
    }
}

/// Confusion matrix of a binary decision
///
/// Rows of the classical layout are the actual class, columns the predicted class:
///
/// |            | predicted + | predicted - |
/// |------------|-------------|-------------|
/// | actual +   | `tp`        | `fn_`       |
/// | actual -   | `fp`        | `tn`        |
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl ConfusionMatrix {
    /// Count the outcomes when every sample with `probability >= threshold` is predicted
    /// positive.
    pub fn from_probabilities<F: Float, D: Data<Elem = F>>(
        probabilities: &ArrayBase<D, Ix1>,
        targets: &[bool],
        threshold: F,
    ) -> Result<Self> {
        if probabilities.len() != targets.len() {
            return Err(Error::MismatchedLengths(probabilities.len(), targets.len()));
        }

        let mut cm = ConfusionMatrix::default();
        for (&p, &actual) in probabilities.iter().zip(targets.iter()) {
            match (actual, p >= threshold) {
                (true, true) => cm.tp += 1,
                (false, true) => cm.fp += 1,
                (false, false) => cm.tn += 1,
                (true, false) => cm.fn_ += 1,
            }
        }

        Ok(cm)
    }

    /// Number of samples covered by the matrix
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Fraction of correct decisions
    pub fn accuracy<F: Float>(&self) -> F {
        guarded_ratio(F::cast(self.tp + self.tn), F::cast(self.total()))
    }

    /// Fraction of predicted positives which are actual positives
    pub fn precision<F: Float>(&self) -> F {
        guarded_ratio(F::cast(self.tp), F::cast(self.tp + self.fp))
    }

    /// Fraction of actual positives predicted positive, also the true positive rate
    pub fn recall<F: Float>(&self) -> F {
        guarded_ratio(F::cast(self.tp), F::cast(self.tp + self.fn_))
    }

    /// Fraction of actual negatives predicted negative
    pub fn specificity<F: Float>(&self) -> F {
        guarded_ratio(F::cast(self.tn), F::cast(self.tn + self.fp))
    }

    /// Fraction of actual negatives predicted positive
    pub fn false_positive_rate<F: Float>(&self) -> F {
        guarded_ratio(F::cast(self.fp), F::cast(self.fp + self.tn))
    }

    /// Harmonic mean of precision and recall
    pub fn f1_score<F: Float>(&self) -> F {
        let precision: F = self.precision();
        let recall: F = self.recall();

        guarded_ratio(F::cast(2.0) * precision * recall, precision + recall)
    }
}

/// A point on a ROC or precision-recall curve
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint<F> {
    pub x: F,
    pub y: F,
}

impl<F> CurvePoint<F> {
    pub fn new(x: F, y: F) -> Self {
        CurvePoint { x, y }
    }
}

/// Integration using the trapezoidal rule.
///
/// The curve is expected to be sorted by `x`. Fewer than two points enclose no area.
pub fn area_under_curve<F: Float>(curve: &[CurvePoint<F>]) -> F {
    curve
        .windows(2)
        .map(|w| (w[1].x - w[0].x) * (w[1].y + w[0].y) / F::cast(2.0))
        .sum()
}

/// Expected precision of a random classifier, i.e. the fraction of positive samples
pub fn pr_baseline<F: Float>(targets: &[bool]) -> F {
    let positives = targets.iter().filter(|t| **t).count();
    guarded_ratio(F::cast(positives), F::cast(targets.len()))
}

fn sort_by_x<F: Float>(curve: &mut Vec<CurvePoint<F>>) {
    // `sort_by` is stable, points sharing an `x` keep their sweep order
    curve.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
}

/// ROC and precision-recall curves obtained by a threshold sweep
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Curves<F> {
    roc: Vec<CurvePoint<F>>,
    pr: Vec<CurvePoint<F>>,
    thresholds: Vec<F>,
}

impl<F: Float> Curves<F> {
    /// ROC curve as `(false positive rate, true positive rate)`, sorted by `x` and enclosed by
    /// `(0, 0)` and `(1, 1)`
    pub fn roc(&self) -> &[CurvePoint<F>] {
        &self.roc
    }

    /// Precision-recall curve as `(recall, precision)`, sorted by `x`
    pub fn pr(&self) -> &[CurvePoint<F>] {
        &self.pr
    }

    /// Thresholds in sweep order, from one down to zero
    pub fn thresholds(&self) -> &[F] {
        &self.thresholds
    }

    pub fn roc_auc(&self) -> F {
        area_under_curve(&self.roc)
    }

    pub fn pr_auc(&self) -> F {
        area_under_curve(&self.pr)
    }
}

/// Metrics of a binary classifier at one threshold, together with its threshold-free curves
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsSnapshot<F> {
    pub confusion_matrix: ConfusionMatrix,
    pub accuracy: F,
    pub precision: F,
    pub recall: F,
    pub specificity: F,
    pub f1: F,
    pub roc_auc: F,
    pub pr_auc: F,
    pub pr_baseline: F,
    pub roc: Vec<CurvePoint<F>>,
    pub pr: Vec<CurvePoint<F>>,
}

/// Checked evaluation settings
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluationValidParams<F> {
    threshold: F,
    resolution: usize,
}

impl<F: Float> EvaluationValidParams<F> {
    /// Decision threshold of the scalar metrics
    pub fn threshold(&self) -> F {
        self.threshold
    }

    /// Number of thresholds in the curve sweep
    pub fn resolution(&self) -> usize {
        self.resolution
    }
}

/// Builder for [evaluation settings](EvaluationValidParams)
///
/// Defaults are a threshold of `0.5` and a sweep over `51` thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluationParams<F>(EvaluationValidParams<F>);

impl<F: Float> EvaluationParams<F> {
    pub fn new() -> Self {
        EvaluationParams(EvaluationValidParams {
            threshold: F::cast(0.5),
            resolution: 51,
        })
    }

    /// Change the decision threshold, must lie in `[0, 1]`
    pub fn threshold(mut self, threshold: F) -> Self {
        self.0.threshold = threshold;
        self
    }

    /// Change the number of thresholds in the sweep, at least two
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.0.resolution = resolution;
        self
    }
}

impl<F: Float> Default for EvaluationParams<F> {
    fn default() -> Self {
        EvaluationParams::new()
    }
}

impl<F: Float> ParamGuard for EvaluationParams<F> {
    type Checked = EvaluationValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if !(self.0.threshold >= F::zero() && self.0.threshold <= F::one()) {
            Err(Error::Parameters(format!(
                "threshold should be in [0, 1], got {}",
                self.0.threshold
            )))
        } else if self.0.resolution < 2 {
            Err(Error::Parameters(format!(
                "resolution should be at least 2, got {}",
                self.0.resolution
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Binary classification metrics
///
/// Implemented for one-dimensional arrays of probabilities of the positive class. The ground
/// truth is given as one boolean per sample, `true` marking the positive class.
pub trait BinaryClassification<F: Float> {
    /// Confusion matrix when predicting positive iff `probability >= threshold`
    fn confusion_matrix(&self, targets: &[bool], threshold: F) -> Result<ConfusionMatrix>;

    /// Sweep `resolution` evenly spaced thresholds from one down to zero
    fn sweep_curves(&self, targets: &[bool], resolution: usize) -> Result<Curves<F>>;

    /// Scalar metrics at the configured threshold plus both curves and their areas
    fn evaluate(
        &self,
        targets: &[bool],
        params: &EvaluationValidParams<F>,
    ) -> Result<MetricsSnapshot<F>>;
}

impl<F: Float, D: Data<Elem = F>> BinaryClassification<F> for ArrayBase<D, Ix1> {
    fn confusion_matrix(&self, targets: &[bool], threshold: F) -> Result<ConfusionMatrix> {
        ConfusionMatrix::from_probabilities(self, targets, threshold)
    }

    fn sweep_curves(&self, targets: &[bool], resolution: usize) -> Result<Curves<F>> {
        if self.len() != targets.len() {
            return Err(Error::MismatchedLengths(self.len(), targets.len()));
        }
        if resolution < 2 {
            return Err(Error::Parameters(format!(
                "resolution should be at least 2, got {}",
                resolution
            )));
        }

        let steps = F::cast(resolution - 1);
        let thresholds = (0..resolution)
            .rev()
            .map(|i| F::cast(i) / steps)
            .collect::<Vec<F>>();

        let mut roc = Vec::with_capacity(resolution + 2);
        let mut pr = Vec::with_capacity(resolution);
        roc.push(CurvePoint::new(F::zero(), F::zero()));

        for &threshold in &thresholds {
            let cm = ConfusionMatrix::from_probabilities(self, targets, threshold)?;
            let tpr: F = cm.recall();
            let fpr: F = cm.false_positive_rate();
            let precision: F = cm.precision();
            trace!(%threshold, %tpr, %fpr, %precision, "threshold sweep");

            roc.push(CurvePoint::new(fpr, tpr));
            pr.push(CurvePoint::new(tpr, precision));
        }
        roc.push(CurvePoint::new(F::one(), F::one()));

        sort_by_x(&mut roc);
        sort_by_x(&mut pr);

        Ok(Curves {
            roc,
            pr,
            thresholds,
        })
    }

    fn evaluate(
        &self,
        targets: &[bool],
        params: &EvaluationValidParams<F>,
    ) -> Result<MetricsSnapshot<F>> {
        let cm = self.confusion_matrix(targets, params.threshold())?;
        let curves = self.sweep_curves(targets, params.resolution())?;

        Ok(MetricsSnapshot {
            confusion_matrix: cm,
            accuracy: cm.accuracy(),
            precision: cm.precision(),
            recall: cm.recall(),
            specificity: cm.specificity(),
            f1: cm.f1_score(),
            roc_auc: curves.roc_auc(),
            pr_auc: curves.pr_auc(),
            pr_baseline: pr_baseline(targets),
            roc: curves.roc,
            pr: curves.pr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};
    use rand::{distributions::Uniform, Rng, SeedableRng};
    use rand::rngs::SmallRng;

    #[test]
    fn confusion_matrix_counts() {
        let probabilities = array![0.9, 0.6, 0.4, 0.2, 0.7];
        let targets = [true, false, true, false, true];

        let cm = probabilities.confusion_matrix(&targets, 0.5).unwrap();
        assert_eq!(
            cm,
            ConfusionMatrix {
                tp: 2,
                fp: 1,
                tn: 1,
                fn_: 1
            }
        );

        // probabilities equal to the threshold count as positive
        let cm = probabilities.confusion_matrix(&targets, 0.4).unwrap();
        assert_eq!(cm.tp, 3);
    }

    #[test]
    fn confusion_matrix_covers_every_sample() {
        let mut rng = SmallRng::seed_from_u64(42);
        let probabilities: Array1<f64> = (0..200).map(|_| rng.sample(Uniform::new(0., 1.))).collect();
        let targets = (0..200).map(|_| rng.gen_bool(0.4)).collect::<Vec<_>>();

        for i in 0..=100 {
            let threshold = i as f64 / 100.;
            let cm = probabilities.confusion_matrix(&targets, threshold).unwrap();
            assert_eq!(cm.total(), targets.len());
        }
    }

    #[test]
    fn scalar_metrics() {
        let cm = ConfusionMatrix {
            tp: 3,
            fp: 1,
            tn: 4,
            fn_: 2,
        };

        assert_abs_diff_eq!(cm.accuracy::<f64>(), 0.7);
        assert_abs_diff_eq!(cm.precision::<f64>(), 0.75);
        assert_abs_diff_eq!(cm.recall::<f64>(), 0.6);
        assert_abs_diff_eq!(cm.specificity::<f64>(), 0.8);
        assert_abs_diff_eq!(cm.f1_score::<f64>(), 2. * 0.75 * 0.6 / 1.35, epsilon = 1e-12);
    }

    #[test]
    fn zero_denominators_yield_zero() {
        let empty = ConfusionMatrix::default();
        assert_eq!(empty.accuracy::<f64>(), 0.);
        assert_eq!(empty.precision::<f64>(), 0.);
        assert_eq!(empty.recall::<f64>(), 0.);
        assert_eq!(empty.specificity::<f64>(), 0.);
        assert_eq!(empty.f1_score::<f64>(), 0.);

        let all_negative = ConfusionMatrix {
            tp: 0,
            fp: 0,
            tn: 5,
            fn_: 0,
        };
        assert_eq!(all_negative.precision::<f32>(), 0.);
        assert_eq!(all_negative.specificity::<f32>(), 1.);
    }

    #[test]
    fn area_of_reference_curves() {
        let perfect = [
            CurvePoint::new(0., 0.),
            CurvePoint::new(0., 1.),
            CurvePoint::new(1., 1.),
        ];
        assert_abs_diff_eq!(area_under_curve(&perfect), 1.0);

        let random = [CurvePoint::new(0., 0.), CurvePoint::new(1., 1.)];
        assert_abs_diff_eq!(area_under_curve(&random), 0.5);

        assert_eq!(area_under_curve(&[CurvePoint::new(0.3, 0.3)]), 0.0);
        assert_eq!(area_under_curve::<f64>(&[]), 0.0);
    }

    #[test]
    fn sweep_on_separable_scores() {
        let probabilities = array![0.9, 0.8, 0.2, 0.1];
        let targets = [true, true, false, false];

        let curves = probabilities.sweep_curves(&targets, 51).unwrap();
        assert_eq!(curves.thresholds().len(), 51);
        assert_eq!(curves.thresholds()[0], 1.0);
        assert_eq!(curves.thresholds()[50], 0.0);

        assert_eq!(curves.roc().len(), 53);
        assert_eq!(curves.roc()[0], CurvePoint::new(0., 0.));
        assert_eq!(curves.roc()[52], CurvePoint::new(1., 1.));
        assert!(curves.roc().windows(2).all(|w| w[0].x <= w[1].x));
        assert!(curves.pr().windows(2).all(|w| w[0].x <= w[1].x));

        assert_abs_diff_eq!(curves.roc_auc(), 1.0);
        // (0, 0) -> (0.5, 1) -> (1, 1)
        assert_abs_diff_eq!(curves.pr_auc(), 0.75);
    }

    #[test]
    fn sweep_on_uninformative_scores() {
        let probabilities = array![0.5, 0.5, 0.5, 0.5];
        let targets = [true, false, true, false];

        let curves = probabilities.sweep_curves(&targets, 11).unwrap();
        assert_abs_diff_eq!(curves.roc_auc(), 0.5);
    }

    #[test]
    fn evaluate_builds_snapshot() {
        let probabilities = array![0.9, 0.7, 0.4, 0.3, 0.6];
        let targets = [true, true, false, false, false];
        let params = EvaluationParams::new().check_unwrap();

        let snapshot = probabilities.evaluate(&targets, &params).unwrap();
        assert_eq!(
            snapshot.confusion_matrix,
            ConfusionMatrix {
                tp: 2,
                fp: 1,
                tn: 2,
                fn_: 0
            }
        );
        assert_abs_diff_eq!(snapshot.accuracy, 0.8);
        assert_abs_diff_eq!(snapshot.precision, 2. / 3.);
        assert_abs_diff_eq!(snapshot.recall, 1.0);
        assert_abs_diff_eq!(snapshot.specificity, 2. / 3.);
        assert_abs_diff_eq!(snapshot.f1, 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(snapshot.roc_auc, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(snapshot.pr_baseline, 0.4);
    }

    #[test]
    fn empty_inputs_are_neutral() {
        let probabilities = Array1::<f64>::zeros(0);
        let params = EvaluationParams::new().check_unwrap();

        let snapshot = probabilities.evaluate(&[], &params).unwrap();
        assert_eq!(snapshot.confusion_matrix.total(), 0);
        assert_eq!(snapshot.accuracy, 0.);
        assert_eq!(snapshot.pr_baseline, 0.);
        assert_abs_diff_eq!(snapshot.roc_auc, 0.5);
        assert_eq!(snapshot.pr_auc, 0.);
    }

    #[test]
    fn mismatched_lengths() {
        let probabilities = array![0.1, 0.2];
        assert_eq!(
            probabilities.confusion_matrix(&[true], 0.5),
            Err(Error::MismatchedLengths(2, 1))
        );
        assert!(probabilities.sweep_curves(&[true], 51).is_err());
    }

    #[test]
    fn evaluation_params_are_checked() {
        assert!(EvaluationParams::<f64>::new().threshold(1.5).check().is_err());
        assert!(EvaluationParams::<f64>::new().threshold(-0.1).check().is_err());
        assert!(EvaluationParams::<f64>::new().resolution(1).check().is_err());

        let params = EvaluationParams::<f64>::new()
            .threshold(1.0)
            .resolution(2)
            .check()
            .unwrap();
        assert_eq!(params.threshold(), 1.0);
        assert_eq!(params.resolution(), 2);
    }

    #[test]
    fn baseline_is_positive_rate() {
        assert_abs_diff_eq!(pr_baseline::<f64>(&[true, false, false, true]), 0.5);
        assert_eq!(pr_baseline::<f64>(&[]), 0.);
    }
}
