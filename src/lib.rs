//! `mlplay` is the numeric engine of an interactive machine learning playground for the
//! classroom.
//!
//! Students place points in the unit square, move sliders and watch four classical algorithms
//! react. Everything they see is computed here, everything they click on lives elsewhere: the
//! rendering layer hands over labelled `(x, y)` samples and draws whatever numbers come back.
//!
//! ## The big picture
//!
//! The workspace is split like other crates of its kind, one crate per algorithm family on top of
//! this core crate:
//!
//! * `mlplay` (this crate): the [`Dataset`] of labelled points, the shared error type, the
//!   [`ParamGuard`] hyperparameter check, and the binary classification [`metrics`]
//! * `mlplay-datasets`: synthetic clusters and the starting datasets of each playground mode
//! * `mlplay-nn`: neighbour search and the k-nearest-neighbours classifier
//! * `mlplay-clustering`: a step-by-step k-means session
//! * `mlplay-trees`: Gini impurity and information gain of a single split
//! * `mlplay-logistic`: a logistic model with hand-set weights
//!
//! Every operation is a pure function of its inputs, except for the k-means session, which owns
//! its centroids and assignment between steps. Randomness is always drawn from a caller-provided
//! random number generator, seed it for reproducible runs.
//!
//! ## Evaluation
//!
//! Classifiers are compared on probabilities of the positive class:
//!
//! ```rust
//! use mlplay::metrics::{BinaryClassification, EvaluationParams};
//! use mlplay::ParamGuard;
//! use ndarray::array;
//!
//! let probabilities = array![0.9, 0.7, 0.4, 0.2];
//! let targets = [true, false, true, false];
//! let params = EvaluationParams::new().threshold(0.5).check().unwrap();
//!
//! let snapshot = probabilities.evaluate(&targets, &params).unwrap();
//! assert_eq!(snapshot.confusion_matrix.total(), 4);
//! assert!(snapshot.roc_auc > 0.5);
//! ```

pub mod dataset;
pub mod error;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{ClassCounts, ClassLabel, Coordinates, Dataset, Float, Label, Point, PointId, SplitAxis};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Binary classification metrics and curves
pub mod metrics {
    pub use crate::metrics_classification::{
        area_under_curve, pr_baseline, BinaryClassification, ConfusionMatrix, CurvePoint, Curves,
        EvaluationParams, EvaluationValidParams, MetricsSnapshot,
    };
}
