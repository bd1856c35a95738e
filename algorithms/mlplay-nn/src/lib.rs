//! `mlplay-nn` provides neighbour search over playground datasets and the k-nearest-neighbours
//! classifier built on top of it.
//!
//! Distances are Euclidean. Since only the ordering of distances matters for the search, points
//! are compared by their squared distance.
//!
//! ## Leave-one-out evaluation
//!
//! The k-NN playground has no held-out data, the classifier is evaluated on the dataset it votes
//! with. Every point is scored by its neighbours among the *other* points and the scores are
//! handed to the metrics of the core crate:
//!
//! ```rust
//! use mlplay::metrics::EvaluationParams;
//! use mlplay::{ClassLabel, ParamGuard};
//! use mlplay_nn::KNearestNeighbors;
//! use mlplay_datasets::presets;
//! use rand_isaac::Isaac64Rng;
//! use ndarray_rand::rand::SeedableRng;
//!
//! let mut rng = Isaac64Rng::seed_from_u64(42);
//! let dataset = presets::knn_playground(&mut rng);
//!
//! let model = KNearestNeighbors::params(5).fit(&dataset).unwrap();
//! let params = EvaluationParams::new().check_unwrap();
//! let snapshot = model.leave_one_out_metrics(ClassLabel::A, &params).unwrap();
//!
//! assert_eq!(snapshot.confusion_matrix.total(), dataset.len());
//! ```

pub mod distance;
mod error;
mod hyperparams;
mod knn;
mod linear;

pub use distance::{squared_distance, Distance, L2Dist};
pub use error::{KnnError, KnnParamsError, Result};
pub use hyperparams::{KNearestNeighborsParams, KNearestNeighborsValidParams};
pub use knn::KNearestNeighbors;
pub use linear::{k_nearest, k_nearest_excluding};
