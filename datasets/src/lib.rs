//! `mlplay-datasets` provides synthetic point sets ready to be used in the playground, in tests
//! and in examples.
//!
//! ## The Big Picture
//!
//! `mlplay-datasets` is a crate in the `mlplay` workspace, the numeric engine of an interactive
//! classroom machine learning playground.
//!
//! ## Current State
//!
//! * [`generate::generate_clusters`]: labelled clusters with uniform noise around given centers
//! * [`presets`]: the starting dataset of every playground mode
//!
//! All generators take the random number generator as an argument. Pass a seeded generator for
//! reproducible datasets, or `thread_rng()` when every reset should look different.

pub mod generate;
pub mod presets;

pub use generate::{generate_clusters, CenterSpec};
pub use presets::{kmeans_playground, knn_playground, logistic_playground, split_playground};
