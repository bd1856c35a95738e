//!
//! # Split evaluation
//! `mlplay-trees` measures how well a single axis-aligned cut separates the classes of a
//! playground dataset.
//!
//! # The big picture
//!
//! A decision tree grows by picking, at every node, the cut with the largest impurity decrease.
//! This crate exposes exactly one such node: the Gini impurity of class tallies, the
//! [information gain](SplitEvaluation) of a cut the student drags across the square, the
//! [best cut](best_split) a tree would pick greedily and the [decision stump](DecisionStump)
//! that predicts with it.
//!

mod decision_stump;

pub use decision_stump::*;
