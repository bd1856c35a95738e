//! Datasets
//!
//! This module implements the labelled point set shared by every playground algorithm, together
//! with the floating point and label abstractions the algorithm crates are generic over.
use ndarray::ScalarOperand;

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::fmt;
use std::hash::Hash;
use std::iter::Sum;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_counts;
mod impl_dataset;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Coordinates, probabilities and every
/// derived metric are expressed in this type.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. They key the class tallies used for voting and
/// impurity computations.
pub trait Label: PartialEq + Eq + Hash + Clone {}

impl Label for bool {}
impl Label for usize {}
impl Label for String {}
impl Label for &str {}
impl Label for ClassLabel {}
impl Label for Option<ClassLabel> {}

/// The two classes a playground point can belong to
///
/// `A` is the positive class of every binary evaluation unless stated otherwise.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassLabel {
    A,
    B,
}

impl ClassLabel {
    /// The label on the other side of a binary decision
    pub fn other(self) -> ClassLabel {
        match self {
            ClassLabel::A => ClassLabel::B,
            ClassLabel::B => ClassLabel::A,
        }
    }
}

impl Default for ClassLabel {
    fn default() -> Self {
        ClassLabel::A
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassLabel::A => write!(f, "A"),
            ClassLabel::B => write!(f, "B"),
        }
    }
}

/// Opaque point identifier, unique within a dataset
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coordinate axis of the unit square
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitAxis {
    X,
    Y,
}

/// Anything with a position in the unit square
///
/// Queries of the neighbour search and of the models do not need to be dataset members, a bare
/// `[x, y]` pair works as well.
pub trait Coordinates<F> {
    fn coords(&self) -> [F; 2];
}

impl<F: Float> Coordinates<F> for [F; 2] {
    fn coords(&self) -> [F; 2] {
        *self
    }
}

impl<F: Float> Coordinates<F> for (F, F) {
    fn coords(&self) -> [F; 2] {
        [self.0, self.1]
    }
}

impl<F: Float> Coordinates<F> for Point<F> {
    fn coords(&self) -> [F; 2] {
        [self.x, self.y]
    }
}

/// A single sample in the unit square
///
/// Coordinates are expected in `[0, 1]`, points created by the samplers are clamped into it. The
/// label is optional, clustering works on unlabelled points.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Point<F> {
    pub id: PointId,
    pub x: F,
    pub y: F,
    pub label: Option<ClassLabel>,
}

impl<F: Float> Point<F> {
    pub fn new(id: PointId, x: F, y: F, label: Option<ClassLabel>) -> Self {
        Point { id, x, y, label }
    }

    /// Read the coordinate along `axis`
    pub fn value(&self, axis: SplitAxis) -> F {
        match axis {
            SplitAxis::X => self.x,
            SplitAxis::Y => self.y,
        }
    }

    /// Returns true if the point carries `label`
    pub fn has_label(&self, label: ClassLabel) -> bool {
        self.label == Some(label)
    }
}

/// Dataset
///
/// An ordered sequence of points without duplicate identifiers. Iteration order is insertion
/// order, which is also the order used to break ties in neighbour search. A dataset may be
/// empty, every algorithm degrades to neutral results in that case.
///
/// # Example
///
/// ```rust
/// use mlplay::{ClassLabel, Dataset};
///
/// let mut dataset = Dataset::<f64>::new();
/// let id = dataset.push(0.2, 0.4, Some(ClassLabel::A));
/// dataset.push(0.8, 0.9, Some(ClassLabel::B));
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.get(id).map(|p| p.x), Some(0.2));
/// assert_eq!(dataset.binary_targets(ClassLabel::A), vec![true, false]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<F> {
    points: Vec<Point<F>>,
    next_id: u64,
}

/// Class counts
///
/// Maps every label present to the number of times it occurred. Iteration follows first
/// insertion order, so consumers which break ties by "first seen" stay deterministic.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassCounts<L> {
    counts: Vec<(L, usize)>,
}
