use mlplay::{Coordinates, Float};
use ndarray::{ArrayView1, Zip};

/// Squared Euclidean distance between two positions
///
/// Only coordinates matter, identifiers and labels of points are ignored.
pub fn squared_distance<F: Float>(p: &impl Coordinates<F>, q: &impl Coordinates<F>) -> F {
    let [px, py] = p.coords();
    let [qx, qy] = q.coords();
    let (dx, dy) = (px - qx, py - qy);

    dx * dx + dy * dy
}

/// Distance between rows of a coordinate matrix
pub trait Distance<F: Float> {
    /// A cheap stand-in for the distance which orders pairs the same way
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;
}

/// Euclidean distance, its reduced form is the squared distance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &a, &b| acc + (a - b) * (a - b))
    }
}
