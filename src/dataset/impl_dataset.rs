use std::collections::HashSet;

use ndarray::Array2;

use super::{ClassCounts, ClassLabel, Dataset, Float, Point, PointId};
use crate::error::{Error, Result};

impl<F: Float> Dataset<F> {
    /// Create an empty dataset
    pub fn new() -> Self {
        Dataset {
            points: Vec::new(),
            next_id: 0,
        }
    }

    /// Build a dataset from existing points
    ///
    /// Fails with `Error::DuplicateId` if two points share an identifier.
    pub fn from_points(points: Vec<Point<F>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if !seen.insert(point.id) {
                return Err(Error::DuplicateId(point.id));
            }
        }

        let next_id = match points.iter().map(|p| p.id.0).max() {
            Some(max) => max
                .checked_add(1)
                .unwrap_or_else(|| smallest_unused_id(&points)),
            None => 0,
        };

        Ok(Dataset { points, next_id })
    }

    /// Append a point with a fresh identifier and return that identifier
    pub fn push(&mut self, x: F, y: F, label: Option<ClassLabel>) -> PointId {
        let id = PointId(self.next_id);
        self.points.push(Point::new(id, x, y, label));
        self.next_id = match self.next_id.checked_add(1) {
            Some(next) if self.get(PointId(next)).is_none() => next,
            _ => smallest_unused_id(&self.points),
        };

        id
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point<F>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<F>> {
        self.points.iter()
    }

    /// Look up a point by identifier
    pub fn get(&self, id: PointId) -> Option<&Point<F>> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Return the coordinates as a matrix with shape `(n_points, 2)`
    pub fn records(&self) -> Array2<F> {
        let mut records = Array2::zeros((self.points.len(), 2));
        for (mut row, point) in records.rows_mut().into_iter().zip(self.points.iter()) {
            row[0] = point.x;
            row[1] = point.y;
        }

        records
    }

    /// Labels in dataset order
    pub fn labels(&self) -> Vec<Option<ClassLabel>> {
        self.points.iter().map(|p| p.label).collect()
    }

    /// Binary ground truth for `positive`
    ///
    /// Unlabelled points count as negatives.
    pub fn binary_targets(&self, positive: ClassLabel) -> Vec<bool> {
        self.points.iter().map(|p| p.has_label(positive)).collect()
    }

    /// Count the labelled points per class
    pub fn label_frequencies(&self) -> ClassCounts<ClassLabel> {
        self.points.iter().filter_map(|p| p.label).collect()
    }

    /// Same points with every label cleared
    pub fn without_labels(mut self) -> Self {
        for point in self.points.iter_mut() {
            point.label = None;
        }

        self
    }

    /// New dataset holding the points matching `predicate`
    ///
    /// Identifiers are kept, so points can still be matched against the source dataset.
    pub fn filter_points<P: FnMut(&Point<F>) -> bool>(&self, mut predicate: P) -> Self {
        Dataset {
            points: self.points.iter().filter(|p| predicate(*p)).cloned().collect(),
            next_id: self.next_id,
        }
    }
}

/// Lowest identifier not taken by any of `points`
///
/// Numbering falls back to this once identifiers reach `u64::MAX`.
fn smallest_unused_id<F>(points: &[Point<F>]) -> u64 {
    let mut ids = points.iter().map(|p| p.id.0).collect::<Vec<_>>();
    ids.sort_unstable();

    let mut candidate = 0;
    for id in ids {
        if id > candidate {
            break;
        }
        if id == candidate {
            candidate += 1;
        }
    }

    candidate
}

impl<F: Float> Default for Dataset<F> {
    fn default() -> Self {
        Dataset::new()
    }
}

impl<'a, F: Float> IntoIterator for &'a Dataset<F> {
    type Item = &'a Point<F>;
    type IntoIter = std::slice::Iter<'a, Point<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
