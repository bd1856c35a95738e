use std::iter::FromIterator;

use super::{ClassCounts, Label};

impl<L: Label> ClassCounts<L> {
    pub fn new() -> Self {
        ClassCounts { counts: Vec::new() }
    }

    /// Increment the count of `label` by one
    pub fn add(&mut self, label: L) {
        match self.counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((label, 1)),
        }
    }

    /// Number of occurrences of `label`, zero if it was never seen
    pub fn get(&self, label: &L) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Sum over all labels
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(label, count)` pairs in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&L, usize)> {
        self.counts.iter().map(|(l, c)| (l, *c))
    }

    /// Finds the most frequent label. If two labels have the same count then the one inserted
    /// first is returned.
    pub fn most_frequent(&self) -> Option<&L> {
        self.counts
            .iter()
            .fold(None, |acc: Option<&(L, usize)>, entry| match acc {
                Some(best) if best.1 >= entry.1 => Some(best),
                _ => Some(entry),
            })
            .map(|(l, _)| l)
    }
}

impl<L: Label> Default for ClassCounts<L> {
    fn default() -> Self {
        ClassCounts::new()
    }
}

impl<L: Label> FromIterator<L> for ClassCounts<L> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        let mut counts = ClassCounts::new();
        for label in iter {
            counts.add(label);
        }
        counts
    }
}

impl<L: Label> Extend<L> for ClassCounts<L> {
    fn extend<I: IntoIterator<Item = L>>(&mut self, iter: I) {
        for label in iter {
            self.add(label);
        }
    }
}
