//! Starting datasets of the playground modes
//!
//! Each mode of the playground opens with a small synthetic dataset tailored to the algorithm on
//! display. Resetting a mode draws a fresh sample from the same recipe.

use mlplay::{ClassLabel, Dataset};
use ndarray_rand::rand::Rng;

use crate::generate::{generate_clusters, CenterSpec};

/// Two labelled clusters on the anti-diagonal for the nearest neighbour mode
pub fn knn_playground(rng: &mut impl Rng) -> Dataset<f64> {
    generate_clusters(
        60,
        &[
            CenterSpec::labelled(0.3, 0.7, ClassLabel::A),
            CenterSpec::labelled(0.7, 0.3, ClassLabel::B),
        ],
        0.12,
        rng,
    )
}

/// Three unlabelled clusters for the k-means mode
pub fn kmeans_playground(rng: &mut impl Rng) -> Dataset<f64> {
    generate_clusters(
        80,
        &[
            CenterSpec::unlabelled(0.25, 0.75),
            CenterSpec::unlabelled(0.5, 0.3),
            CenterSpec::unlabelled(0.78, 0.7),
        ],
        0.1,
        rng,
    )
}

/// Two labelled clusters, slightly overlapping, for the split mode
pub fn split_playground(rng: &mut impl Rng) -> Dataset<f64> {
    generate_clusters(
        60,
        &[
            CenterSpec::labelled(0.3, 0.75, ClassLabel::A),
            CenterSpec::labelled(0.7, 0.25, ClassLabel::B),
        ],
        0.14,
        rng,
    )
}

/// Two labelled clusters for the logistic mode
pub fn logistic_playground(rng: &mut impl Rng) -> Dataset<f64> {
    generate_clusters(
        70,
        &[
            CenterSpec::labelled(0.3, 0.7, ClassLabel::A),
            CenterSpec::labelled(0.7, 0.3, ClassLabel::B),
        ],
        0.12,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_rand::rand::SeedableRng;
    use rand_isaac::Isaac64Rng;

    #[test]
    fn preset_sizes() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        assert_eq!(knn_playground(&mut rng).len(), 60);
        assert_eq!(kmeans_playground(&mut rng).len(), 80);
        assert_eq!(split_playground(&mut rng).len(), 60);
        assert_eq!(logistic_playground(&mut rng).len(), 70);
    }

    #[test]
    fn kmeans_points_are_unlabelled() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let dataset = kmeans_playground(&mut rng);
        assert!(dataset.label_frequencies().is_empty());
    }

    #[test]
    fn labelled_presets_are_balanced() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let counts = logistic_playground(&mut rng).label_frequencies();
        assert_eq!(counts.get(&ClassLabel::A), 35);
        assert_eq!(counts.get(&ClassLabel::B), 35);
    }
}
