use mlplay::{ClassLabel, SplitAxis};
use mlplay_datasets::presets;
use mlplay_trees::{best_split, evaluate_split, gini_impurity, DecisionStump};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;

#[test]
fn sweeping_the_threshold_moves_points_left() {
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let dataset = presets::split_playground(&mut rng);

    for &axis in &[SplitAxis::X, SplitAxis::Y] {
        let mut previous = evaluate_split(&dataset, axis, 0.0);
        for step in 1..=100 {
            let split = evaluate_split(&dataset, axis, step as f64 / 100.0);
            assert!(split.n_left >= previous.n_left);
            assert!(split.n_right <= previous.n_right);
            assert_eq!(split.n_left + split.n_right, dataset.len());
            previous = split;
        }
        assert_eq!(previous.n_left, dataset.len());
    }
}

#[test]
fn gain_is_bounded_by_parent_impurity() {
    let mut rng = Isaac64Rng::seed_from_u64(1);
    let dataset = presets::split_playground(&mut rng);
    let parent = gini_impurity::<f64, _>(&dataset.label_frequencies());

    for step in 0..=50 {
        let split = evaluate_split(&dataset, SplitAxis::Y, step as f64 / 50.0);
        assert!(split.information_gain >= -1e-12);
        assert!(split.information_gain <= parent + 1e-12);
    }
}

#[test]
fn best_split_of_the_playground_separates_the_blobs() {
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let dataset = presets::split_playground(&mut rng);

    // blob centers are 0.4 apart on both axes with a spread of 0.14, either axis works
    let split = best_split(&dataset).unwrap();
    assert!(split.information_gain > 0.49);
    assert_eq!(split.gini_left, 0.0);
    assert_eq!(split.gini_right, 0.0);

    let stump = DecisionStump::from_split(&split);
    let (left, right) = stump.predictions();
    match split.axis {
        SplitAxis::X => assert_eq!((left, right), (Some(ClassLabel::A), Some(ClassLabel::B))),
        SplitAxis::Y => assert_eq!((left, right), (Some(ClassLabel::B), Some(ClassLabel::A))),
    }
}
