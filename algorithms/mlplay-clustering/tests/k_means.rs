use approx::assert_abs_diff_eq;
use mlplay_clustering::{assign_step, KMeans, KMeansState};
use mlplay_datasets::presets;
use ndarray::{array, Array2};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;

// `kmeans_playground` picks its three centers in turn, so the first three points come one from
// each blob
fn one_point_per_blob(dataset: &mlplay::Dataset<f64>) -> Array2<f64> {
    let mut centroids = Array2::zeros((3, 2));
    for (mut row, point) in centroids.rows_mut().into_iter().zip(dataset.iter()) {
        row[0] = point.x;
        row[1] = point.y;
    }
    centroids
}

#[test]
fn sse_never_grows_without_empty_clusters() {
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let dataset = presets::kmeans_playground(&mut rng);

    let mut session = KMeans::params_with_rng(3, rng).start().unwrap();
    session.set_centroids(one_point_per_blob(&dataset)).unwrap();

    let run = session.run(&dataset);
    assert!(run.converged);
    assert!(run.n_iterations < 100);
    for pair in run.sse_history.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12);
    }

    // every blob ends up with its own centroid
    let expected = array![[0.25, 0.75], [0.5, 0.3], [0.78, 0.7]];
    assert_abs_diff_eq!(session.centroids(), &expected, epsilon = 0.05);
    assert_eq!(session.cluster_sizes().sum(), dataset.len());
}

#[test]
fn manual_cycles_match_run() {
    let mut rng = Isaac64Rng::seed_from_u64(7);
    let dataset = presets::kmeans_playground(&mut rng);
    let centroids = one_point_per_blob(&dataset);

    let mut by_hand = KMeans::params_with_rng(3, Isaac64Rng::seed_from_u64(1))
        .start()
        .unwrap();
    by_hand.set_centroids(centroids.clone()).unwrap();
    let mut stepped = by_hand.clone();

    for _ in 0..5 {
        let sse = by_hand.assign(&dataset);
        by_hand.update(&dataset).unwrap();
        assert_abs_diff_eq!(stepped.step(&dataset), sse, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(by_hand.centroids(), stepped.centroids(), epsilon = 1e-12);
    assert_eq!(by_hand.state(), KMeansState::Updated);
}

#[test]
fn session_assignment_matches_free_function() {
    let mut rng = Isaac64Rng::seed_from_u64(3);
    let dataset = presets::kmeans_playground(&mut rng);

    let mut session = KMeans::params_with_rng(4, rng).start().unwrap();
    let (assignment, sse) = assign_step(&dataset, session.centroids()).unwrap();
    assert_abs_diff_eq!(session.assign(&dataset), sse, epsilon = 1e-12);
    assert_eq!(session.assignment(), Some(&assignment));

    for point in dataset.iter() {
        assert_eq!(
            assignment.cluster_of(point.id),
            Some(session.closest_cluster(point))
        );
    }
}

#[test]
fn run_stops_at_max_iterations() {
    let mut rng = Isaac64Rng::seed_from_u64(5);
    let dataset = presets::kmeans_playground(&mut rng);

    let mut session = KMeans::params_with_rng(3, rng)
        .max_n_iterations(1)
        .start()
        .unwrap();
    let run = session.run(&dataset);

    assert_eq!(run.n_iterations, 1);
    assert_eq!(run.sse_history.len(), 1);
    assert!(!run.converged);
}
