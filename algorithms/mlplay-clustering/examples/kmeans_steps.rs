use mlplay_clustering::KMeans;
use mlplay_datasets::presets;
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;

// Walk through a k-means session the way the playground does: a few manual steps, a change of
// the number of clusters, then an automatic run.
fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Our random number generator, seeded for reproducibility
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let dataset = presets::kmeans_playground(&mut rng);

    let mut session = KMeans::params_with_rng(2, rng)
        .tolerance(1e-10)
        .start()
        .expect("valid hyperparameters");

    for _ in 0..3 {
        let sse = session.assign(&dataset);
        session.update(&dataset).expect("update follows assign");
        println!("k = {}, sse = {:.5}", session.n_clusters(), sse);
    }

    session.set_n_clusters(3).expect("k is positive");
    let run = session.run(&dataset);
    println!(
        "k = {}: {} iterations, converged: {}, final sse = {:.5}",
        session.n_clusters(),
        run.n_iterations,
        run.converged,
        run.sse_history.last().copied().unwrap_or_default()
    );
    println!("centroids:\n{:.3}", session.centroids());
    println!("cluster sizes: {}", session.cluster_sizes());
}
