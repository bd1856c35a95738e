use mlplay::metrics::EvaluationParams;
use mlplay::{ClassLabel, ParamGuard};
use mlplay_datasets::presets;
use mlplay_logistic::LogisticModel;
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;

use std::error::Error;

// Start from the playground weights, which point the wrong way, then flip them and compare the
// metrics of both models on the same data.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut rng = Isaac64Rng::seed_from_u64(42);
    let dataset = presets::logistic_playground(&mut rng);
    let params = EvaluationParams::new().threshold(0.5).check()?;

    for model in &[
        LogisticModel::default(),
        LogisticModel::new(0.0, -8.0, 8.0).with_threshold(0.5)?,
    ] {
        let snapshot = model.evaluate(&dataset, ClassLabel::A, &params)?;
        println!(
            "w = ({}, {}): accuracy {:.3}, precision {:.3}, recall {:.3}, ROC AUC {:.3}",
            model.intercept(),
            model.params(),
            snapshot.accuracy,
            snapshot.precision,
            snapshot.recall,
            snapshot.roc_auc
        );
        if let Some((slope, intercept)) = model.decision_boundary() {
            println!("  boundary y = {:.2} x + {:.2}", slope, intercept);
        }
    }

    Ok(())
}
