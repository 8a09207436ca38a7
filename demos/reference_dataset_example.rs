use tunecluster::metrics::{cluster_sizes, n_singletons};
use tunecluster::{ClusterError, Dataset, Reporter, TextReporter, ThresholdClustering};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Reference Dataset ===\n");

    let dataset = Dataset::reference();
    println!(
        "Dataset: {} users, {} features",
        dataset.n_entities(),
        dataset.n_features()
    );
    println!("Default thresholds: match_range=10, required_matches=3\n");

    for target in 1..=dataset.n_entities() {
        let mut model = ThresholdClustering::new(target).max_iter(100);

        match model.fit(&dataset) {
            Ok(()) => {
                let clusters = model.clusters.as_ref().unwrap();
                let params = model.final_params.unwrap();
                println!(
                    "target={:2}: converged in {:3} iterations (match_range={:.4}, required_matches={})",
                    target,
                    model.history.len(),
                    params.match_range,
                    params.required_matches
                );
                println!(
                    "           sizes={:?}, singletons={}",
                    cluster_sizes(clusters),
                    n_singletons(clusters)
                );
            }
            Err(ClusterError::ConvergenceFailure {
                iterations,
                closest,
                ..
            }) => {
                println!(
                    "target={:2}: no convergence after {} iterations, closest count {}",
                    target, iterations, closest
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\n=== Detailed Result (target=7) ===");
    let mut model = ThresholdClustering::new(7);
    model.fit(&dataset)?;

    for step in &model.history {
        println!(
            "  iteration {}: match_range={:.2}, required_matches={}, detected={}, {:?}",
            step.iteration,
            step.params.match_range,
            step.params.required_matches,
            step.detected,
            step.direction
        );
    }

    let mut reporter = TextReporter::new(std::io::stdout());
    reporter.report(model.clusters.as_deref().unwrap_or_default())?;

    Ok(())
}
