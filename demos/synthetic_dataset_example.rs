use ndarray::{concatenate, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tunecluster::metrics::{is_partition, same_partition};
use tunecluster::{Dataset, JsonReporter, Matrix, ThresholdClustering};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Synthetic Groups ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let offsets = [0.0, 20.0, 40.0, 60.0];
    let per_group = 6;

    // Each group sits at its own offset with a little noise on every feature.
    let groups: Vec<Matrix> = offsets
        .iter()
        .map(|&offset| Matrix::random_using((per_group, 6), Uniform::new(0.0, 4.0), &mut rng) + offset)
        .collect();
    let views: Vec<_> = groups.iter().map(|g| g.view()).collect();
    let features = concatenate(Axis(0), &views)?;

    let labels: Vec<String> = (0..features.nrows())
        .map(|i| format!("user{:02}", i))
        .collect();
    let dataset = Dataset::new(labels, features)?;
    let truth: Vec<usize> = (0..dataset.n_entities()).map(|i| i / per_group + 1).collect();

    println!(
        "Dataset: {} users in {} groups, {} features\n",
        dataset.n_entities(),
        offsets.len(),
        dataset.n_features()
    );

    for target in 2..=6 {
        let mut model = ThresholdClustering::new(target);
        match model.fit_predict(&dataset) {
            Ok(predicted) => {
                let clusters = model.clusters.as_ref().unwrap();
                println!(
                    "target={}: {} iterations, partition={}, matches groups={}",
                    target,
                    model.history.len(),
                    is_partition(clusters, dataset.labels()),
                    same_partition(&predicted, &truth)
                );
            }
            Err(e) => println!("target={}: {}", target, e),
        }
    }

    println!("\n=== JSON Report (target={}) ===", offsets.len());
    let mut model = ThresholdClustering::new(offsets.len());
    let mut reporter = JsonReporter::new(std::io::stdout()).pretty(true);
    model.fit_report(&dataset, &mut reporter)?;

    Ok(())
}
