//! Threshold-count clustering with self-tuning parameters.
//!
//! Entities are grouped by how many of their features fall within a match
//! range of each other. The match range and the required match count are
//! adjusted until the number of detected clusters equals a target.
//!
//! ```rust
//! use tunecluster::{Dataset, ThresholdClustering};
//! use ndarray::array;
//!
//! let dataset = Dataset::new(
//!     vec!["A".into(), "B".into(), "C".into()],
//!     array![[0.0, 0.0], [0.0, 0.0], [100.0, 100.0]],
//! ).unwrap();
//!
//! let mut model = ThresholdClustering::new(2);
//! model.fit(&dataset).unwrap();
//!
//! let clusters = model.clusters.as_ref().unwrap();
//! assert_eq!(clusters[0].members, vec!["A", "B"]);
//! assert_eq!(clusters[1].members, vec!["C"]);
//! ```

pub use ndarray::{Array2, ArrayView1};

pub mod cluster;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod report;

pub type Matrix = Array2<f64>;

pub use cluster::{
    assign_cluster_ids, detect_clusters, expand_clusters, find_partners, ClusterIds, Direction,
    MatchParams, ThresholdClustering, TunerConfig, TunerState, TuningStep,
};
pub use dataset::{DataSource, Dataset, JsonFile, ReferenceData};
pub use error::{ClusterError, Result};
pub use report::{Cluster, JsonReporter, Reporter, TextReporter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_work() {
        let mat = Matrix::zeros((3, 4));
        assert_eq!(mat.shape(), &[3, 4]);
        assert_eq!(TunerConfig::default().max_required_matches, 6);
    }
}
