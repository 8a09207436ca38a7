//! Threshold-count clustering.
//!
//! A single pass runs three stages:
//! - `find_partners`: per-entity partner sets from per-feature range matches
//! - `expand_clusters`: one-hop union of partners and partners-of-partners
//! - `assign_cluster_ids`: canonical ids by set equality, entity 0 seeds id 1
//!
//! `ThresholdClustering` repeats the pass, adjusting the match range and the
//! required match count until the detected cluster count equals the target.
//!
//! # Examples
//!
//! ## Single pass with fixed thresholds
//! ```rust
//! use tunecluster::cluster::{detect_clusters, MatchParams};
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 2.0, 3.0],
//!     [1.0, 2.0, 4.0],
//!     [9.0, 9.0, 9.0]
//! ];
//!
//! let ids = detect_clusters(&x, MatchParams::new(0.5, 2));
//! assert_eq!(ids.ids(), &[1, 1, 2]);
//! assert_eq!(ids.n_clusters(), 2);
//! ```
//!
//! ## Tuning towards a target count
//! ```rust
//! use tunecluster::{Dataset, ThresholdClustering};
//!
//! let dataset = Dataset::reference();
//! let mut model = ThresholdClustering::new(7).max_iter(100);
//! let labels = model.fit_predict(&dataset).unwrap();
//!
//! assert_eq!(labels.len(), dataset.n_entities());
//! println!("Converged after {} iterations", model.history.len());
//! ```

mod expand;
mod ids;
mod partners;
mod tuner;

pub use expand::expand_clusters;
pub use ids::{assign_cluster_ids, ClusterIds};
pub use partners::{find_partners, MatchParams};
pub use tuner::{
    detect_clusters, Direction, ThresholdClustering, TunerConfig, TunerState, TuningStep,
};
