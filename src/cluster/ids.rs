use std::collections::HashSet;

/// Canonical cluster ids for one pass, aligned with entity order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterIds {
    ids: Vec<usize>,
    n_clusters: usize,
}

impl ClusterIds {
    /// Cluster id (starting at 1) of every entity.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Highest assigned id, i.e. the detected cluster count.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn into_ids(self) -> Vec<usize> {
        self.ids
    }
}

/// Collapses working clusters into canonical ids.
///
/// Entity 0 always gets id 1. An entity with an empty cluster gets a fresh
/// id. Otherwise it reuses the id of the first earlier entity whose cluster
/// holds the same set of indices, or gets a fresh id if none does.
pub fn assign_cluster_ids(clusters: &[Vec<usize>]) -> ClusterIds {
    if clusters.is_empty() {
        return ClusterIds {
            ids: Vec::new(),
            n_clusters: 0,
        };
    }

    let sets: Vec<HashSet<usize>> = clusters
        .iter()
        .map(|cluster| cluster.iter().copied().collect())
        .collect();

    let mut ids = Vec::with_capacity(clusters.len());
    ids.push(1);
    let mut next_id = 2;

    for i in 1..clusters.len() {
        let existing = if sets[i].is_empty() {
            None
        } else {
            (0..i).find(|&j| sets[j] == sets[i]).map(|j| ids[j])
        };

        match existing {
            Some(id) => ids.push(id),
            None => {
                ids.push(next_id);
                next_id += 1;
            }
        }
    }

    ClusterIds {
        ids,
        n_clusters: next_id - 1,
    }
}
