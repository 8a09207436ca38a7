use crate::report::Cluster;
use std::collections::HashMap;

pub fn cluster_sizes(clusters: &[Cluster]) -> Vec<usize> {
    clusters.iter().map(|c| c.members.len()).collect()
}

/// Number of clusters holding exactly one entity.
pub fn n_singletons(clusters: &[Cluster]) -> usize {
    clusters.iter().filter(|c| c.members.len() == 1).count()
}

/// True when every label appears in exactly one cluster and nothing else does.
pub fn is_partition(clusters: &[Cluster], labels: &[String]) -> bool {
    let mut counts: HashMap<&str, usize> = labels.iter().map(|l| (l.as_str(), 0)).collect();

    for member in clusters.iter().flat_map(|c| c.members.iter()) {
        match counts.get_mut(member.as_str()) {
            Some(count) => *count += 1,
            None => return false,
        }
    }

    counts.len() == labels.len() && counts.values().all(|&count| count == 1)
}

/// True when two id assignments group entities identically, up to renaming ids.
pub fn same_partition(a: &[usize], b: &[usize]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut forward: HashMap<usize, usize> = HashMap::new();
    let mut backward: HashMap<usize, usize> = HashMap::new();

    a.iter().zip(b).all(|(&x, &y)| {
        *forward.entry(x).or_insert(y) == y && *backward.entry(y).or_insert(x) == x
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: usize, members: &[&str]) -> Cluster {
        Cluster {
            id,
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_sizes_and_singletons() {
        let clusters = vec![cluster(1, &["a", "b"]), cluster(2, &["c"]), cluster(3, &["d"])];
        assert_eq!(cluster_sizes(&clusters), vec![2, 1, 1]);
        assert_eq!(n_singletons(&clusters), 2);
    }

    #[test]
    fn test_is_partition() {
        let all = labels(&["a", "b", "c"]);
        assert!(is_partition(&[cluster(1, &["a", "c"]), cluster(2, &["b"])], &all));
        // Missing entity
        assert!(!is_partition(&[cluster(1, &["a", "c"])], &all));
        // Duplicate entity
        assert!(!is_partition(
            &[cluster(1, &["a", "b"]), cluster(2, &["b", "c"])],
            &all
        ));
        // Unknown entity
        assert!(!is_partition(
            &[cluster(1, &["a", "b", "c"]), cluster(2, &["z"])],
            &all
        ));
    }

    #[test]
    fn test_same_partition() {
        assert!(same_partition(&[1, 1, 2, 3], &[2, 2, 3, 1]));
        assert!(!same_partition(&[1, 1, 2], &[1, 2, 2]));
        assert!(!same_partition(&[1, 2], &[1, 1]));
        assert!(!same_partition(&[1, 2], &[1, 2, 3]));
    }
}
