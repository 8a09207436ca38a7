use crate::Matrix;
use serde::{Deserialize, Serialize};

/// Thresholds for one partner-finding pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchParams {
    /// Two feature values match when `|a - b| <= match_range`.
    pub match_range: f64,
    /// Minimum number of matching features for two entities to be partners.
    pub required_matches: usize,
}

impl MatchParams {
    pub fn new(match_range: f64, required_matches: usize) -> Self {
        Self {
            match_range,
            required_matches,
        }
    }

    fn is_match(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.match_range
    }
}

/// Computes the partner set of every entity (row) in `features`.
///
/// For entity `i`, every other entity `k` accumulates one match per feature
/// column whose values lie within `match_range`. Once the total reaches
/// `required_matches`, `k` is a partner of `i`. Partners are listed in the
/// order they were first matched (feature-major scan) and never include `i`.
pub fn find_partners(features: &Matrix, params: MatchParams) -> Vec<Vec<usize>> {
    let n_entities = features.nrows();
    let mut all_partners = Vec::with_capacity(n_entities);

    for i in 0..n_entities {
        let row = features.row(i);
        let mut match_counts = vec![0usize; n_entities];
        let mut first_seen = Vec::new();

        for (j, &value) in row.iter().enumerate() {
            for k in 0..n_entities {
                if k == i {
                    continue;
                }
                if params.is_match(value, features[[k, j]]) {
                    if match_counts[k] == 0 {
                        first_seen.push(k);
                    }
                    match_counts[k] += 1;
                }
            }
        }

        let partners = first_seen
            .into_iter()
            .filter(|&k| match_counts[k] >= params.required_matches)
            .collect();
        all_partners.push(partners);
    }

    all_partners
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_partners_basic() {
        let x = array![[0.0, 0.0, 0.0], [1.0, 1.0, 9.0], [50.0, 50.0, 50.0]];
        let partners = find_partners(&x, MatchParams::new(2.0, 2));

        assert_eq!(partners[0], vec![1]);
        assert_eq!(partners[1], vec![0]);
        assert!(partners[2].is_empty());
    }

    #[test]
    fn test_first_match_order() {
        // Entity 2 meets entity 1 on the first feature and entity 0 on the second.
        let x = array![[0.0, 5.0], [5.0, 0.0], [5.0, 5.0]];
        let partners = find_partners(&x, MatchParams::new(0.0, 1));
        assert_eq!(partners[2], vec![1, 0]);

        let x = array![[5.0, 0.0], [0.0, 5.0], [5.0, 5.0]];
        let partners = find_partners(&x, MatchParams::new(0.0, 1));
        assert_eq!(partners[2], vec![0, 1]);
    }

    #[test]
    fn test_required_matches_above_feature_count() {
        let x = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let partners = find_partners(&x, MatchParams::new(100.0, 3));
        assert!(partners.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_exact_match_boundary() {
        // match_range = 0, required = 1: partners iff some feature is exactly equal.
        let x = array![[1.0, 2.0, 3.0], [9.0, 2.0, 7.0], [4.0, 5.0, 6.0]];
        let partners = find_partners(&x, MatchParams::new(0.0, 1));

        assert_eq!(partners[0], vec![1]);
        assert_eq!(partners[1], vec![0]);
        assert!(partners[2].is_empty());
    }

    #[test]
    fn test_range_is_inclusive() {
        let x = array![[0.0], [3.0]];
        assert_eq!(find_partners(&x, MatchParams::new(3.0, 1))[0], vec![1]);
        assert!(find_partners(&x, MatchParams::new(2.5, 1))[0].is_empty());
    }

    #[test]
    fn test_negative_range_matches_nothing() {
        let x = array![[1.0, 1.0], [1.0, 1.0]];
        let partners = find_partners(&x, MatchParams::new(-0.5, 1));
        assert!(partners.iter().all(Vec::is_empty));
    }

    fn dataset_strategy() -> impl Strategy<Value = Matrix> {
        (1usize..8, 1usize..6).prop_flat_map(|(n, f)| {
            prop::collection::vec(0u8..20, n * f).prop_map(move |values| {
                Matrix::from_shape_fn((n, f), |(i, j)| values[i * f + j] as f64)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_partner_sets_exclude_self_and_are_unique(
            x in dataset_strategy(),
            range in 0u8..10,
            required in 1usize..7,
        ) {
            let partners = find_partners(&x, MatchParams::new(range as f64, required));
            prop_assert_eq!(partners.len(), x.nrows());
            for (i, set) in partners.iter().enumerate() {
                prop_assert!(!set.contains(&i));
                let mut sorted = set.clone();
                sorted.sort_unstable();
                sorted.dedup();
                prop_assert_eq!(sorted.len(), set.len());
            }
        }

        #[test]
        fn prop_partner_relation_is_symmetric(
            x in dataset_strategy(),
            range in 0u8..10,
            required in 1usize..7,
        ) {
            let partners = find_partners(&x, MatchParams::new(range as f64, required));
            for (i, set) in partners.iter().enumerate() {
                for &k in set {
                    prop_assert!(partners[k].contains(&i));
                }
            }
        }
    }
}
