/// Builds the working cluster of every entity from its partner set.
///
/// The cluster of `i` is its own partners followed by the partners of each
/// of those partners, deduplicated in first-seen order. Only one level is
/// expanded; chains longer than two hops are not followed.
pub fn expand_clusters(all_partners: &[Vec<usize>]) -> Vec<Vec<usize>> {
    all_partners
        .iter()
        .map(|partners| {
            let mut seen = vec![false; all_partners.len()];
            let mut cluster = Vec::with_capacity(partners.len());

            let second_hop = partners.iter().flat_map(|&p| all_partners[p].iter());
            for &member in partners.iter().chain(second_hop) {
                if !seen[member] {
                    seen[member] = true;
                    cluster.push(member);
                }
            }
            cluster
        })
        .collect()
}
