use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A final cluster: its id and the labels of its members in dataset order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    pub members: Vec<String>,
}

impl Cluster {
    /// Groups `labels` by their 1-based cluster id, one cluster per id in order.
    pub fn from_assignment(ids: &[usize], labels: &[String]) -> Vec<Cluster> {
        let n_clusters = ids.iter().copied().max().unwrap_or(0);
        let mut clusters: Vec<Cluster> = (1..=n_clusters)
            .map(|id| Cluster {
                id,
                members: Vec::new(),
            })
            .collect();

        for (&id, label) in ids.iter().zip(labels) {
            if let Some(cluster) = id.checked_sub(1).and_then(|i| clusters.get_mut(i)) {
                cluster.members.push(label.clone());
            }
        }

        clusters
    }
}

/// Receives the final clusters of a converged run.
pub trait Reporter {
    fn report(&mut self, clusters: &[Cluster]) -> Result<()>;
}

/// Writes one `cluster <id>: <members>` line per cluster.
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    writer: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, clusters: &[Cluster]) -> Result<()> {
        for cluster in clusters {
            writeln!(
                self.writer,
                "cluster {}: {}",
                cluster.id,
                cluster.members.join(", ")
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the clusters as a JSON array of `{"id", "members"}` objects.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, clusters: &[Cluster]) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, clusters)?;
        } else {
            serde_json::to_writer(&mut self.writer, clusters)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ThresholdClustering;
    use crate::dataset::{Dataset, ReferenceData};

    #[derive(Default)]
    struct Recording {
        calls: Vec<Vec<Cluster>>,
    }

    impl Reporter for Recording {
        fn report(&mut self, clusters: &[Cluster]) -> Result<()> {
            self.calls.push(clusters.to_vec());
            Ok(())
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_from_assignment() {
        let clusters = Cluster::from_assignment(&[1, 2, 1, 3], &labels(&["a", "b", "c", "d"]));
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].members, vec!["a", "c"]);
        assert_eq!(clusters[1].members, vec!["b"]);
        assert_eq!(clusters[2].id, 3);
        assert_eq!(clusters[2].members, vec!["d"]);
    }

    #[test]
    fn test_text_reporter() {
        let clusters = Cluster::from_assignment(&[1, 1, 2], &labels(&["A", "B", "C"]));
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report(&clusters).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output, "cluster 1: A, B\ncluster 2: C\n");
    }

    #[test]
    fn test_json_reporter() {
        let clusters = Cluster::from_assignment(&[1, 1, 2], &labels(&["A", "B", "C"]));
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report(&clusters).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output,
            "[{\"id\":1,\"members\":[\"A\",\"B\"]},{\"id\":2,\"members\":[\"C\"]}]\n"
        );

        let parsed: Vec<Cluster> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, clusters);
    }

    #[test]
    fn test_reported_once_on_convergence() {
        let mut reporter = Recording::default();
        let mut model = ThresholdClustering::new(2);
        model.fit_report(&ReferenceData, &mut reporter).unwrap();

        assert_eq!(reporter.calls.len(), 1);
        assert_eq!(reporter.calls[0].len(), 2);
        assert_eq!(reporter.calls[0][1].members, vec!["I"]);
    }

    #[test]
    fn test_not_reported_on_failure() {
        let mut reporter = Recording::default();

        let mut model = ThresholdClustering::new(4).max_iter(20);
        assert!(model.fit_report(&ReferenceData, &mut reporter).is_err());

        let dataset = Dataset::reference();
        let mut model = ThresholdClustering::new(0);
        assert!(model.fit_report(&dataset, &mut reporter).is_err());

        assert!(reporter.calls.is_empty());
    }
}
