use crate::error::{ClusterError, Result};
use crate::{ArrayView1, Matrix};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const REFERENCE_LABELS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

const REFERENCE_FEATURES: [[f64; 7]; 10] = [
    [2.0, 5.0, 0.0, 6.0, 0.0, 4.0, 0.0],
    [3.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0],
    [0.0, 0.0, 0.0, 0.0, 6.0, 0.0, 8.0],
    [4.0, 2.0, 0.0, 7.0, 0.0, 3.0, 0.0],
    [3.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 9.0, 7.0],
    [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 8.0, 9.0],
    [94.0, 87.0, 75.0, 101.0, 2.0, 54.0, 62.0],
    [5.0, 6.0, 1.0, 8.0, 0.0, 3.0, 1.0],
];

/// Labeled entities with one fixed-length feature vector each.
///
/// Row `i` of `features` belongs to `labels[i]`. The row index is the
/// entity's identity during clustering; the label is only used for output.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    labels: Vec<String>,
    features: Matrix,
}

impl Dataset {
    pub fn new(labels: Vec<String>, features: Matrix) -> Result<Self> {
        if features.nrows() == 0 || features.ncols() == 0 {
            return Err(ClusterError::EmptyDataset);
        }

        if features.nrows() != labels.len() {
            return Err(ClusterError::LabelCountMismatch {
                labels: labels.len(),
                rows: features.nrows(),
            });
        }

        if let Some(((row, column), _)) = features.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ClusterError::NonFiniteFeature { row, column });
        }

        Ok(Self { labels, features })
    }

    /// Builds a dataset from nested rows, rejecting ragged input.
    pub fn from_rows(labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_features = rows.first().map(Vec::len).unwrap_or(0);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != n_features {
                return Err(ClusterError::RaggedFeatures {
                    row,
                    expected: n_features,
                    found: values.len(),
                });
            }
        }

        let features = Matrix::from_shape_fn((rows.len(), n_features), |(i, j)| rows[i][j]);
        Self::new(labels, features)
    }

    /// The ten-user, seven-feature dataset labeled "A" through "J".
    pub fn reference() -> Self {
        let labels = REFERENCE_LABELS.iter().map(|l| l.to_string()).collect();
        let features = Matrix::from_shape_fn((REFERENCE_FEATURES.len(), 7), |(i, j)| {
            REFERENCE_FEATURES[i][j]
        });
        Self { labels, features }
    }

    pub fn n_entities(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, entity: usize) -> Option<&str> {
        self.labels.get(entity).map(String::as_str)
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn row(&self, entity: usize) -> ArrayView1<'_, f64> {
        self.features.row(entity)
    }
}

/// Supplies the dataset for a clustering run.
pub trait DataSource {
    fn load(&self) -> Result<Dataset>;
}

impl DataSource for Dataset {
    fn load(&self) -> Result<Dataset> {
        Ok(self.clone())
    }
}

/// The built-in "A".."J" dataset.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceData;

impl DataSource for ReferenceData {
    fn load(&self) -> Result<Dataset> {
        Ok(Dataset::reference())
    }
}

/// On-disk layout read by [`JsonFile`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetFile {
    pub labels: Vec<String>,
    pub features: Vec<Vec<f64>>,
}

impl TryFrom<DatasetFile> for Dataset {
    type Error = ClusterError;

    fn try_from(file: DatasetFile) -> Result<Self> {
        Dataset::from_rows(file.labels, file.features)
    }
}

/// JSON file of the form `{"labels": [...], "features": [[...], ...]}`.
#[derive(Clone, Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(contents: &str) -> Result<Dataset> {
        let file: DatasetFile = serde_json::from_str(contents)?;
        Dataset::try_from(file)
    }
}

impl DataSource for JsonFile {
    fn load(&self) -> Result<Dataset> {
        let contents = std::fs::read_to_string(&self.path)?;
        Self::parse(&contents)
    }
}
