use super::expand::expand_clusters;
use super::ids::{assign_cluster_ids, ClusterIds};
use super::partners::{find_partners, MatchParams};
use crate::dataset::{DataSource, Dataset};
use crate::error::{ClusterError, Result};
use crate::report::{Cluster, Reporter};
use crate::Matrix;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Which way the detected cluster count missed the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Fewer clusters than requested; matching is made stricter.
    TooFew,
    /// More clusters than requested; matching is made looser.
    TooMany,
}

/// Starting thresholds and limits for the tuning loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    pub initial_match_range: f64,
    pub initial_required_matches: usize,
    pub min_required_matches: usize,
    pub max_required_matches: usize,
    /// Step applied to the match range on the first adjustment.
    pub initial_adjuster: f64,
    pub max_iter: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            initial_match_range: 10.0,
            initial_required_matches: 3,
            min_required_matches: 1,
            max_required_matches: 6,
            initial_adjuster: 1.0,
            max_iter: 200,
        }
    }
}

impl TunerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_match_range.is_finite() || self.initial_match_range < 0.0 {
            return Err(ClusterError::InvalidParameter {
                name: "initial_match_range",
                message: format!("must be finite and >= 0, got {}", self.initial_match_range),
            });
        }
        if self.min_required_matches == 0 || self.min_required_matches > self.max_required_matches
        {
            return Err(ClusterError::InvalidParameter {
                name: "required_matches_bounds",
                message: format!(
                    "need 1 <= min <= max, got [{}, {}]",
                    self.min_required_matches, self.max_required_matches
                ),
            });
        }
        if !(self.min_required_matches..=self.max_required_matches)
            .contains(&self.initial_required_matches)
        {
            return Err(ClusterError::InvalidParameter {
                name: "initial_required_matches",
                message: format!(
                    "{} is outside [{}, {}]",
                    self.initial_required_matches,
                    self.min_required_matches,
                    self.max_required_matches
                ),
            });
        }
        if !self.initial_adjuster.is_finite() || self.initial_adjuster <= 0.0 {
            return Err(ClusterError::InvalidParameter {
                name: "initial_adjuster",
                message: format!("must be finite and > 0, got {}", self.initial_adjuster),
            });
        }
        if self.max_iter == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "max_iter",
                message: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Mutable state of the tuning loop between iterations.
#[derive(Clone, Debug, PartialEq)]
pub struct TunerState {
    pub params: MatchParams,
    /// Last step applied to the match range; `None` before the first adjustment.
    pub adjuster: Option<f64>,
    pub last_direction: Option<Direction>,
}

impl TunerState {
    pub fn new(config: &TunerConfig) -> Self {
        Self {
            params: MatchParams::new(config.initial_match_range, config.initial_required_matches),
            adjuster: None,
            last_direction: None,
        }
    }

    /// Moves the thresholds one step in response to a missed target.
    ///
    /// The step size is held while the direction repeats and halved when it
    /// flips. `required_matches` is clamped to the configured bounds.
    pub fn advance(&mut self, direction: Direction, config: &TunerConfig) {
        let adjuster = match (self.adjuster, self.last_direction) {
            (Some(step), Some(last)) if last == direction => step,
            (Some(step), _) => step / 2.0,
            (None, _) => config.initial_adjuster,
        };

        let params = &mut self.params;
        match direction {
            Direction::TooFew => {
                params.match_range -= adjuster;
                params.required_matches =
                    (params.required_matches + 1).min(config.max_required_matches);
            }
            Direction::TooMany => {
                params.match_range += adjuster;
                params.required_matches = params
                    .required_matches
                    .saturating_sub(1)
                    .max(config.min_required_matches);
            }
        }

        self.adjuster = Some(adjuster);
        self.last_direction = Some(direction);
    }
}

/// One recorded iteration of the tuning loop.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TuningStep {
    pub iteration: usize,
    pub params: MatchParams,
    pub detected: usize,
    /// `None` on the converged iteration.
    pub direction: Option<Direction>,
}

/// Runs partner finding, one-hop expansion and id assignment once.
pub fn detect_clusters(features: &Matrix, params: MatchParams) -> ClusterIds {
    let partners = find_partners(features, params);
    let clusters = expand_clusters(&partners);
    assign_cluster_ids(&clusters)
}

/// Threshold clustering that tunes its thresholds to hit a target count.
#[derive(Clone, Debug)]
pub struct ThresholdClustering {
    pub clusters: Option<Vec<Cluster>>,
    pub labels: Option<Vec<usize>>,
    pub final_params: Option<MatchParams>,
    pub history: Vec<TuningStep>,
    n_clusters: usize,
    config: TunerConfig,
}

impl ThresholdClustering {
    pub fn new(n_clusters: usize) -> Self {
        Self::with_config(n_clusters, TunerConfig::default())
    }

    pub fn with_config(n_clusters: usize, config: TunerConfig) -> Self {
        Self {
            clusters: None,
            labels: None,
            final_params: None,
            history: Vec::new(),
            n_clusters,
            config,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    pub fn match_range(mut self, match_range: f64) -> Self {
        self.config.initial_match_range = match_range;
        self
    }

    pub fn required_matches(mut self, required_matches: usize) -> Self {
        self.config.initial_required_matches = required_matches;
        self
    }

    pub fn required_matches_bounds(mut self, min: usize, max: usize) -> Self {
        self.config.min_required_matches = min;
        self.config.max_required_matches = max;
        self
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    pub fn target(&self) -> usize {
        self.n_clusters
    }

    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        self.clusters = None;
        self.labels = None;
        self.final_params = None;
        self.history.clear();

        self.config.validate()?;
        let target = self.n_clusters;
        if target == 0 || target > dataset.n_entities() {
            return Err(ClusterError::InvalidTargetCount {
                requested: target,
                n_entities: dataset.n_entities(),
            });
        }

        let mut state = TunerState::new(&self.config);
        let mut closest: Option<usize> = None;

        for iteration in 0..self.config.max_iter {
            let assignment = detect_clusters(dataset.features(), state.params);
            let detected = assignment.n_clusters();
            let direction = match detected.cmp(&target) {
                Ordering::Less => Some(Direction::TooFew),
                Ordering::Greater => Some(Direction::TooMany),
                Ordering::Equal => None,
            };

            debug!(
                iteration,
                match_range = state.params.match_range,
                required_matches = state.params.required_matches,
                detected,
                target_clusters = target,
                "tuning iteration"
            );
            self.history.push(TuningStep {
                iteration,
                params: state.params,
                detected,
                direction,
            });

            if closest.is_none_or(|best| detected.abs_diff(target) < best.abs_diff(target)) {
                closest = Some(detected);
            }

            match direction {
                Some(direction) => state.advance(direction, &self.config),
                None => {
                    info!(
                        iterations = iteration + 1,
                        match_range = state.params.match_range,
                        required_matches = state.params.required_matches,
                        "converged to {target} clusters"
                    );
                    self.clusters = Some(Cluster::from_assignment(
                        assignment.ids(),
                        dataset.labels(),
                    ));
                    self.labels = Some(assignment.into_ids());
                    self.final_params = Some(state.params);
                    return Ok(());
                }
            }
        }

        let closest = closest.unwrap_or(0);
        warn!(
            iterations = self.config.max_iter,
            target_clusters = target,
            closest,
            "iteration cap reached without convergence"
        );
        Err(ClusterError::ConvergenceFailure {
            iterations: self.config.max_iter,
            target,
            closest,
        })
    }

    pub fn fit_predict(&mut self, dataset: &Dataset) -> Result<Vec<usize>> {
        self.fit(dataset)?;
        Ok(self.labels.clone().unwrap_or_default())
    }

    /// Loads the dataset, fits, and hands the final clusters to `reporter`.
    ///
    /// The reporter is called exactly once, and only when tuning converged.
    pub fn fit_report<S, R>(&mut self, source: &S, reporter: &mut R) -> Result<()>
    where
        S: DataSource + ?Sized,
        R: Reporter + ?Sized,
    {
        let dataset = source.load()?;
        self.fit(&dataset)?;
        match self.clusters.as_deref() {
            Some(clusters) => reporter.report(clusters),
            None => Ok(()),
        }
    }

    pub fn get_n_clusters(&self) -> Option<usize> {
        self.clusters.as_ref().map(Vec::len)
    }
}
