//! Configuration for the step tracker.

use std::fmt;
use std::path::{Path, PathBuf};

/// Points awarded to the first, second and third daily achievers
pub const DEFAULT_REWARD_POINTS: [u64; 3] = [100, 75, 50];

/// Configuration for the ranking engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingConfig {
    /// How many daily achievers are ranked and rewarded
    pub top_n: usize,
    /// Points by rank, first place first
    pub reward_points: Vec<u64>,
    /// Days of history required before suggesting a goal change
    ///
    /// Zero is read as one: a suggestion always needs at least one day.
    pub suggestion_min_days: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            reward_points: DEFAULT_REWARD_POINTS.to_vec(),
            suggestion_min_days: crate::models::DAYS_PER_WEEK,
        }
    }
}

impl RankingConfig {
    /// Points for a zero-based rank, if that rank is rewarded
    #[must_use]
    pub fn points_for_rank(&self, rank: usize) -> Option<u64> {
        if rank < self.top_n {
            self.reward_points.get(rank).copied()
        } else {
            None
        }
    }

    /// Days of history a goal suggestion needs, never less than one
    #[must_use]
    pub fn required_history_days(&self) -> usize {
        self.suggestion_min_days.max(1)
    }
}

/// Configuration for the step tracker
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Directory the data files live in
    pub data_dir: PathBuf,
    /// File name of the individuals CSV
    pub individuals_file: String,
    /// File name of the groups CSV
    pub groups_file: String,
    /// File name of the JSON snapshot
    pub snapshot_file: String,
    /// Number of individuals in generated sample data
    pub sample_individuals: u32,
    /// Default log filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Ranking settings
    pub ranking: RankingConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            individuals_file: "individuals.csv".to_string(),
            groups_file: "groups.csv".to_string(),
            snapshot_file: "snapshot.json".to_string(),
            sample_individuals: 20,
            log_filter: "info".to_string(),
            ranking: RankingConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Use a different data directory
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    /// Full path of the individuals CSV
    #[must_use]
    pub fn individuals_path(&self) -> PathBuf {
        self.data_dir.join(&self.individuals_file)
    }

    /// Full path of the groups CSV
    #[must_use]
    pub fn groups_path(&self) -> PathBuf {
        self.data_dir.join(&self.groups_file)
    }

    /// Full path of the JSON snapshot
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }
}

impl fmt::Display for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Step Tracker Configuration:")?;
        writeln!(f, "  Data Directory: {}", self.data_dir.display())?;
        writeln!(f, "  Individuals File: {}", self.individuals_file)?;
        writeln!(f, "  Groups File: {}", self.groups_file)?;
        writeln!(f, "  Snapshot File: {}", self.snapshot_file)?;
        writeln!(f, "  Sample Individuals: {}", self.sample_individuals)?;
        writeln!(f, "  Top N: {}", self.ranking.top_n)?;
        writeln!(f, "  Reward Points: {:?}", self.ranking.reward_points)?;
        Ok(())
    }
}
