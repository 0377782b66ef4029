//! Reward points for the daily top achievers

use log::info;

use crate::error::{Result, TrackerError};
use crate::registry::MembershipRegistry;

use super::RankingEngine;

/// Result of checking an individual for a daily reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardOutcome {
    /// The individual placed and was awarded points
    Awarded {
        /// Zero-based rank among today's achievers
        rank: usize,
        /// Points added by this call
        points: u64,
        /// Points held after the award
        total: u64,
    },
    /// The individual is not among today's rewarded achievers
    NotInTopN {
        /// Points currently held
        total: u64,
    },
}

impl RewardOutcome {
    /// Points held after the check
    #[must_use]
    pub const fn total(&self) -> u64 {
        match self {
            Self::Awarded { total, .. } | Self::NotInTopN { total } => *total,
        }
    }
}

impl RankingEngine {
    /// Award points if the individual is among today's top achievers
    ///
    /// Points are added on every qualifying call; calling twice on the same
    /// day awards twice.
    pub fn reward_if_top_n(
        &self,
        registry: &mut MembershipRegistry,
        individual_id: u32,
    ) -> Result<RewardOutcome> {
        let current = registry
            .lookup_individual(individual_id)
            .ok_or(TrackerError::IndividualNotFound(individual_id))?
            .points();

        let placed = self
            .top_daily_achievers(registry, self.config.top_n)
            .iter()
            .position(|individual| individual.id == individual_id)
            .and_then(|rank| self.config.points_for_rank(rank).map(|points| (rank, points)));

        match placed {
            Some((rank, points)) => {
                let total = registry.award_points(individual_id, points)?;
                info!(
                    "Individual {individual_id} ranked {} and earned {points} points ({total} total)",
                    rank + 1
                );
                Ok(RewardOutcome::Awarded { rank, points, total })
            }
            None => Ok(RewardOutcome::NotInTopN { total: current }),
        }
    }
}
