// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::models::search_query::NormalizedQuery;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

/// Boost applied to accounts the viewer follows when they are not a hard filter
pub const FOLLOWING_BOOST: f64 = 2.0;

/// Account fields the match criteria run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Handle,
    DisplayName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowingBoost {
    pub ids: Vec<i64>,
    pub weight: f64,
}

/// Engine-agnostic match criteria for one ranked search
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCriteria {
    pub term: String,
    pub fields: Vec<MatchField>,
    pub viewer_id: Option<i64>,
    /// Hard restriction to these ids (following-only searches)
    pub restrict_to: Option<Vec<i64>>,
    pub boost: Option<FollowingBoost>,
}

impl MatchCriteria {
    pub fn allows(&self, id: i64) -> bool {
        self.restrict_to
            .as_ref()
            .map_or(true, |ids| ids.binary_search(&id).is_ok())
    }
}

/// Gaussian decay on the time since an account was last active.
///
/// No decay inside `offset`; the score drops to `decay` at `offset + scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyDecay {
    pub weight: f64,
    pub scale: Duration,
    pub offset: Duration,
    pub decay: f64,
}

impl Default for RecencyDecay {
    fn default() -> Self {
        Self {
            weight: 2.0,
            scale: Duration::days(3),
            offset: Duration::days(1),
            decay: 0.5,
        }
    }
}

impl RecencyDecay {
    /// Accounts with no recorded activity get the minimum, 0.0
    pub fn evaluate(&self, last_activity_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
        let Some(last_activity_at) = last_activity_at else {
            return 0.0;
        };

        let distance = (now - last_activity_at).num_milliseconds().abs() as f64;
        let beyond_offset = (distance - self.offset.num_milliseconds() as f64).max(0.0);
        let scale = self.scale.num_milliseconds() as f64;

        if scale <= 0.0 {
            return if beyond_offset == 0.0 { 1.0 } else { 0.0 };
        }

        // exp(-d^2 / 2σ^2) with σ^2 = -scale^2 / (2 ln decay)
        self.decay.powf((beyond_offset / scale).powi(2))
    }
}

/// Composite ranking score: weighted average of reputation, popularity and recency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScore {
    pub reputation_weight: f64,
    pub popularity_weight: f64,
    pub recency: RecencyDecay,
}

impl Default for CompositeScore {
    fn default() -> Self {
        Self {
            reputation_weight: 0.5,
            popularity_weight: 0.5,
            recency: RecencyDecay::default(),
        }
    }
}

impl CompositeScore {
    /// followers / (followers + following + 1)
    pub fn reputation(followers_count: i64, following_count: i64) -> f64 {
        let followers = followers_count.max(0) as f64;
        let following = following_count.max(0) as f64;
        followers / (followers + following + 1.0)
    }

    /// ln(2 + followers) / (ln(2 + followers) + 1)
    pub fn popularity(followers_count: i64) -> f64 {
        let damped = (2.0 + followers_count.max(0) as f64).ln();
        damped / (damped + 1.0)
    }

    pub fn evaluate(
        &self,
        followers_count: i64,
        following_count: i64,
        last_activity_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> f64 {
        let weighted = [
            (
                self.reputation_weight,
                Self::reputation(followers_count, following_count),
            ),
            (self.popularity_weight, Self::popularity(followers_count)),
            (
                self.recency.weight,
                self.recency.evaluate(last_activity_at, now),
            ),
        ];

        let total_weight: f64 = weighted.iter().map(|(weight, _)| weight).sum();
        if total_weight <= 0.0 {
            return 0.0;
        }

        weighted
            .iter()
            .map(|(weight, score)| weight * score)
            .sum::<f64>()
            / total_weight
    }

    pub fn evaluate_account(&self, account: &Account, now: DateTime<Utc>) -> f64 {
        self.evaluate(
            account.followers_count,
            account.following_count,
            account.last_activity_at,
            now,
        )
    }
}

/// The viewer's side of a search: who is asking and whom they follow
#[derive(Debug, Clone, Copy)]
pub struct ViewerRelations<'a> {
    pub account_id: i64,
    pub following_ids: &'a HashSet<i64>,
}

pub struct RelevanceScorer {
    score: CompositeScore,
    following_boost: f64,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(CompositeScore::default())
    }
}

impl RelevanceScorer {
    pub fn new(score: CompositeScore) -> Self {
        Self {
            score,
            following_boost: FOLLOWING_BOOST,
        }
    }

    pub fn composite_score(&self) -> &CompositeScore {
        &self.score
    }

    /// Build the match criteria for a normalized query.
    ///
    /// Returns `None` when the search cannot match anything: a following-only
    /// search by a viewer who follows no one.
    pub fn criteria(
        &self,
        query: &NormalizedQuery,
        viewer: Option<ViewerRelations<'_>>,
        following_only: bool,
    ) -> Option<MatchCriteria> {
        let mut criteria = MatchCriteria {
            term: query.search_term().to_string(),
            fields: vec![MatchField::Handle, MatchField::DisplayName],
            viewer_id: viewer.map(|v| v.account_id),
            restrict_to: None,
            boost: None,
        };

        if let Some(viewer) = viewer {
            let mut ids: Vec<i64> = viewer.following_ids.iter().copied().collect();
            ids.sort_unstable();

            if following_only {
                if ids.is_empty() {
                    return None;
                }
                criteria.restrict_to = Some(ids);
            } else if !ids.is_empty() {
                criteria.boost = Some(FollowingBoost {
                    ids,
                    weight: self.following_boost,
                });
            }
        }

        Some(criteria)
    }
}
