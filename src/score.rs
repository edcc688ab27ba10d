//! Pairwise compatibility scoring.
//!
//! A score is the weighted sum of eleven sub-scores, each normalised to
//! `[0, 1]`. Weights are renormalised up front, so the total also lies in
//! `[0, 1]`. Every sub-score is symmetric and is summed in a fixed order, so
//! `score(a, b) == score(b, a)` holds exactly, not just approximately.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::constraint::ConstraintChecker;
use crate::error::ConfigError;
use crate::model::condition::{Score, Weights};
use crate::model::entity::{Index, Intent, ParticipantRecord, MAX_SKILL_LEVEL};
use crate::pool::Pool;

const MAX_HACKATHON_DIFF: u32 = 10;
const MAX_EXPERIENCE_DIFF: f64 = 2.0;
const MAX_STUDY_YEAR_DIFF: f64 = 5.0;
const NEUTRAL_ROLE_SCORE: Score = 0.5;

/// Unweighted sub-scores for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScores {
    pub objective: Score,
    pub role: Score,
    pub experience: Score,
    pub language: Score,
    pub skills: Score,
    pub hackathons: Score,
    pub study_year: Score,
    pub challenges: Score,
    pub availability: Score,
    pub team_size: Score,
    pub friend: Score,
}

impl FactorScores {
    pub fn compute(
        a: &ParticipantRecord,
        b: &ParticipantRecord,
        intent_a: Option<Intent>,
        intent_b: Option<Intent>,
    ) -> FactorScores {
        FactorScores {
            objective: objective_match(intent_a, intent_b),
            role: role_complementarity(a, b),
            experience: experience_closeness(a, b),
            language: jaccard(&a.preferred_languages, &b.preferred_languages),
            skills: skill_similarity(a, b),
            hackathons: hackathon_closeness(a, b),
            study_year: study_year_closeness(a, b),
            challenges: jaccard(&a.interest_in_challenges, &b.interest_in_challenges),
            availability: availability_overlap(a, b),
            team_size: if a.preferred_team_size == b.preferred_team_size { 1.0 } else { 0.0 },
            friend: if a.requests(&b.id) || b.requests(&a.id) { 1.0 } else { 0.0 },
        }
    }

    pub fn weighted(&self, weights: &Weights) -> Score {
        self.objective * weights.objective
            + self.role * weights.role
            + self.experience * weights.experience
            + self.language * weights.language
            + self.skills * weights.skills
            + self.hackathons * weights.hackathons
            + self.study_year * weights.study_year
            + self.challenges * weights.challenges
            + self.availability * weights.availability
            + self.team_size * weights.team_size
            + self.friend * weights.friend
    }
}

/// Unknown intents never match, not even each other.
fn objective_match(a: Option<Intent>, b: Option<Intent>) -> Score {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}

fn role_complementarity(a: &ParticipantRecord, b: &ParticipantRecord) -> Score {
    if a.preferred_role.is_neutral() || b.preferred_role.is_neutral() {
        NEUTRAL_ROLE_SCORE
    } else if a.preferred_role != b.preferred_role {
        1.0
    } else {
        0.0
    }
}

fn experience_closeness(a: &ParticipantRecord, b: &ParticipantRecord) -> Score {
    let diff = a.experience_level.rank().abs_diff(b.experience_level.rank());
    1.0 - f64::from(diff) / MAX_EXPERIENCE_DIFF
}

fn study_year_closeness(a: &ParticipantRecord, b: &ParticipantRecord) -> Score {
    let diff = a.year_of_study.rank().abs_diff(b.year_of_study.rank());
    1.0 - f64::from(diff) / MAX_STUDY_YEAR_DIFF
}

fn hackathon_closeness(a: &ParticipantRecord, b: &ParticipantRecord) -> Score {
    let diff = a.hackathons_done.abs_diff(b.hackathons_done).min(MAX_HACKATHON_DIFF);
    1.0 - f64::from(diff) / f64::from(MAX_HACKATHON_DIFF)
}

/// No shared skill counts as fully complementary.
fn skill_similarity(a: &ParticipantRecord, b: &ParticipantRecord) -> Score {
    let diffs: Vec<u8> = a
        .programming_skills
        .iter()
        .filter_map(|(skill, level)| b.programming_skills.get(skill).map(|other| level.abs_diff(*other)))
        .collect();
    if diffs.is_empty() {
        return 1.0;
    }
    let total: f64 = diffs.iter().map(|diff| f64::from(*diff)).sum();
    1.0 - total / (f64::from(MAX_SKILL_LEVEL) * diffs.len() as f64)
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Score {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Slots missing from one side count as unavailable for that side.
fn availability_overlap(a: &ParticipantRecord, b: &ParticipantRecord) -> Score {
    let slots: BTreeSet<&String> = a.availability.keys().chain(b.availability.keys()).collect();
    if slots.is_empty() {
        return 0.0;
    }
    let shared = slots
        .iter()
        .filter(|slot| {
            a.availability.get(**slot).copied().unwrap_or(false)
                && b.availability.get(**slot).copied().unwrap_or(false)
        })
        .count();
    shared as f64 / slots.len() as f64
}

#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    weights: Weights,
    checker: ConstraintChecker,
}

impl CompatibilityScorer {
    pub fn new(weights: &Weights) -> Result<CompatibilityScorer, ConfigError> {
        Ok(CompatibilityScorer {
            weights: weights.normalized()?,
            checker: ConstraintChecker,
        })
    }

    pub fn checker(&self) -> &ConstraintChecker {
        &self.checker
    }

    /// Sub-scores for an eligible pair, `None` when a hard constraint fails.
    pub fn breakdown(&self, pool: &Pool, a: Index, b: Index) -> Option<FactorScores> {
        let (record_a, record_b) = (pool.get(a)?, pool.get(b)?);
        if !self.checker.is_eligible(record_a, record_b) {
            return None;
        }
        Some(FactorScores::compute(record_a, record_b, pool.intent(a), pool.intent(b)))
    }

    /// Compatibility in `[0, 1]`; 0 for ineligible pairs.
    pub fn score(&self, pool: &Pool, a: Index, b: Index) -> Score {
        self.breakdown(pool, a, b)
            .map(|factors| factors.weighted(&self.weights).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}
