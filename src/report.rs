use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::model::condition::Score;
use crate::model::entity::{ExperienceLevel, Id, Intent, PreferredRole};
use crate::model::group::{FormationMethod, Team};
use crate::pool::Pool;
use crate::score::CompatibilityScorer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    /// 1-based position in the output.
    pub number: usize,
    pub method: FormationMethod,
    pub member_ids: Vec<Id>,
    pub member_names: Vec<String>,
    pub roles: Vec<PreferredRole>,
    pub intents: Vec<Option<Intent>>,
    pub experience_levels: Vec<ExperienceLevel>,
    /// Mean pairwise compatibility; `None` for single-member teams.
    pub mean_compatibility: Option<Score>,
}

pub fn summarize(pool: &Pool, scorer: &CompatibilityScorer, teams: &[Team]) -> Vec<TeamReport> {
    teams
        .iter()
        .enumerate()
        .map(|(position, team)| {
            let records = team.members.iter().filter_map(|index| pool.get(*index)).collect_vec();
            let pair_scores = team
                .members
                .iter()
                .tuple_combinations()
                .map(|(a, b)| scorer.score(pool, *a, *b))
                .collect_vec();
            let mean_compatibility = if pair_scores.is_empty() {
                None
            } else {
                Some(pair_scores.iter().sum::<Score>() / pair_scores.len() as f64)
            };
            TeamReport {
                number: position + 1,
                method: team.method,
                member_ids: records.iter().map(|record| record.id.clone()).collect(),
                member_names: records.iter().map(|record| record.name.clone()).collect(),
                roles: records.iter().map(|record| record.preferred_role).collect(),
                intents: team.members.iter().map(|index| pool.intent(*index)).collect(),
                experience_levels: records.iter().map(|record| record.experience_level).collect(),
                mean_compatibility,
            }
        })
        .collect()
}

/// The report of the team holding a participant, matched by exact id or by
/// case-insensitive name.
pub fn find_member<'r>(reports: &'r [TeamReport], query: &str) -> Option<&'r TeamReport> {
    let lowered = query.to_lowercase();
    reports.iter().find(|report| {
        report.member_ids.iter().any(|id| id == query)
            || report.member_names.iter().any(|name| name.to_lowercase() == lowered)
    })
}

impl fmt::Display for TeamReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team {} ({} members, {})", self.number, self.member_ids.len(), self.method)?;
        writeln!(f, "  Members: {}", self.member_names.join(", "))?;
        writeln!(f, "  Roles: {}", self.roles.iter().join(", "))?;
        let intents = self
            .intents
            .iter()
            .map(|intent| intent.map_or_else(|| "unknown".to_string(), |intent| intent.to_string()))
            .join(", ");
        writeln!(f, "  Objectives: {intents}")?;
        writeln!(f, "  Experience: {}", self.experience_levels.iter().join(", "))?;
        if let Some(mean) = self.mean_compatibility {
            writeln!(f, "  Mean compatibility: {mean:.2}")?;
        }
        Ok(())
    }
}

/// Run-wide distribution of team sizes, formation methods and intents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub participants: usize,
    pub teams: usize,
    pub teams_by_size: BTreeMap<usize, usize>,
    pub teams_by_method: BTreeMap<String, usize>,
    /// Participants per resolved intent; unresolved ones count as `unknown`.
    pub intents: BTreeMap<String, usize>,
}

pub fn run_summary(pool: &Pool, teams: &[Team]) -> RunSummary {
    let mut summary = RunSummary {
        participants: teams.iter().map(Team::len).sum(),
        teams: teams.len(),
        ..RunSummary::default()
    };
    for team in teams {
        *summary.teams_by_size.entry(team.len()).or_default() += 1;
        *summary.teams_by_method.entry(team.method.to_string()).or_default() += 1;
        for index in &team.members {
            let intent = pool.intent(*index).map_or_else(|| "unknown".to_string(), |intent| intent.to_string());
            *summary.intents.entry(intent).or_default() += 1;
        }
    }
    summary
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} participants in {} teams", self.participants, self.teams)?;
        let sizes = self.teams_by_size.iter().map(|(size, count)| format!("{size}: {count}")).join(", ");
        writeln!(f, "  Team sizes: {sizes}")?;
        let methods = self.teams_by_method.iter().map(|(method, count)| format!("{method}: {count}")).join(", ");
        writeln!(f, "  Methods: {methods}")?;
        let intents = self.intents.iter().map(|(intent, count)| format!("{intent}: {count}")).join(", ");
        writeln!(f, "  Objectives: {intents}")
    }
}
