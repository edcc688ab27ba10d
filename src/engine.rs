use std::collections::HashSet;

use tracing::{debug, info};

use crate::assemble::TeamAssembler;
use crate::cluster::{LanguageClusterer, SkillTierPartitioner};
use crate::config::{EngineConfig, GroupingMode};
use crate::error::{Error, Result};
use crate::friends::FriendGroupExtractor;
use crate::intent::{resolve_intents, IntentClassifier};
use crate::model::entity::{Index, ParticipantRecord};
use crate::model::group::{FormationMethod, Team, TeamRoster};
use crate::pool::Pool;
use crate::score::CompatibilityScorer;

/// Result of one run: the teams plus the pool and scorer they refer to.
#[derive(Debug, Clone)]
pub struct Formation {
    pub pool: Pool,
    pub scorer: CompatibilityScorer,
    pub teams: Vec<Team>,
}

impl Formation {
    pub fn rosters(&self) -> Vec<TeamRoster> {
        self.teams.iter().map(|team| self.pool.roster(team)).collect()
    }
}

/// Runs the whole pipeline: validation, intent resolution, friend groups,
/// then the configured grouping mode over whoever is left.
///
/// Friend-group teams come first in the output, in component order.
pub fn form_teams(
    records: Vec<ParticipantRecord>,
    classifier: &dyn IntentClassifier,
    config: &EngineConfig,
) -> Result<Formation> {
    config.validate()?;
    let scorer = CompatibilityScorer::new(&config.weights)?;
    let pool = Pool::create(records)?;
    let intents = resolve_intents(pool.records(), classifier, config.classifier_fail_fast)?;
    let pool = pool.with_intents(intents);

    let friends = FriendGroupExtractor::new(config.max_team_size, config.friend_overflow_policy).extract(&pool);
    let mut teams = friends.teams;
    let friend_teams = teams.len();

    teams.extend(group_remaining(&pool, &scorer, config, &friends.remaining));
    verify_partition(&pool, &teams, config.max_team_size)?;

    info!(
        participants = pool.len(),
        friend_groups = friend_teams,
        teams = teams.len(),
        mode = %config.grouping_mode,
        "formed teams"
    );
    Ok(Formation { pool, scorer, teams })
}

fn group_remaining(pool: &Pool, scorer: &CompatibilityScorer, config: &EngineConfig, remaining: &[Index]) -> Vec<Team> {
    let assembler = TeamAssembler::new(pool, scorer, config.max_team_size);
    match config.grouping_mode {
        GroupingMode::General => assembler.assemble(remaining),
        GroupingMode::Language => LanguageClusterer::new(config.max_team_size)
            .cluster(pool, remaining)
            .into_iter()
            .map(|group| Team::new(group, FormationMethod::LanguageCluster))
            .collect(),
        GroupingMode::SkillTier => {
            let tiers = SkillTierPartitioner::partition(pool, remaining);
            debug!(high = tiers.high.len(), mid = tiers.mid.len(), low = tiers.low.len(), "skill tiers");
            tiers
                .iter()
                .flat_map(|tier| {
                    let mut in_input_order = tier.clone();
                    in_input_order.sort_unstable();
                    assembler.assemble(&in_input_order)
                })
                .collect()
        }
    }
}

/// Every participant in exactly one team, every team within `1..=max_team_size`.
pub fn verify_partition(pool: &Pool, teams: &[Team], max_team_size: usize) -> Result<()> {
    let mut seen = HashSet::with_capacity(pool.len());
    for team in teams {
        if team.is_empty() || team.len() > max_team_size {
            return Err(Error::Partition(format!("team of size {} (max {max_team_size})", team.len())));
        }
        for index in &team.members {
            if *index >= pool.len() || !seen.insert(*index) {
                return Err(Error::Partition(format!("participant #{index} placed twice or unknown")));
            }
        }
    }
    if seen.len() != pool.len() {
        return Err(Error::Partition(format!("{} of {} participants placed", seen.len(), pool.len())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use crate::model::entity::Intent;
    use crate::testing::participant;

    fn learn(_: &str) -> std::result::Result<Intent, ClassifierError> {
        Ok(Intent::Learn)
    }

    #[test]
    fn test_empty_input_forms_no_teams() {
        let formation = form_teams(Vec::new(), &learn, &EngineConfig::default()).unwrap();
        assert!(formation.teams.is_empty());
    }

    #[test]
    fn test_friend_groups_come_first() {
        let records = vec![
            participant("a").languages(&["English"]).build(),
            participant("b").languages(&["English"]).friend("c").build(),
            participant("c").languages(&["English"]).friend("b").build(),
        ];
        let formation = form_teams(records, &learn, &EngineConfig::default()).unwrap();
        let rosters = formation.rosters();
        assert_eq!(rosters[0].method, FormationMethod::FriendGroup);
        assert_eq!(rosters[0].member_ids, vec!["b", "c"]);
        assert_eq!(rosters[1].method, FormationMethod::Matched);
        assert_eq!(rosters[1].member_ids, vec!["a"]);
    }

    #[test]
    fn test_language_mode_tags_clusters() {
        let records = vec![participant("a").build(), participant("b").languages(&["French"]).build()];
        let config = EngineConfig { grouping_mode: GroupingMode::Language, ..EngineConfig::default() };
        let formation = form_teams(records, &learn, &config).unwrap();
        assert_eq!(formation.teams.len(), 2);
        assert!(formation.teams.iter().all(|team| team.method == FormationMethod::LanguageCluster));
    }

    #[test]
    fn test_skill_tier_mode_assembles_within_tiers() {
        let records = vec![
            participant("lo1").skill("Python", 1).build(),
            participant("hi1").skill("Python", 9).build(),
            participant("mid1").skill("Python", 5).build(),
            participant("hi2").skill("Python", 9).build(),
            participant("mid2").skill("Python", 5).build(),
            participant("lo2").skill("Python", 1).build(),
        ];
        let config = EngineConfig { grouping_mode: GroupingMode::SkillTier, ..EngineConfig::default() };
        let formation = form_teams(records, &learn, &config).unwrap();
        let ids: Vec<Vec<String>> = formation.rosters().into_iter().map(|roster| roster.member_ids).collect();
        assert_eq!(ids, vec![vec!["hi1", "hi2"], vec!["mid1", "mid2"], vec!["lo1", "lo2"]]);
    }

    #[test]
    fn test_duplicate_id_rejects_run() {
        let records = vec![participant("a").build(), participant("a").build()];
        let result = form_teams(records, &learn, &EngineConfig::default());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_verify_partition_catches_missing_member() {
        let pool = Pool::create(vec![participant("a").build(), participant("b").build()]).unwrap();
        let teams = vec![Team::new(vec![0], FormationMethod::Matched)];
        assert!(matches!(verify_partition(&pool, &teams, 4), Err(Error::Partition(_))));
    }
}
