use std::collections::VecDeque;

use tracing::debug;

use crate::cache::GroupCache;
use crate::model::entity::Index;
use crate::model::group::{FormationMethod, Team};
use crate::pool::Pool;
use crate::score::CompatibilityScorer;

/// Greedy nearest-neighbour team growth.
///
/// The oldest unassigned participant seeds a team, which then repeatedly takes
/// the eligible candidate with the best mean score against its members. A team
/// that finds no eligible candidate with a positive mean is sealed under size.
/// Sealed teams are never revisited.
pub struct TeamAssembler<'a> {
    pool: &'a Pool,
    scorer: &'a CompatibilityScorer,
    max_team_size: usize,
}

impl<'a> TeamAssembler<'a> {
    pub fn new(pool: &'a Pool, scorer: &'a CompatibilityScorer, max_team_size: usize) -> TeamAssembler<'a> {
        TeamAssembler { pool, scorer, max_team_size: max_team_size.max(1) }
    }

    /// Partitions `participants` into `matched` teams. Their order decides
    /// seeding and breaks score ties.
    pub fn assemble(&self, participants: &[Index]) -> Vec<Team> {
        let mut unassigned: VecDeque<Index> = participants.iter().copied().collect();
        let mut teams = Vec::new();

        while let Some(seed) = unassigned.pop_front() {
            let mut cache = GroupCache::create(vec![seed], unassigned.drain(..), self.pool, self.scorer);
            while cache.len() < self.max_team_size && cache.has_candidates() {
                let Some((next, mean)) = cache.best() else {
                    break;
                };
                debug!(candidate = next, mean, "candidate joins team");
                cache.add(next, self.pool, self.scorer);
            }
            let (members, remaining) = cache.seal();
            debug!(size = members.len(), seed, "sealed matched team");
            unassigned.extend(remaining);
            teams.push(Team::new(members, FormationMethod::Matched));
        }
        teams
    }
}
