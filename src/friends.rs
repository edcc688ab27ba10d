//! Pre-formed teams from reciprocated teammate requests.
//!
//! Only mutual requests create edges; a one-sided request never pulls anyone
//! into a group. Each connected component of the mutual graph that fits in a
//! team is sealed as a `friend-group`. Oversized components are dissolved or
//! split according to [`FriendOverflowPolicy`].

use std::collections::{HashMap, HashSet};

use petgraph::unionfind::UnionFind;
use tracing::{debug, warn};

use crate::config::FriendOverflowPolicy;
use crate::model::entity::Index;
use crate::model::group::{FormationMethod, Team};
use crate::pool::Pool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendGroups {
    pub teams: Vec<Team>,
    /// Participants left for general matching, in input order.
    pub remaining: Vec<Index>,
}

pub struct FriendGroupExtractor {
    max_team_size: usize,
    policy: FriendOverflowPolicy,
}

impl FriendGroupExtractor {
    pub fn new(max_team_size: usize, policy: FriendOverflowPolicy) -> FriendGroupExtractor {
        FriendGroupExtractor { max_team_size: max_team_size.max(1), policy }
    }

    /// Reciprocated pairs `(a, b)` with `a < b`, ordered by `a` then request order.
    pub fn mutual_edges(pool: &Pool) -> Vec<(Index, Index)> {
        let mut edges = Vec::new();
        for (a, record) in pool.records().iter().enumerate() {
            for friend in &record.friend_registration {
                if *friend == record.id {
                    continue;
                }
                let Some(b) = pool.index_of(friend) else {
                    warn!(id = %record.id, friend = %friend, "friend request names an unknown participant");
                    continue;
                };
                let reciprocated = pool.get(b).map_or(false, |other| other.requests(&record.id));
                if a < b && reciprocated {
                    edges.push((a, b));
                }
            }
        }
        edges
    }

    /// Connected components with at least two members, each sorted by input
    /// order, components ordered by their first member.
    pub fn components(pool: &Pool, edges: &[(Index, Index)]) -> Vec<Vec<Index>> {
        let mut union = UnionFind::<Index>::new(pool.len());
        for (a, b) in edges {
            union.union(*a, *b);
        }
        let mut slots: HashMap<Index, usize> = HashMap::new();
        let mut components: Vec<Vec<Index>> = Vec::new();
        for index in pool.indices() {
            let root = union.find(index);
            let slot = *slots.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            if let Some(component) = components.get_mut(slot) {
                component.push(index);
            }
        }
        components.retain(|component| component.len() > 1);
        components
    }

    pub fn extract(&self, pool: &Pool) -> FriendGroups {
        let edges = Self::mutual_edges(pool);
        let mut teams = Vec::new();
        for component in Self::components(pool, &edges) {
            if component.len() <= self.max_team_size {
                debug!(size = component.len(), "sealed friend group");
                teams.push(Team::new(component, FormationMethod::FriendGroup));
                continue;
            }
            match self.policy {
                FriendOverflowPolicy::Dissolve => {
                    warn!(
                        size = component.len(),
                        max = self.max_team_size,
                        "friend group too large, dissolved into general pool"
                    );
                }
                FriendOverflowPolicy::Split => {
                    let parts = self.split(&component, &edges);
                    debug!(size = component.len(), parts = parts.len(), "split oversized friend group");
                    teams.extend(parts.into_iter().map(|part| Team::new(part, FormationMethod::FriendGroup)));
                }
            }
        }

        let grouped: HashSet<Index> = teams.iter().flat_map(|team| team.members.iter().copied()).collect();
        let remaining = pool.indices().filter(|index| !grouped.contains(index)).collect();
        FriendGroups { teams, remaining }
    }

    /// Cuts a component into connected sub-teams of at most `max_team_size`.
    ///
    /// Each sub-team is seeded by the earliest unplaced member and grows by the
    /// unplaced member with the most mutual edges into it. Sub-teams that end up
    /// alone are dropped; their member goes back to the general pool.
    fn split(&self, component: &[Index], edges: &[(Index, Index)]) -> Vec<Vec<Index>> {
        let members: HashSet<Index> = component.iter().copied().collect();
        let mut adjacency: HashMap<Index, HashSet<Index>> = HashMap::new();
        for (a, b) in edges.iter().filter(|(a, b)| members.contains(a) && members.contains(b)) {
            adjacency.entry(*a).or_default().insert(*b);
            adjacency.entry(*b).or_default().insert(*a);
        }
        let links = |candidate: Index, team: &[Index]| -> usize {
            adjacency
                .get(&candidate)
                .map_or(0, |neighbours| team.iter().filter(|member| neighbours.contains(member)).count())
        };

        let mut unplaced: Vec<Index> = component.to_vec();
        let mut parts = Vec::new();
        while !unplaced.is_empty() {
            let seed = unplaced.remove(0);
            let mut part = vec![seed];
            while part.len() < self.max_team_size {
                let mut best: Option<(usize, usize)> = None;
                for (position, candidate) in unplaced.iter().enumerate() {
                    let count = links(*candidate, &part);
                    if count > 0 && best.map_or(true, |(_, top)| count > top) {
                        best = Some((position, count));
                    }
                }
                let Some((position, _)) = best else {
                    break;
                };
                part.push(unplaced.remove(position));
            }
            if part.len() > 1 {
                part.sort_unstable();
                parts.push(part);
            }
        }
        parts
    }
}
