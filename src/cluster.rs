use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use crate::model::entity::{Index, Tag};
use crate::pool::Pool;

/// Groups participants so that every pair inside a group shares a language.
///
/// Participants with the same language set are bucketed in order of first
/// appearance and cut into `max_team_size` chunks. Each chunk joins the first
/// earlier group it can without breaking the clique or the size bound, else it
/// opens a new group. Participants without any language are dealt afterwards,
/// one at a time, into the smallest group that still has room.
pub struct LanguageClusterer {
    max_team_size: usize,
}

impl LanguageClusterer {
    pub fn new(max_team_size: usize) -> LanguageClusterer {
        LanguageClusterer { max_team_size: max_team_size.max(1) }
    }

    pub fn cluster(&self, pool: &Pool, participants: &[Index]) -> Vec<Vec<Index>> {
        let languages = |index: &Index| -> BTreeSet<Tag> {
            pool.get(*index)
                .map(|record| record.preferred_languages.clone())
                .unwrap_or_default()
        };

        let mut buckets: Vec<(BTreeSet<Tag>, Vec<Index>)> = Vec::new();
        let mut speechless = Vec::new();
        for index in participants {
            let set = languages(index);
            if set.is_empty() {
                speechless.push(*index);
                continue;
            }
            match buckets.iter_mut().find(|(key, _)| *key == set) {
                Some((_, members)) => members.push(*index),
                None => buckets.push((set, vec![*index])),
            }
        }

        let mut groups: Vec<Vec<Index>> = Vec::new();
        for (set, members) in &buckets {
            for chunk in members.chunks(self.max_team_size) {
                let host = groups.iter_mut().find(|group| {
                    group.len() + chunk.len() <= self.max_team_size
                        && group.iter().all(|member| !languages(member).is_disjoint(set))
                });
                match host {
                    Some(group) => group.extend_from_slice(chunk),
                    None => groups.push(chunk.to_vec()),
                }
            }
        }

        for index in speechless {
            let mut smallest: Option<usize> = None;
            for (position, group) in groups.iter().enumerate() {
                let fits = group.len() < self.max_team_size;
                let smaller = smallest
                    .and_then(|best| groups.get(best))
                    .map_or(true, |best| group.len() < best.len());
                if fits && smaller {
                    smallest = Some(position);
                }
            }
            match smallest.and_then(|position| groups.get_mut(position)) {
                Some(group) => group.push(index),
                None => groups.push(vec![index]),
            }
        }
        groups
    }
}

/// Participants banded by average skill, each band in descending skill order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTiers {
    pub high: Vec<Index>,
    pub mid: Vec<Index>,
    pub low: Vec<Index>,
}

impl SkillTiers {
    pub fn iter(&self) -> impl Iterator<Item = &Vec<Index>> {
        [&self.high, &self.mid, &self.low].into_iter()
    }
}

pub struct SkillTierPartitioner;

impl SkillTierPartitioner {
    /// Sorts by average skill, highest first (stable on ties), then cuts
    /// three contiguous tiers of `n / 3`; the remainder lands in the low tier.
    pub fn partition(pool: &Pool, participants: &[Index]) -> SkillTiers {
        let average = |index: &Index| pool.get(*index).map_or(0.0, |record| record.average_skill());
        let sorted: Vec<Index> = participants
            .iter()
            .copied()
            .sorted_by(|a, b| average(b).total_cmp(&average(a)))
            .collect();

        let tier = sorted.len() / 3;
        let mut rest = sorted.into_iter();
        let high = rest.by_ref().take(tier).collect();
        let mid = rest.by_ref().take(tier).collect();
        let low = rest.collect();
        SkillTiers { high, mid, low }
    }
}
