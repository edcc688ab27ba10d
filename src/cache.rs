use crate::model::condition::Score;
use crate::model::entity::Index;
use crate::pool::Pool;
use crate::score::CompatibilityScorer;

/// An unassigned participant with its score summed against the current
/// members of the growing team.
#[derive(Debug, Clone)]
struct CachedCandidate {
    pub index: Index,
    pub score: Score,
    pub eligible: bool,
}

impl CachedCandidate {
    fn from_members(index: Index, members: &[Index], pool: &Pool, scorer: &CompatibilityScorer) -> CachedCandidate {
        let score = members.iter().map(|member| scorer.score(pool, *member, index)).sum();
        let eligible = scorer.checker().is_eligible_with_all(pool, members, index);
        CachedCandidate { index, score, eligible }
    }

    /// Folds in a member that just joined; `members` already includes it.
    fn absorb(&mut self, members: &[Index], pool: &Pool, scorer: &CompatibilityScorer) {
        let Some(member) = members.last() else {
            return;
        };
        self.score += scorer.score(pool, *member, self.index);
        self.eligible = self.eligible && scorer.checker().is_eligible_with_all(pool, members, self.index);
    }
}

/// A team under construction plus every candidate that could still join it.
///
/// Joining broadcasts the new member's pairwise scores to the remaining
/// candidates, so picking the next member never rescans the whole team.
pub struct GroupCache {
    members: Vec<Index>,
    candidates: Vec<CachedCandidate>,
}

impl GroupCache {
    pub fn create<I>(members: Vec<Index>, candidates: I, pool: &Pool, scorer: &CompatibilityScorer) -> GroupCache
    where
        I: IntoIterator<Item = Index>,
    {
        let candidates = candidates
            .into_iter()
            .map(|index| CachedCandidate::from_members(index, &members, pool, scorer))
            .collect();
        GroupCache { members, candidates }
    }

    pub fn members(&self) -> &[Index] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// The eligible candidate with the strictly highest positive mean score.
    /// Ties go to the candidate seen first in input order.
    pub fn best(&self) -> Option<(Index, Score)> {
        if self.members.is_empty() {
            return None;
        }
        let size = self.members.len() as f64;
        let mut best: Option<(Index, Score)> = None;
        for candidate in self.candidates.iter().filter(|candidate| candidate.eligible) {
            let mean = candidate.score / size;
            if mean > 0.0 && best.map_or(true, |(_, top)| mean > top) {
                best = Some((candidate.index, mean));
            }
        }
        best
    }

    /// Moves a candidate into the team. Returns false if it is not a candidate.
    pub fn add(&mut self, index: Index, pool: &Pool, scorer: &CompatibilityScorer) -> bool {
        let Some(position) = self.candidates.iter().position(|candidate| candidate.index == index) else {
            return false;
        };
        self.candidates.remove(position);
        self.members.push(index);
        self.broadcast_adding(pool, scorer);
        true
    }

    fn broadcast_adding(&mut self, pool: &Pool, scorer: &CompatibilityScorer) {
        let members = &self.members;
        self.candidates
            .iter_mut()
            .for_each(|candidate| candidate.absorb(members, pool, scorer));
    }

    /// Splits into the sealed members and the untouched candidates, the
    /// latter still in input order.
    pub fn seal(self) -> (Vec<Index>, Vec<Index>) {
        let remaining = self.candidates.into_iter().map(|candidate| candidate.index).collect();
        (self.members, remaining)
    }
}
