use crate::model::entity::{Index, ParticipantRecord};
use crate::pool::Pool;

/// Hard eligibility between participants. A failed check zeroes compatibility
/// no matter how well the soft factors line up.
///
/// Team-size preference is deliberately not checked here; it is a soft factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintChecker;

impl ConstraintChecker {
    /// Symmetric: at least one preferred language in common.
    pub fn is_eligible(&self, a: &ParticipantRecord, b: &ParticipantRecord) -> bool {
        !a.preferred_languages.is_disjoint(&b.preferred_languages)
    }

    /// A candidate may join a team only if it is eligible with every member.
    pub fn is_eligible_with_all(&self, pool: &Pool, members: &[Index], candidate: Index) -> bool {
        let Some(candidate) = pool.get(candidate) else {
            return false;
        };
        members
            .iter()
            .filter_map(|member| pool.get(*member))
            .all(|member| self.is_eligible(member, candidate))
    }
}
