use std::collections::HashMap;
use std::ops::Range;

use crate::error::ValidationError;
use crate::model::entity::{Id, Index, Intent, ParticipantRecord, MAX_SKILL_LEVEL};
use crate::model::group::{Team, TeamRoster};

/// The participants of one run, addressable by input position or by id.
///
/// Every component takes the pool explicitly; nothing looks participants up
/// through shared state.
#[derive(Debug, Clone)]
pub struct Pool {
    records: Vec<ParticipantRecord>,
    by_id: HashMap<Id, Index>,
    intents: Vec<Option<Intent>>,
}

impl Pool {
    /// Validates ids and skill levels. Intents start out unknown.
    pub fn create(records: Vec<ParticipantRecord>) -> Result<Pool, ValidationError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(ValidationError::MalformedRecord {
                    id: format!("#{index}"),
                    reason: "empty id".to_string(),
                });
            }
            if let Some((skill, level)) =
                record.programming_skills.iter().find(|(_, level)| **level > MAX_SKILL_LEVEL)
            {
                return Err(ValidationError::InvalidSkillLevel {
                    id: record.id.clone(),
                    skill: skill.clone(),
                    level: *level,
                });
            }
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(ValidationError::DuplicateId(record.id.clone()));
            }
        }
        let intents = vec![None; records.len()];
        Ok(Pool { records, by_id, intents })
    }

    /// Attaches resolved intents, one per record in input order.
    pub fn with_intents(mut self, intents: Vec<Option<Intent>>) -> Pool {
        debug_assert_eq!(intents.len(), self.records.len());
        self.intents = intents;
        self.intents.resize(self.records.len(), None);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: Index) -> Option<&ParticipantRecord> {
        self.records.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn intent(&self, index: Index) -> Option<Intent> {
        self.intents.get(index).copied().flatten()
    }

    pub fn records(&self) -> &[ParticipantRecord] {
        &self.records
    }

    pub fn indices(&self) -> Range<Index> {
        0..self.records.len()
    }

    pub fn roster(&self, team: &Team) -> TeamRoster {
        let members: Vec<&ParticipantRecord> =
            team.members.iter().filter_map(|index| self.get(*index)).collect();
        TeamRoster {
            method: team.method,
            member_ids: members.iter().map(|record| record.id.clone()).collect(),
            member_names: members.iter().map(|record| record.name.clone()).collect(),
        }
    }
}
