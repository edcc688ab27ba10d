pub mod assemble;
pub mod cache;
pub mod cluster;
pub mod config;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod friends;
pub mod ingest;
pub mod intent;
pub mod model;
pub mod pool;
pub mod report;
pub mod score;

pub use config::{EngineConfig, FriendOverflowPolicy, GroupingMode};
pub use engine::{form_teams, Formation};
pub use error::{Error, Result};
pub use intent::{IntentClassifier, KeywordClassifier};
pub use model::entity::{Id, Intent, ParticipantRecord};
pub use model::group::{FormationMethod, Team, TeamRoster};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{BTreeMap, BTreeSet};

    use crate::model::entity::{ExperienceLevel, ParticipantRecord, PreferredRole, SkillLevel, YearOfStudy};

    pub struct ParticipantBuilder(ParticipantRecord);

    /// A first-year beginner who speaks English and has no other preferences.
    pub fn participant(id: &str) -> ParticipantBuilder {
        ParticipantBuilder(ParticipantRecord {
            id: id.to_string(),
            name: id.to_string(),
            year_of_study: YearOfStudy::First,
            programming_skills: BTreeMap::new(),
            experience_level: ExperienceLevel::Beginner,
            hackathons_done: 0,
            interests: BTreeSet::new(),
            preferred_role: PreferredRole::Neutral,
            objective: String::new(),
            interest_in_challenges: BTreeSet::new(),
            preferred_languages: BTreeSet::from(["English".to_string()]),
            friend_registration: BTreeSet::new(),
            preferred_team_size: 4,
            availability: BTreeMap::new(),
        })
    }

    impl ParticipantBuilder {
        pub fn name(mut self, name: &str) -> Self {
            self.0.name = name.to_string();
            self
        }
        pub fn year(mut self, year: YearOfStudy) -> Self {
            self.0.year_of_study = year;
            self
        }
        pub fn skill(mut self, skill: &str, level: SkillLevel) -> Self {
            self.0.programming_skills.insert(skill.to_string(), level);
            self
        }
        pub fn experience(mut self, level: ExperienceLevel) -> Self {
            self.0.experience_level = level;
            self
        }
        pub fn hackathons(mut self, count: u32) -> Self {
            self.0.hackathons_done = count;
            self
        }
        pub fn role(mut self, role: PreferredRole) -> Self {
            self.0.preferred_role = role;
            self
        }
        pub fn objective(mut self, text: &str) -> Self {
            self.0.objective = text.to_string();
            self
        }
        pub fn challenge(mut self, challenge: &str) -> Self {
            self.0.interest_in_challenges.insert(challenge.to_string());
            self
        }
        pub fn languages(mut self, languages: &[&str]) -> Self {
            self.0.preferred_languages = languages.iter().map(|language| language.to_string()).collect();
            self
        }
        pub fn friend(mut self, id: &str) -> Self {
            self.0.friend_registration.insert(id.to_string());
            self
        }
        pub fn team_size(mut self, size: u32) -> Self {
            self.0.preferred_team_size = size;
            self
        }
        pub fn slot(mut self, slot: &str, available: bool) -> Self {
            self.0.availability.insert(slot.to_string(), available);
            self
        }
        pub fn build(self) -> ParticipantRecord {
            self.0
        }
    }
}
