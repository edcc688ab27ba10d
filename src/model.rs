pub mod entity {
    use std::collections::{BTreeMap, BTreeSet};
    use std::fmt;

    use serde::{Deserialize, Serialize};

    pub type Id = String;
    /// Position of a participant in the run's input order.
    pub type Index = usize;
    pub type Tag = String;
    pub type SkillLevel = u8;

    pub const MAX_SKILL_LEVEL: SkillLevel = 10;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum YearOfStudy {
        #[serde(rename = "1st year")]
        First,
        #[serde(rename = "2nd year")]
        Second,
        #[serde(rename = "3rd year")]
        Third,
        #[serde(rename = "4th year")]
        Fourth,
        Masters,
        PhD,
    }

    impl YearOfStudy {
        pub fn rank(&self) -> u8 {
            match self {
                Self::First => 1,
                Self::Second => 2,
                Self::Third => 3,
                Self::Fourth => 4,
                Self::Masters => 5,
                Self::PhD => 6,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum ExperienceLevel {
        Beginner,
        Intermediate,
        Advanced,
    }

    impl ExperienceLevel {
        pub fn rank(&self) -> u8 {
            match self {
                Self::Beginner => 1,
                Self::Intermediate => 2,
                Self::Advanced => 3,
            }
        }
    }

    impl fmt::Display for ExperienceLevel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Beginner => write!(f, "Beginner"),
                Self::Intermediate => write!(f, "Intermediate"),
                Self::Advanced => write!(f, "Advanced"),
            }
        }
    }

    /// Preferred team role. "Don't know" and "Don't care" both collapse into
    /// `Neutral`, which complements any role halfway.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum PreferredRole {
        Analysis,
        Visualization,
        Development,
        Design,
        #[serde(rename = "Don't know", alias = "Don't care")]
        Neutral,
    }

    impl PreferredRole {
        pub fn is_neutral(&self) -> bool {
            matches!(self, Self::Neutral)
        }
    }

    impl fmt::Display for PreferredRole {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Analysis => write!(f, "Analysis"),
                Self::Visualization => write!(f, "Visualization"),
                Self::Development => write!(f, "Development"),
                Self::Design => write!(f, "Design"),
                Self::Neutral => write!(f, "Neutral"),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Intent {
        Socialize,
        Learn,
        Enjoy,
        Win,
    }

    impl Intent {
        pub const ALL: [Intent; 4] = [Self::Socialize, Self::Learn, Self::Enjoy, Self::Win];
    }

    impl fmt::Display for Intent {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Socialize => write!(f, "socialize"),
                Self::Learn => write!(f, "learn"),
                Self::Enjoy => write!(f, "enjoy"),
                Self::Win => write!(f, "win"),
            }
        }
    }

    /// One registered participant. Every field is required; records are never
    /// patched with defaults.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ParticipantRecord {
        pub id: Id,
        pub name: String,
        pub year_of_study: YearOfStudy,
        pub programming_skills: BTreeMap<Tag, SkillLevel>,
        pub experience_level: ExperienceLevel,
        pub hackathons_done: u32,
        pub interests: BTreeSet<Tag>,
        pub preferred_role: PreferredRole,
        pub objective: String,
        pub interest_in_challenges: BTreeSet<Tag>,
        pub preferred_languages: BTreeSet<Tag>,
        pub friend_registration: BTreeSet<Id>,
        pub preferred_team_size: u32,
        pub availability: BTreeMap<Tag, bool>,
    }

    impl ParticipantRecord {
        /// Mean of all skill levels, 0 when no skills are listed.
        pub fn average_skill(&self) -> f64 {
            if self.programming_skills.is_empty() {
                return 0.0;
            }
            let total: f64 = self.programming_skills.values().map(|level| f64::from(*level)).sum();
            total / self.programming_skills.len() as f64
        }

        pub fn requests(&self, other: &Id) -> bool {
            self.friend_registration.contains(other)
        }
    }
}


pub mod group {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    use super::entity::{Id, Index};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum FormationMethod {
        FriendGroup,
        Matched,
        LanguageCluster,
    }

    impl fmt::Display for FormationMethod {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::FriendGroup => write!(f, "friend-group"),
                Self::Matched => write!(f, "matched"),
                Self::LanguageCluster => write!(f, "language-cluster"),
            }
        }
    }

    /// A sealed team. Members are pool indices in the order they joined.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Team {
        pub members: Vec<Index>,
        pub method: FormationMethod,
    }

    impl Team {
        pub fn new(members: Vec<Index>, method: FormationMethod) -> Team {
            Team { members, method }
        }

        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }
    }

    /// Output view of a team: ids and names instead of pool indices.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TeamRoster {
        pub method: FormationMethod,
        pub member_ids: Vec<Id>,
        pub member_names: Vec<String>,
    }
}

pub mod condition {
    use serde::{Deserialize, Serialize};

    use crate::error::ConfigError;

    pub type Score = f64;

    /// Relative factor weights. They are renormalised to sum to 1.0 before
    /// scoring, so only their proportions matter.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "kebab-case")]
    pub struct Weights {
        pub objective: f64,
        pub role: f64,
        pub experience: f64,
        pub language: f64,
        pub skills: f64,
        pub hackathons: f64,
        pub study_year: f64,
        pub challenges: f64,
        pub availability: f64,
        pub team_size: f64,
        pub friend: f64,
    }

    impl Default for Weights {
        fn default() -> Self {
            Weights {
                objective: 0.20,
                role: 0.14,
                experience: 0.12,
                language: 0.10,
                skills: 0.10,
                hackathons: 0.08,
                study_year: 0.05,
                challenges: 0.03,
                availability: 0.02,
                team_size: 0.01,
                friend: 0.0,
            }
        }
    }

    impl Weights {
        fn named(&self) -> [(&'static str, f64); 11] {
            [
                ("objective", self.objective),
                ("role", self.role),
                ("experience", self.experience),
                ("language", self.language),
                ("skills", self.skills),
                ("hackathons", self.hackathons),
                ("study-year", self.study_year),
                ("challenges", self.challenges),
                ("availability", self.availability),
                ("team-size", self.team_size),
                ("friend", self.friend),
            ]
        }

        pub fn total(&self) -> f64 {
            self.named().iter().map(|(_, weight)| weight).sum()
        }

        pub fn validate(&self) -> Result<(), ConfigError> {
            for (factor, weight) in self.named() {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ConfigError::InvalidWeight { factor, weight });
                }
            }
            let total = self.total();
            if !total.is_finite() {
                return Err(ConfigError::WeightOverflow);
            }
            if total <= 0.0 {
                return Err(ConfigError::ZeroWeights);
            }
            Ok(())
        }

        /// Same proportions, scaled so the eleven weights sum to 1.0.
        pub fn normalized(&self) -> Result<Weights, ConfigError> {
            self.validate()?;
            let total = self.total();
            Ok(Weights {
                objective: self.objective / total,
                role: self.role / total,
                experience: self.experience / total,
                language: self.language / total,
                skills: self.skills / total,
                hackathons: self.hackathons / total,
                study_year: self.study_year / total,
                challenges: self.challenges / total,
                availability: self.availability / total,
                team_size: self.team_size / total,
                friend: self.friend / total,
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_default_weights_renormalize_to_one() {
            let weights = Weights::default();
            assert!((weights.total() - 0.85).abs() < 1e-9);
            let normalized = weights.normalized().unwrap();
            assert!((normalized.total() - 1.0).abs() < 1e-9);
            assert!((normalized.objective - 0.20 / 0.85).abs() < 1e-9);
            assert_eq!(normalized.friend, 0.0);
        }

        #[test]
        fn test_negative_weight_rejected() {
            let weights = Weights { role: -0.1, ..Weights::default() };
            assert!(matches!(
                weights.validate(),
                Err(ConfigError::InvalidWeight { factor: "role", .. })
            ));
        }

        #[test]
        fn test_overflowing_total_rejected() {
            let weights = Weights { objective: f64::MAX, role: f64::MAX, ..Weights::default() };
            assert!(matches!(weights.validate(), Err(ConfigError::WeightOverflow)));
            assert!(weights.normalized().is_err());
        }

        #[test]
        fn test_all_zero_weights_rejected() {
            let weights = Weights {
                objective: 0.0,
                role: 0.0,
                experience: 0.0,
                language: 0.0,
                skills: 0.0,
                hackathons: 0.0,
                study_year: 0.0,
                challenges: 0.0,
                availability: 0.0,
                team_size: 0.0,
                friend: 0.0,
            };
            assert!(matches!(weights.normalized(), Err(ConfigError::ZeroWeights)));
        }
    }
}
