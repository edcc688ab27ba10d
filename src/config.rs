use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::condition::Weights;

pub const DEFAULT_MAX_TEAM_SIZE: usize = 4;

/// What to do with a mutual-friend component larger than the team size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FriendOverflowPolicy {
    /// Cut the component into connected sub-teams.
    Split,
    /// Return every member to the general pool.
    #[default]
    Dissolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingMode {
    #[default]
    General,
    Language,
    SkillTier,
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Language => write!(f, "language"),
            Self::SkillTier => write!(f, "skill-tier"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    pub max_team_size: usize,
    pub weights: Weights,
    pub friend_overflow_policy: FriendOverflowPolicy,
    pub grouping_mode: GroupingMode,
    /// Abort the run on the first classifier failure instead of treating
    /// the intent as unknown.
    pub classifier_fail_fast: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_team_size: DEFAULT_MAX_TEAM_SIZE,
            weights: Weights::default(),
            friend_overflow_policy: FriendOverflowPolicy::default(),
            grouping_mode: GroupingMode::default(),
            classifier_fail_fast: false,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<EngineConfig, ConfigError> {
        let config: EngineConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<EngineConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_team_size == 0 {
            return Err(ConfigError::InvalidTeamSize);
        }
        self.weights.validate()
    }
}
