use std::path::PathBuf;

use thiserror::Error;

use crate::model::entity::{Id, SkillLevel, Tag};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: Id, reason: String },
    #[error("duplicate participant id {0}")]
    DuplicateId(Id),
    #[error("record {id}: skill {skill} has level {level}, expected 0..=10")]
    InvalidSkillLevel { id: Id, skill: Tag, level: SkillLevel },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max team size must be at least 1")]
    InvalidTeamSize,
    #[error("weight for {factor} must be finite and non-negative, got {weight}")]
    InvalidWeight { factor: &'static str, weight: f64 },
    #[error("factor weights sum to a non-finite total")]
    WeightOverflow,
    #[error("at least one factor weight must be positive")]
    ZeroWeights,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("intent classifier unavailable: {0}")]
    Unavailable(String),
    #[error("no intent recognised in objective {0:?}")]
    Unrecognized(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid participant JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("participant file must contain a JSON array of records")]
    NotAnArray,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("classification failed for {id}: {source}")]
    Classifier {
        id: Id,
        #[source]
        source: ClassifierError,
    },
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("partition invariant violated: {0}")]
    Partition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
