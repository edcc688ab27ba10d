use std::path::Path;

use serde_json::Value;

use crate::error::{Error, IngestError, Result, ValidationError};
use crate::model::entity::ParticipantRecord;

pub fn load_participants(path: &Path) -> Result<Vec<ParticipantRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_participants(&content)
}

pub fn parse_participants(content: &str) -> Result<Vec<ParticipantRecord>> {
    let document: Value = serde_json::from_str(content).map_err(IngestError::from)?;
    let Value::Array(items) = document else {
        return Err(IngestError::NotAnArray.into());
    };
    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| decode_record(position, item))
        .collect()
}

fn decode_record(position: usize, item: Value) -> Result<ParticipantRecord> {
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{position}"));
    serde_json::from_value(item).map_err(|error| {
        Error::Validation(ValidationError::MalformedRecord { id, reason: error.to_string() })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::{ExperienceLevel, PreferredRole, YearOfStudy};
    use serde_json::json;

    fn record(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Nora Puig",
            "year_of_study": "Masters",
            "programming_skills": { "Python": 8, "SQL": 5 },
            "experience_level": "Intermediate",
            "hackathons_done": 3,
            "interests": ["Robotics"],
            "preferred_role": "Don't care",
            "objective": "I want to win",
            "interest_in_challenges": ["Restb.ai"],
            "preferred_languages": ["Catalan", "English"],
            "friend_registration": ["a6d4ab3c-0a34-4e1c-b1a3-2f1dd8a8f0b1"],
            "preferred_team_size": 4,
            "availability": { "Saturday morning": true, "Sunday night": false }
        })
    }

    #[test]
    fn test_parses_full_record() {
        let content = Value::Array(vec![record("p1")]).to_string();
        let records = parse_participants(&content).unwrap();
        let nora = &records[0];
        assert_eq!(nora.year_of_study, YearOfStudy::Masters);
        assert_eq!(nora.experience_level, ExperienceLevel::Intermediate);
        assert_eq!(nora.preferred_role, PreferredRole::Neutral);
        assert_eq!(nora.programming_skills.get("Python"), Some(&8));
        assert_eq!(nora.availability.len(), 2);
    }

    #[test]
    fn test_missing_field_names_record() {
        let mut broken = record("p2");
        broken.as_object_mut().unwrap().remove("experience_level");
        let content = Value::Array(vec![record("p1"), broken]).to_string();
        let error = parse_participants(&content).unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(ValidationError::MalformedRecord { ref id, .. }) if id == "p2"
        ));
    }

    #[test]
    fn test_mistyped_field_rejected() {
        let mut broken = record("p1");
        broken["hackathons_done"] = json!("many");
        let content = Value::Array(vec![broken]).to_string();
        assert!(parse_participants(&content).is_err());
    }

    #[test]
    fn test_record_without_id_named_by_position() {
        let mut broken = record("p1");
        broken.as_object_mut().unwrap().remove("id");
        let content = Value::Array(vec![broken]).to_string();
        let error = parse_participants(&content).unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(ValidationError::MalformedRecord { ref id, .. }) if id == "#0"
        ));
    }

    #[test]
    fn test_non_array_rejected() {
        assert!(matches!(
            parse_participants("{}"),
            Err(Error::Ingest(IngestError::NotAnArray))
        ));
    }

    #[test]
    fn test_empty_array_is_fine() {
        assert!(parse_participants("[]").unwrap().is_empty());
    }
}
