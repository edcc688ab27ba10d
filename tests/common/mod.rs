#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use team_formation::error::ClassifierError;
use team_formation::model::entity::{ExperienceLevel, Intent, ParticipantRecord, PreferredRole, YearOfStudy};

const LANGUAGES: [&str; 4] = ["English", "Catalan", "Spanish", "French"];
const SKILLS: [&str; 5] = ["Python", "Rust", "SQL", "React", "TensorFlow"];
const CHALLENGES: [&str; 3] = ["vision", "nlp", "fintech"];
const SLOTS: [&str; 4] = ["sat-am", "sat-pm", "sun-am", "sun-pm"];
const YEARS: [YearOfStudy; 6] = [
    YearOfStudy::First,
    YearOfStudy::Second,
    YearOfStudy::Third,
    YearOfStudy::Fourth,
    YearOfStudy::Masters,
    YearOfStudy::PhD,
];
const LEVELS: [ExperienceLevel; 3] =
    [ExperienceLevel::Beginner, ExperienceLevel::Intermediate, ExperienceLevel::Advanced];
const ROLES: [PreferredRole; 5] = [
    PreferredRole::Analysis,
    PreferredRole::Visualization,
    PreferredRole::Development,
    PreferredRole::Design,
    PreferredRole::Neutral,
];
const OBJECTIVES: [&str; 5] = [
    "meet new people",
    "learn new skills",
    "have fun",
    "win the prize",
    "no idea",
];

pub fn basic(id: &str, languages: &[&str]) -> ParticipantRecord {
    ParticipantRecord {
        id: id.to_string(),
        name: id.to_uppercase(),
        year_of_study: YearOfStudy::Second,
        programming_skills: BTreeMap::new(),
        experience_level: ExperienceLevel::Intermediate,
        hackathons_done: 1,
        interests: BTreeSet::new(),
        preferred_role: PreferredRole::Neutral,
        objective: "learn new skills".to_string(),
        interest_in_challenges: BTreeSet::new(),
        preferred_languages: languages.iter().map(|l| l.to_string()).collect(),
        friend_registration: BTreeSet::new(),
        preferred_team_size: 4,
        availability: BTreeMap::new(),
    }
}

fn pick<'a, T>(rng: &mut SmallRng, items: &'a [T]) -> &'a T {
    items.choose(rng).unwrap()
}

fn subset(rng: &mut SmallRng, items: &[&str], p: f64) -> BTreeSet<String> {
    items.iter().filter(|_| rng.gen_bool(p)).map(|s| s.to_string()).collect()
}

fn skills(rng: &mut SmallRng) -> BTreeMap<String, u8> {
    let mut skills = BTreeMap::new();
    for skill in SKILLS {
        if rng.gen_bool(0.4) {
            skills.insert(skill.to_string(), rng.gen_range(0..=10));
        }
    }
    skills
}

/// Random but reproducible pool; roughly one in five participants requests a
/// random teammate, and some requests are returned.
pub fn random_pool(seed: u64, size: usize) -> Vec<ParticipantRecord> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut records: Vec<ParticipantRecord> = (0..size)
        .map(|i| ParticipantRecord {
            id: format!("p{i}"),
            name: format!("Participant {i}"),
            year_of_study: *pick(&mut rng, &YEARS),
            programming_skills: skills(&mut rng),
            experience_level: *pick(&mut rng, &LEVELS),
            hackathons_done: rng.gen_range(0..15),
            interests: BTreeSet::new(),
            preferred_role: *pick(&mut rng, &ROLES),
            objective: pick(&mut rng, &OBJECTIVES).to_string(),
            interest_in_challenges: subset(&mut rng, &CHALLENGES, 0.5),
            preferred_languages: subset(&mut rng, &LANGUAGES, 0.4),
            friend_registration: BTreeSet::new(),
            preferred_team_size: rng.gen_range(2..=4),
            availability: SLOTS.iter().map(|slot| (slot.to_string(), rng.gen_bool(0.6))).collect(),
        })
        .collect();

    for i in 0..size {
        if size > 1 && rng.gen_bool(0.2) {
            let j = rng.gen_range(0..size);
            let target = format!("p{j}");
            records[i].friend_registration.insert(target);
            if rng.gen_bool(0.5) {
                let source = format!("p{i}");
                records[j].friend_registration.insert(source);
            }
        }
    }
    records
}

/// Deterministic stand-in for a real classification backend.
pub fn stub_classifier(text: &str) -> Result<Intent, ClassifierError> {
    match text {
        "meet new people" => Ok(Intent::Socialize),
        "learn new skills" => Ok(Intent::Learn),
        "have fun" => Ok(Intent::Enjoy),
        "win the prize" => Ok(Intent::Win),
        other => Err(ClassifierError::Unrecognized(other.to_string())),
    }
}
