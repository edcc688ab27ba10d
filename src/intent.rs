use tracing::warn;

use crate::error::{ClassifierError, Error, Result};
use crate::model::entity::{Intent, ParticipantRecord};

pub trait IntentClassifier {
    fn classify(&self, text: &str) -> std::result::Result<Intent, ClassifierError>;
}

impl<F> IntentClassifier for F
where
    F: Fn(&str) -> std::result::Result<Intent, ClassifierError>,
{
    fn classify(&self, text: &str) -> std::result::Result<Intent, ClassifierError> {
        self(text)
    }
}

const SOCIALIZE_KEYWORDS: &[&str] = &[
    "socialize", "socialise", "social", "meet", "friends", "people", "connect", "network",
    "networking", "community", "together",
];
const LEARN_KEYWORDS: &[&str] = &[
    "learn", "learning", "skills", "level", "improve", "grow", "knowledge", "explore", "practice",
    "study", "techniques",
];
const ENJOY_KEYWORDS: &[&str] = &[
    "fun", "enjoy", "enjoying", "blast", "vibe", "vibin", "laugh", "laughter", "memories", "relax",
    "excited",
];
const WIN_KEYWORDS: &[&str] = &[
    "win", "winning", "prize", "prizes", "compete", "competition", "competitive", "victory",
    "podium", "top", "champion",
];

/// Deterministic keyword-count classifier.
///
/// The intent with the most keyword hits wins; ties resolve in the order
/// socialize, learn, enjoy, win.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    fn keywords(intent: Intent) -> &'static [&'static str] {
        match intent {
            Intent::Socialize => SOCIALIZE_KEYWORDS,
            Intent::Learn => LEARN_KEYWORDS,
            Intent::Enjoy => ENJOY_KEYWORDS,
            Intent::Win => WIN_KEYWORDS,
        }
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> std::result::Result<Intent, ClassifierError> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();

        let mut best: Option<(Intent, usize)> = None;
        for intent in Intent::ALL {
            let keywords = Self::keywords(intent);
            let hits = words.iter().filter(|word| keywords.contains(word)).count();
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((intent, hits));
            }
        }
        best.map(|(intent, _)| intent)
            .ok_or_else(|| ClassifierError::Unrecognized(text.to_string()))
    }
}

/// Classifies every record's objective, in input order.
///
/// A failure leaves that participant's intent unknown (`None`) unless
/// `fail_fast` is set, in which case the run is aborted.
pub fn resolve_intents(
    records: &[ParticipantRecord],
    classifier: &dyn IntentClassifier,
    fail_fast: bool,
) -> Result<Vec<Option<Intent>>> {
    records
        .iter()
        .map(|record| match classifier.classify(&record.objective) {
            Ok(intent) => Ok(Some(intent)),
            Err(source) if fail_fast => Err(Error::Classifier { id: record.id.clone(), source }),
            Err(source) => {
                warn!(id = %record.id, error = %source, "intent unknown, objective factor disabled");
                Ok(None)
            }
        })
        .collect()
}
