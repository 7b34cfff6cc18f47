use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Canonical set of lowercase, trimmed, non-empty tokens
///
/// Produced by [`crate::core::normalize`]. Backed by an ordered set so that
/// serialized output is stable across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already canonical token. Empty tokens are ignored.
    pub fn insert(&mut self, token: String) {
        if !token.is_empty() {
            self.0.insert(token);
        }
    }

    pub fn extend(&mut self, other: SkillSet) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Convert back into a JSON array of strings
    pub fn into_value(self) -> Value {
        Value::Array(self.0.into_iter().map(Value::String).collect())
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

/// Student attributes read by the scorers
///
/// Attribute fields are kept as raw JSON because different screens of the
/// marketplace store them in different shapes (arrays of strings, arrays of
/// objects, JSON-encoded strings, comma-separated strings).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "$id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub name: Value,
    #[serde(default)]
    pub skills: Value,
    #[serde(default)]
    pub languages: Value,
    #[serde(alias = "completedCourses", default)]
    pub completed_courses: Value,
    #[serde(default)]
    pub degrees: Value,
    #[serde(default)]
    pub education: Value,
    #[serde(default)]
    pub location: Value,
    #[serde(default)]
    pub address: Value,
    /// Prior internship records. Only presence and length are read.
    #[serde(default)]
    pub internships: Value,
}

/// Internship attributes read by the scorers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpportunityProfile {
    #[serde(rename = "$id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Value,
    #[serde(alias = "skillsRequired", default)]
    pub skills_required: Value,
    #[serde(alias = "languageRequirements", default)]
    pub language_requirements: Value,
    #[serde(default)]
    pub location: Value,
    #[serde(default)]
    pub requirements: Value,
    #[serde(default)]
    pub responsibilities: Value,
    #[serde(default)]
    pub description: Value,
}

/// A scored item
///
/// `match_count` is the raw number of matched requirement tokens and is only
/// used to break score ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult<T> {
    pub score: u8,
    #[serde(rename = "matchCount", default, skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
    pub item: T,
}

impl<T> MatchResult<T> {
    pub fn new(item: T, score: u8) -> Self {
        Self {
            score,
            match_count: None,
            item,
        }
    }

    /// Result for an item that could not be scored (degraded ranking)
    pub fn unscored(item: T) -> Self {
        Self::new(item, 0)
    }

    pub fn with_match_count(mut self, count: usize) -> Self {
        self.match_count = Some(count);
        self
    }
}

/// Outcome of a single-dimension skill match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub score: u8,
    /// Requirement tokens covered by the candidate
    #[serde(rename = "matchedSkills")]
    pub matched_skills: Vec<String>,
}

/// Per-dimension sub-scores of the composite match, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub languages: f64,
    pub location: f64,
    pub education: f64,
    pub experience: f64,
    pub courses: f64,
}

impl ScoreBreakdown {
    /// Linear combination of the sub-scores, in [0, 1] for weights summing to 1
    pub fn weighted_total(&self, weights: &ScoringWeights) -> f64 {
        self.skills * weights.skills
            + self.languages * weights.languages
            + self.location * weights.location
            + self.education * weights.education
            + self.experience * weights.experience
            + self.courses * weights.courses
    }
}

/// Composite scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub languages: f64,
    pub location: f64,
    pub education: f64,
    pub experience: f64,
    pub courses: f64,
}

/// Fixed weights of the composite score. They sum to 1.0.
pub const COMPOSITE_WEIGHTS: ScoringWeights = ScoringWeights {
    skills: 0.50,
    languages: 0.10,
    location: 0.10,
    education: 0.15,
    experience: 0.10,
    courses: 0.05,
};

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.languages + self.location + self.education + self.experience + self.courses
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        COMPOSITE_WEIGHTS
    }
}
