use serde_json::Value;
use thiserror::Error;
use crate::core::dimensions::{
    corpus_hits, education_tokens, has_experience, location_score, overlap_ratio, requirement_corpus,
    tokens_match,
};
use crate::core::normalize::{canonical, normalize};
use crate::models::{CandidateProfile, OpportunityProfile, ScoreBreakdown, SkillMatch, COMPOSITE_WEIGHTS};

/// Errors raised while computing a composite score
///
/// These never leave [`score_composite`]; they are logged and the score
/// falls back to 0.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{field} must be a string, got {kind}")]
    UnexpectedType {
        field: &'static str,
        kind: &'static str,
    },

    #[error("weighted score is not finite: {0}")]
    NonFinite(f64),
}

/// Percentage of the internship's required skills covered by the candidate
///
/// Requirement tokens match candidate tokens by bidirectional substring
/// containment, each requirement counted at most once. Returns 0 when either
/// side normalizes to an empty set.
pub fn score_skill_match(candidate_skills: &Value, required_skills: &Value) -> u8 {
    skill_match(candidate_skills, required_skills).score
}

/// Skill match score together with the covered requirement tokens
pub fn skill_match(candidate_skills: &Value, required_skills: &Value) -> SkillMatch {
    let required = normalize(required_skills);
    if required.is_empty() {
        return SkillMatch::default();
    }

    let candidate = normalize(candidate_skills);
    if candidate.is_empty() {
        return SkillMatch::default();
    }

    let matched_skills: Vec<String> = required
        .iter()
        .filter(|requirement| candidate.iter().any(|token| tokens_match(token, requirement)))
        .cloned()
        .collect();

    let score = to_percentage(matched_skills.len() as f64 / required.len() as f64).unwrap_or(0);

    SkillMatch {
        score,
        matched_skills,
    }
}

/// Composite match score (0-100) of a student against an internship
///
/// Scoring formula:
/// score = (
///     skills * 0.50 +       # exact overlap with required skills
///     languages * 0.10 +    # exact overlap with required languages
///     location * 0.10 +     # remote, unspecified or same place
///     education * 0.15 +    # degrees mentioned in the posting text
///     experience * 0.10 +   # any prior internship
///     courses * 0.05        # completed courses mentioned in the posting text
/// ) * 100
///
/// Never fails: any extraction error is logged and scored as 0.
pub fn score_composite(candidate: &CandidateProfile, opportunity: &OpportunityProfile) -> u8 {
    let result = composite_breakdown(candidate, opportunity)
        .and_then(|breakdown| to_percentage(breakdown.weighted_total(&COMPOSITE_WEIGHTS)));

    match result {
        Ok(score) => score,
        Err(e) => {
            tracing::warn!(
                candidate = ?candidate.id,
                opportunity = ?opportunity.id,
                "Composite scoring failed, using 0: {}",
                e
            );
            0
        }
    }
}

/// Per-dimension sub-scores of the composite match
pub fn composite_breakdown(
    candidate: &CandidateProfile,
    opportunity: &OpportunityProfile,
) -> Result<ScoreBreakdown, ScoringError> {
    let required_skills = normalize(&opportunity.skills_required);
    let skills = overlap_ratio(&normalize(&candidate.skills), &required_skills);

    let languages = overlap_ratio(
        &normalize(&candidate.languages),
        &normalize(&opportunity.language_requirements),
    );

    let candidate_location = match location_text(&candidate.location, "candidate.location")? {
        Some(location) => Some(location),
        None => location_text(&candidate.address, "candidate.address")?,
    };
    let opportunity_location = location_text(&opportunity.location, "opportunity.location")?;
    let location = location_score(candidate_location.as_deref(), opportunity_location.as_deref());

    let corpus = requirement_corpus(opportunity);

    let education_tokens = education_tokens(candidate);
    let education = if education_tokens.is_empty() {
        0.0
    } else {
        corpus_hits(&education_tokens, &corpus) as f64 / education_tokens.len() as f64
    };

    let experience = if has_experience(&candidate.internships) { 1.0 } else { 0.0 };

    // Denominator is the required skill count, not the course count
    let course_tokens = normalize(&candidate.completed_courses);
    let courses = if course_tokens.is_empty() {
        0.0
    } else {
        let denominator = required_skills.len().max(1) as f64;
        (corpus_hits(&course_tokens, &corpus) as f64 / denominator).min(1.0)
    };

    Ok(ScoreBreakdown {
        skills,
        languages,
        location,
        education,
        experience,
        courses,
    })
}

/// Convert a fraction into an integer percentage clamped to [0, 100]
pub fn to_percentage(fraction: f64) -> Result<u8, ScoringError> {
    if !fraction.is_finite() {
        return Err(ScoringError::NonFinite(fraction));
    }
    Ok((fraction * 100.0).round().clamp(0.0, 100.0) as u8)
}

/// Trimmed, lowercased location string; `None` when absent or blank
fn location_text(value: &Value, field: &'static str) -> Result<Option<String>, ScoringError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(canonical(text)),
        other => Err(ScoringError::UnexpectedType {
            field,
            kind: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
