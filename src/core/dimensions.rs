use serde_json::Value;
use crate::core::normalize::{canonical, normalize};
use crate::models::{CandidateProfile, OpportunityProfile, SkillSet};

/// Bidirectional substring containment between two canonical tokens
///
/// Treats "web dev" and "web development" as a match. Also matches "java"
/// against "javascript"; callers rely on that looser behavior.
#[inline]
pub fn tokens_match(candidate: &str, requirement: &str) -> bool {
    candidate == requirement || candidate.contains(requirement) || requirement.contains(candidate)
}

/// Number of required tokens present (exact equality) in the candidate set
#[inline]
pub fn intersection_count(candidate: &SkillSet, required: &SkillSet) -> usize {
    required.iter().filter(|token| candidate.contains(token)).count()
}

/// Directional coverage `|A ∩ B| / |B|`, 0 when `B` is empty
#[inline]
pub fn overlap_ratio(candidate: &SkillSet, required: &SkillSet) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    intersection_count(candidate, required) as f64 / required.len() as f64
}

/// Location sub-score (0 or 1)
///
/// Inputs are trimmed, lowercased strings; `None` means absent or blank.
pub fn location_score(candidate: Option<&str>, opportunity: Option<&str>) -> f64 {
    let Some(opportunity) = opportunity else {
        return 1.0;
    };
    if opportunity.contains("remote") || opportunity.contains("anywhere") {
        return 1.0;
    }
    match candidate {
        Some(candidate) if tokens_match(candidate, opportunity) => 1.0,
        _ => 0.0,
    }
}

/// Number of tokens that occur as a substring of the corpus
#[inline]
pub fn corpus_hits(tokens: &SkillSet, corpus: &str) -> usize {
    tokens.iter().filter(|token| corpus.contains(token.as_str())).count()
}

/// Lowercased concatenation of an internship's free-text fields
pub fn requirement_corpus(opportunity: &OpportunityProfile) -> String {
    [
        &opportunity.requirements,
        &opportunity.responsibilities,
        &opportunity.description,
        &opportunity.title,
    ]
    .into_iter()
    .map(value_text)
    .filter(|text| !text.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

/// Degree tokens from the candidate's degree list and education entries
pub fn education_tokens(candidate: &CandidateProfile) -> SkillSet {
    let mut tokens = normalize(&candidate.degrees);
    tokens.extend(normalize(&degree_fields(&candidate.education)));
    tokens
}

/// True when the internship history holds at least one record
pub fn has_experience(internships: &Value) -> bool {
    match internships {
        Value::Array(records) => !records.is_empty(),
        Value::Object(record) => !record.is_empty(),
        Value::String(text) => matches!(
            serde_json::from_str::<Value>(text),
            Ok(Value::Array(records)) if !records.is_empty()
        ),
        _ => false,
    }
}

/// True when the candidate carries any attribute the composite score reads
pub fn has_attributes(candidate: &CandidateProfile) -> bool {
    !normalize(&candidate.skills).is_empty()
        || !normalize(&candidate.languages).is_empty()
        || !normalize(&candidate.completed_courses).is_empty()
        || !education_tokens(candidate).is_empty()
        || has_experience(&candidate.internships)
        || [&candidate.location, &candidate.address]
            .into_iter()
            .any(|value| value.as_str().and_then(canonical).is_some())
}

/// Replace each education entry by its `degree` field when it has one
fn degree_fields(education: &Value) -> Value {
    match education {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed @ (Value::Array(_) | Value::Object(_))) => degree_fields(&parsed),
            _ => education.clone(),
        },
        Value::Array(entries) => Value::Array(entries.iter().map(entry_degree).collect()),
        Value::Object(_) => Value::Array(vec![entry_degree(education)]),
        other => other.clone(),
    }
}

/// Entries without a string `degree` contribute nothing
fn entry_degree(entry: &Value) -> Value {
    match entry {
        Value::Object(fields) => match fields.get("degree") {
            Some(degree @ Value::String(_)) => degree.clone(),
            _ => Value::Null,
        },
        other => other.clone(),
    }
}

/// Plain text of a free-text field; arrays and objects contribute their leaves
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => join_texts(items.iter()),
        Value::Object(map) => join_texts(map.values()),
        Value::Null => String::new(),
    }
}

fn join_texts<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .map(value_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(tokens: &[&str]) -> SkillSet {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokens_match_both_directions() {
        assert!(tokens_match("web dev", "web development"));
        assert!(tokens_match("web development", "web dev"));
        assert!(tokens_match("javascript", "java"));
        assert!(!tokens_match("python", "java"));
    }

    #[test]
    fn test_overlap_ratio_is_exact_and_directional() {
        let candidate = set(&["react", "node", "sql"]);
        assert_eq!(overlap_ratio(&candidate, &set(&["react", "go"])), 0.5);
        assert_eq!(overlap_ratio(&set(&["javascript"]), &set(&["java"])), 0.0);
        assert_eq!(overlap_ratio(&candidate, &SkillSet::new()), 0.0);
    }

    #[test]
    fn test_location_score() {
        assert_eq!(location_score(None, None), 1.0);
        assert_eq!(location_score(None, Some("remote (india)")), 1.0);
        assert_eq!(location_score(Some("pune"), Some("work from anywhere")), 1.0);
        assert_eq!(location_score(Some("pune"), Some("pune, maharashtra")), 1.0);
        assert_eq!(location_score(Some("mumbai"), Some("pune")), 0.0);
        assert_eq!(location_score(None, Some("pune")), 0.0);
    }

    #[test]
    fn test_requirement_corpus_flattens_fields() {
        let opportunity = OpportunityProfile {
            title: json!("Data Intern"),
            requirements: json!(["B.Sc Statistics", { "item": "Excel" }]),
            responsibilities: Value::Null,
            description: json!("Build DASHBOARDS"),
            ..Default::default()
        };
        assert_eq!(
            requirement_corpus(&opportunity),
            "b.sc statistics excel build dashboards data intern"
        );
    }

    #[test]
    fn test_education_tokens_prefer_degree_field() {
        let candidate = CandidateProfile {
            degrees: json!("BCA"),
            education: json!([
                { "degree": "M.Tech", "institution": "IIT" },
                { "institution": "Open School" },
                "Diploma",
            ]),
            ..Default::default()
        };
        assert_eq!(education_tokens(&candidate).to_vec(), vec!["bca", "diploma", "m.tech"]);
    }

    #[test]
    fn test_education_tokens_from_encoded_object() {
        let candidate = CandidateProfile {
            education: json!(r#"{"degree": "B.Com, Hons", "year": 2024}"#),
            ..Default::default()
        };
        assert_eq!(education_tokens(&candidate).to_vec(), vec!["b.com, hons"]);
    }

    #[test]
    fn test_has_experience() {
        assert!(has_experience(&json!([{ "company": "Acme" }])));
        assert!(has_experience(&json!(r#"[{"company": "Acme"}]"#)));
        assert!(!has_experience(&json!([])));
        assert!(!has_experience(&json!("[]")));
        assert!(!has_experience(&Value::Null));
        assert!(!has_experience(&json!(3)));
    }

    #[test]
    fn test_has_attributes() {
        assert!(!has_attributes(&CandidateProfile::default()));
        let located = CandidateProfile {
            address: json!("Delhi"),
            ..Default::default()
        };
        assert!(has_attributes(&located));
    }
}
