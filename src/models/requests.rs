use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;
use crate::models::domain::{CandidateProfile, OpportunityProfile};

/// Request to score a candidate's skills against a requirement list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchRequest {
    #[serde(alias = "candidate_skills", rename = "candidateSkills", default)]
    pub candidate_skills: Value,
    #[serde(alias = "required_skills", rename = "requiredSkills", default)]
    pub required_skills: Value,
}

/// Request to compute the composite score of one candidate/internship pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeMatchRequest {
    #[serde(default)]
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub opportunity: OpportunityProfile,
}

/// Request for a page of internship recommendations for a student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendInternshipsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: String,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request for open internships ranked by skill coverage alone
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillFilterRequest {
    #[serde(default)]
    pub skills: Value,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank a set of students against one internship
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankStudentsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "internship_id", rename = "internshipId")]
    pub internship_id: String,
    #[validate(length(min = 1, max = 200))]
    #[serde(alias = "student_ids", rename = "studentIds")]
    pub student_ids: Vec<String>,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub limit: Option<u16>,
}
