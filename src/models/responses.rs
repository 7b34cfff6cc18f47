use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, ScoreBreakdown};
use crate::services::CacheStats;

/// Response for the skill match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchResponse {
    pub score: u8,
    #[serde(rename = "matchedSkills")]
    pub matched_skills: Vec<String>,
}

/// Response for the composite match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeMatchResponse {
    pub score: u8,
    /// Absent when the profiles could not be scored
    pub breakdown: Option<ScoreBreakdown>,
}

/// Ranked page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResponse<T> {
    pub results: Vec<MatchResult<T>>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
