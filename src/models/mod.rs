// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProfile, MatchResult, OpportunityProfile, ScoreBreakdown, ScoringWeights, SkillMatch, SkillSet,
    COMPOSITE_WEIGHTS,
};
pub use requests::{
    CompositeMatchRequest, RankStudentsRequest, RecommendInternshipsRequest, SkillFilterRequest,
    SkillMatchRequest,
};
pub use responses::{CompositeMatchResponse, ErrorResponse, HealthResponse, RankedResponse, SkillMatchResponse};
