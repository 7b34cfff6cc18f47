//! Intern Match - match scoring and recommendations for the internship marketplace
//!
//! This library provides the scoring engine used to rank internships for
//! students (and students for internships) and to compute the "match
//! percentage" badges shown next to postings.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, score_composite, score_skill_match, Ranker};
pub use models::{CandidateProfile, MatchResult, OpportunityProfile, SkillSet, COMPOSITE_WEIGHTS};
