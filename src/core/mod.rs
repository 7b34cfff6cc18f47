// Core algorithm exports
pub mod dimensions;
pub mod normalize;
pub mod ranker;
pub mod scoring;

pub use normalize::{normalize, normalize_text};
pub use ranker::{Ranker, Recommendations, DEFAULT_PAGE_SIZE};
pub use scoring::{composite_breakdown, score_composite, score_skill_match, skill_match, ScoringError};
