use serde_json::Value;
use crate::core::{
    dimensions::{has_attributes, intersection_count},
    normalize::normalize,
    scoring::{score_composite, skill_match},
};
use crate::models::{CandidateProfile, MatchResult, OpportunityProfile};

/// Page size used by recommendation lists
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// A ranked page together with the number of items that were considered
#[derive(Debug)]
pub struct Recommendations<T> {
    pub results: Vec<MatchResult<T>>,
    pub total_candidates: usize,
}

/// Sorts scored items and cuts them to a page
///
/// Ordering is score descending, then raw match count descending, then input
/// order. The sort is stable so equal items always come back in the same
/// order for the same input.
#[derive(Debug, Clone)]
pub struct Ranker {
    page_size: usize,
}

impl Ranker {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sort by score (descending) and truncate to the page size
    pub fn rank<T>(&self, mut results: Vec<MatchResult<T>>) -> Vec<MatchResult<T>> {
        // `None` sorts after any count so mixed inputs still form a total order
        results.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.match_count.cmp(&a.match_count))
        });
        results.truncate(self.page_size);
        results
    }

    /// Internship recommendations for a student, by composite score
    ///
    /// A student without any usable attribute still gets the first page of
    /// internships, in input order and scored 0.
    pub fn recommend_internships(
        &self,
        candidate: &CandidateProfile,
        internships: Vec<OpportunityProfile>,
    ) -> Recommendations<OpportunityProfile> {
        let total_candidates = internships.len();

        if !has_attributes(candidate) {
            tracing::debug!(
                "Student {:?} has no attributes, returning {} unranked internships",
                candidate.id,
                total_candidates.min(self.page_size)
            );
            return self.unranked(internships);
        }

        let candidate_skills = normalize(&candidate.skills);

        let scored = internships
            .into_iter()
            .map(|internship| {
                let score = score_composite(candidate, &internship);
                let matched = intersection_count(&candidate_skills, &normalize(&internship.skills_required));
                MatchResult::new(internship, score).with_match_count(matched)
            })
            .collect();

        Recommendations {
            results: self.rank(scored),
            total_candidates,
        }
    }

    /// Internships ranked by skill coverage alone
    pub fn recommend_by_skills(
        &self,
        skills: &Value,
        internships: Vec<OpportunityProfile>,
    ) -> Recommendations<OpportunityProfile> {
        let total_candidates = internships.len();

        if normalize(skills).is_empty() {
            return self.unranked(internships);
        }

        let scored = internships
            .into_iter()
            .map(|internship| {
                let result = skill_match(skills, &internship.skills_required);
                MatchResult::new(internship, result.score).with_match_count(result.matched_skills.len())
            })
            .collect();

        Recommendations {
            results: self.rank(scored),
            total_candidates,
        }
    }

    /// Students ranked by composite score against one internship
    pub fn rank_candidates(
        &self,
        internship: &OpportunityProfile,
        candidates: Vec<CandidateProfile>,
    ) -> Recommendations<CandidateProfile> {
        let total_candidates = candidates.len();
        let required_skills = normalize(&internship.skills_required);

        let scored = candidates
            .into_iter()
            .map(|candidate| {
                let score = score_composite(&candidate, internship);
                let matched = intersection_count(&normalize(&candidate.skills), &required_skills);
                MatchResult::new(candidate, score).with_match_count(matched)
            })
            .collect();

        Recommendations {
            results: self.rank(scored),
            total_candidates,
        }
    }

    /// First page of items in input order, scored 0
    fn unranked<T>(&self, items: Vec<T>) -> Recommendations<T> {
        let total_candidates = items.len();
        Recommendations {
            results: items
                .into_iter()
                .take(self.page_size)
                .map(MatchResult::unscored)
                .collect(),
            total_candidates,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
