use crate::models::{CandidateProfile, OpportunityProfile};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache for documents fetched from Appwrite
///
/// Recommendation pages are requested repeatedly while a student browses, so
/// profiles and the open internship list are kept for a short TTL instead of
/// being refetched on every request.
pub struct CacheManager {
    students: moka::future::Cache<String, Arc<CandidateProfile>>,
    internships: moka::future::Cache<String, Arc<OpportunityProfile>>,
    open_internships: moka::future::Cache<String, Arc<Vec<OpportunityProfile>>>,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);

        Self {
            students: moka::future::CacheBuilder::new(max_entries)
                .time_to_live(ttl)
                .build(),
            internships: moka::future::CacheBuilder::new(max_entries)
                .time_to_live(ttl)
                .build(),
            // Keyed by fetch limit
            open_internships: moka::future::CacheBuilder::new(16)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn student(&self, student_id: &str) -> Option<Arc<CandidateProfile>> {
        let hit = self.students.get(student_id).await;
        tracing::trace!("Student cache {}: {}", if hit.is_some() { "hit" } else { "miss" }, student_id);
        hit
    }

    pub async fn insert_student(&self, student_id: &str, student: CandidateProfile) -> Arc<CandidateProfile> {
        let student = Arc::new(student);
        self.students.insert(student_id.to_string(), student.clone()).await;
        student
    }

    pub async fn internship(&self, internship_id: &str) -> Option<Arc<OpportunityProfile>> {
        self.internships.get(internship_id).await
    }

    pub async fn insert_internship(
        &self,
        internship_id: &str,
        internship: OpportunityProfile,
    ) -> Arc<OpportunityProfile> {
        let internship = Arc::new(internship);
        self.internships
            .insert(internship_id.to_string(), internship.clone())
            .await;
        internship
    }

    pub async fn open_internships(&self, fetch_limit: usize) -> Option<Arc<Vec<OpportunityProfile>>> {
        self.open_internships.get(&CacheKey::open_internships(fetch_limit)).await
    }

    pub async fn insert_open_internships(
        &self,
        fetch_limit: usize,
        internships: Vec<OpportunityProfile>,
    ) -> Arc<Vec<OpportunityProfile>> {
        let internships = Arc::new(internships);
        self.open_internships
            .insert(CacheKey::open_internships(fetch_limit), internships.clone())
            .await;
        internships
    }

    /// Drop everything, e.g. after an internship is closed upstream
    pub fn invalidate_all(&self) {
        self.students.invalidate_all();
        self.internships.invalidate_all();
        self.open_internships.invalidate_all();
        tracing::debug!("Invalidated all cached documents");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            students: self.students.entry_count(),
            internships: self.internships.entry_count(),
            open_internships: self.open_internships.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheStats {
    pub students: u64,
    pub internships: u64,
    #[serde(rename = "openInternships")]
    pub open_internships: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the open internship list
    pub fn open_internships(fetch_limit: usize) -> String {
        format!("internships:open:{}", fetch_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_student_round_trip() {
        let cache = CacheManager::new(100, 60);
        assert!(cache.student("stu_1").await.is_none());

        let student = CandidateProfile {
            id: Some("stu_1".to_string()),
            skills: json!(["rust"]),
            ..Default::default()
        };
        cache.insert_student("stu_1", student).await;

        let cached = cache.student("stu_1").await.unwrap();
        assert_eq!(cached.skills, json!(["rust"]));
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = CacheManager::new(100, 60);
        cache
            .insert_open_internships(30, vec![OpportunityProfile::default()])
            .await;
        assert!(cache.open_internships(30).await.is_some());
        assert!(cache.open_internships(60).await.is_none());

        cache.invalidate_all();
        assert!(cache.open_internships(30).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_count_open_internship_lists() {
        let cache = CacheManager::new(100, 60);
        cache
            .insert_open_internships(30, vec![OpportunityProfile::default()])
            .await;
        cache.open_internships.run_pending_tasks().await;

        let stats = cache.stats();
        assert_eq!(stats.open_internships, 1);
        assert_eq!(stats.students, 0);
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::open_internships(30), "internships:open:30");
    }
}
