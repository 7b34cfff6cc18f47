use crate::models::{CandidateProfile, OpportunityProfile};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only Appwrite client
///
/// Fetches the student and internship documents the scorers consume. The
/// marketplace writes these documents elsewhere; this service never does.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub students: String,
    pub internships: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    /// Fetch a student profile by document ID
    pub async fn get_student(&self, student_id: &str) -> Result<CandidateProfile, AppwriteError> {
        tracing::debug!("Fetching student profile: {}", student_id);
        self.get_document(&self.collections.students, student_id).await
    }

    /// Fetch an internship by document ID
    pub async fn get_internship(&self, internship_id: &str) -> Result<OpportunityProfile, AppwriteError> {
        tracing::debug!("Fetching internship: {}", internship_id);
        self.get_document(&self.collections.internships, internship_id).await
    }

    /// List open internships, newest first
    pub async fn list_open_internships(&self, limit: usize) -> Result<Vec<OpportunityProfile>, AppwriteError> {
        let queries = vec![
            r#"{"method":"equal","attribute":"status","values":["open"]}"#.to_string(),
            r#"{"method":"orderDesc","attribute":"$createdAt"}"#.to_string(),
            format!(r#"{{"method":"limit","values":[{}]}}"#, limit),
        ];

        let documents = self.list_documents(&self.collections.internships, &queries).await?;

        // Skip documents that do not deserialize instead of failing the whole page
        let internships: Vec<OpportunityProfile> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(internship) => Some(internship),
                Err(e) => {
                    tracing::warn!("Skipping malformed internship document: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Listed {} open internships", internships.len());

        Ok(internships)
    }

    /// Fetch several students; missing documents are skipped
    pub async fn get_students(&self, student_ids: &[String]) -> Result<Vec<CandidateProfile>, AppwriteError> {
        let mut students = Vec::with_capacity(student_ids.len());

        for student_id in student_ids {
            match self.get_student(student_id).await {
                Ok(student) => students.push(student),
                Err(AppwriteError::NotFound(_)) => {
                    tracing::warn!("Student {} not found, skipping", student_id);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(students)
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<T, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection,
            urlencoding::encode(document_id)
        );

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(AppwriteError::NotFound(format!(
                    "Document {} not found in {}",
                    document_id, collection
                )))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AppwriteError::Unauthorized),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to fetch {}/{}: {} - {}", collection, document_id, status, body);
                return Err(AppwriteError::ApiError(format!("Failed to fetch document: {}", status)));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        // Older SDKs wrap attributes in a `data` object
        let data = match json.get("data") {
            Some(data) if data.is_object() => data.clone(),
            _ => json,
        };

        serde_json::from_value(data)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse {} document: {}", collection, e)))
    }

    async fn list_documents(&self, collection: &str, queries: &[String]) -> Result<Vec<Value>, AppwriteError> {
        let query_string = queries
            .iter()
            .map(|q| format!("queries[]={}", urlencoding::encode(q)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!(
            "{}/databases/{}/collections/{}/documents?{}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection,
            query_string
        );

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AppwriteError::Unauthorized),
            status if !status.is_success() => {
                return Err(AppwriteError::ApiError(format!(
                    "Failed to list {}: {}",
                    collection, status
                )))
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        tracing::trace!("Listed {} of {} documents from {}", documents.len(), total, collection);

        Ok(documents
            .iter()
            .map(|doc| match doc.get("data") {
                Some(data) if data.is_object() => data.clone(),
                _ => doc.clone(),
            })
            .collect())
    }
}
