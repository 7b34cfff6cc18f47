use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;
use crate::core::{composite_breakdown, score_composite, skill_match, Ranker};
use crate::models::{
    CandidateProfile, CompositeMatchRequest, CompositeMatchResponse, ErrorResponse, HealthResponse, OpportunityProfile,
    RankStudentsRequest, RankedResponse, RecommendInternshipsRequest, SkillFilterRequest, SkillMatchRequest,
    SkillMatchResponse,
};
use crate::services::{AppwriteClient, AppwriteError, CacheManager};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub ranker: Ranker,
    pub max_page_size: usize,
    pub internship_fetch_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match/skills", web::post().to(match_skills))
        .route("/match/composite", web::post().to(match_composite))
        .route("/recommendations/internships", web::post().to(recommend_internships))
        .route("/recommendations/by-skills", web::post().to(recommend_by_skills))
        .route("/recommendations/students", web::post().to(rank_students))
        .route("/cache/invalidate", web::post().to(invalidate_cache));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.stats(),
    })
}

/// Skill match endpoint
///
/// POST /api/v1/match/skills
///
/// Request body:
/// ```json
/// {
///   "candidateSkills": ["react", "web dev"],
///   "requiredSkills": "react, web development"
/// }
/// ```
async fn match_skills(req: web::Json<SkillMatchRequest>) -> impl Responder {
    let result = skill_match(&req.candidate_skills, &req.required_skills);

    HttpResponse::Ok().json(SkillMatchResponse {
        score: result.score,
        matched_skills: result.matched_skills,
    })
}

/// Composite match endpoint
///
/// POST /api/v1/match/composite
///
/// Scores the inline `candidate` against the inline `opportunity`. Profiles
/// that cannot be scored get a score of 0 and no breakdown.
async fn match_composite(req: web::Json<CompositeMatchRequest>) -> impl Responder {
    let breakdown = match composite_breakdown(&req.candidate, &req.opportunity) {
        Ok(breakdown) => Some(breakdown),
        Err(e) => {
            tracing::info!("Composite breakdown unavailable: {}", e);
            None
        }
    };

    HttpResponse::Ok().json(CompositeMatchResponse {
        score: score_composite(&req.candidate, &req.opportunity),
        breakdown,
    })
}

/// Internship recommendations endpoint
///
/// POST /api/v1/recommendations/internships
///
/// Request body:
/// ```json
/// {
///   "studentId": "string",
///   "limit": 6
/// }
/// ```
async fn recommend_internships(
    state: web::Data<AppState>,
    req: web::Json<RecommendInternshipsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend_internships request: {:?}", errors);
        return validation_error(errors);
    }

    let student_id = &req.student_id;
    let ranker = page_ranker(&state, req.limit);

    tracing::info!("Recommending internships for student: {}, limit: {}", student_id, ranker.page_size());

    let student = match state.cache.student(student_id).await {
        Some(student) => student,
        None => match state.appwrite.get_student(student_id).await {
            Ok(student) => state.cache.insert_student(student_id, student).await,
            Err(e) => return upstream_error("Failed to fetch student", &e),
        },
    };

    let internships = match open_internships(&state).await {
        Ok(internships) => internships,
        Err(e) => return upstream_error("Failed to list internships", &e),
    };

    let page = ranker.recommend_internships(&student, (*internships).clone());

    tracing::info!(
        "Returning {} internships for student {} (from {} open)",
        page.results.len(),
        student_id,
        page.total_candidates
    );

    HttpResponse::Ok().json(RankedResponse {
        results: page.results,
        total_candidates: page.total_candidates,
    })
}

/// Skill filter endpoint
///
/// POST /api/v1/recommendations/by-skills
///
/// Ranks open internships by the share of their required skills covered by
/// `skills`. An empty skill list returns the first page unranked.
async fn recommend_by_skills(
    state: web::Data<AppState>,
    req: web::Json<SkillFilterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let ranker = page_ranker(&state, req.limit);

    let internships = match open_internships(&state).await {
        Ok(internships) => internships,
        Err(e) => return upstream_error("Failed to list internships", &e),
    };

    let page = ranker.recommend_by_skills(&req.skills, (*internships).clone());

    HttpResponse::Ok().json(RankedResponse {
        results: page.results,
        total_candidates: page.total_candidates,
    })
}

/// Student ranking endpoint
///
/// POST /api/v1/recommendations/students
///
/// Request body:
/// ```json
/// {
///   "internshipId": "string",
///   "studentIds": ["string"],
///   "limit": 6
/// }
/// ```
async fn rank_students(
    state: web::Data<AppState>,
    req: web::Json<RankStudentsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_students request: {:?}", errors);
        return validation_error(errors);
    }

    let ranker = page_ranker(&state, req.limit);

    let internship: Arc<OpportunityProfile> = match state.cache.internship(&req.internship_id).await {
        Some(internship) => internship,
        None => match state.appwrite.get_internship(&req.internship_id).await {
            Ok(internship) => state.cache.insert_internship(&req.internship_id, internship).await,
            Err(e) => return upstream_error("Failed to fetch internship", &e),
        },
    };

    let mut found: HashMap<String, Arc<CandidateProfile>> = HashMap::with_capacity(req.student_ids.len());
    let mut missing = Vec::new();
    for student_id in &req.student_ids {
        match state.cache.student(student_id).await {
            Some(student) => {
                found.insert(student_id.clone(), student);
            }
            None => missing.push(student_id.clone()),
        }
    }

    if !missing.is_empty() {
        match state.appwrite.get_students(&missing).await {
            Ok(fetched) => {
                for student in fetched {
                    if let Some(id) = student.id.clone() {
                        let student = state.cache.insert_student(&id, student).await;
                        found.insert(id, student);
                    }
                }
            }
            Err(e) => return upstream_error("Failed to fetch students", &e),
        }
    }

    // Ties fall back to request order
    let students: Vec<CandidateProfile> = req
        .student_ids
        .iter()
        .filter_map(|id| found.get(id).map(|student| (**student).clone()))
        .collect();

    let page = ranker.rank_candidates(&internship, students);

    tracing::info!(
        "Ranked {} students for internship {}, returning {}",
        page.total_candidates,
        req.internship_id,
        page.results.len()
    );

    HttpResponse::Ok().json(RankedResponse {
        results: page.results,
        total_candidates: page.total_candidates,
    })
}

/// Drop cached documents so the next request refetches them
async fn invalidate_cache(state: web::Data<AppState>) -> impl Responder {
    state.cache.invalidate_all();
    HttpResponse::NoContent().finish()
}

/// Open internships, from the cache when fresh
async fn open_internships(state: &AppState) -> Result<Arc<Vec<OpportunityProfile>>, AppwriteError> {
    let fetch_limit = state.internship_fetch_limit;
    if let Some(internships) = state.cache.open_internships(fetch_limit).await {
        return Ok(internships);
    }

    let internships = state.appwrite.list_open_internships(fetch_limit).await?;
    Ok(state.cache.insert_open_internships(fetch_limit, internships).await)
}

/// Ranker for the requested page size, capped by configuration
fn page_ranker(state: &AppState, limit: Option<u16>) -> Ranker {
    match limit {
        Some(limit) => Ranker::new((limit as usize).min(state.max_page_size)),
        None => state.ranker.clone(),
    }
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Map a backend failure to a response
fn upstream_error(context: &str, err: &AppwriteError) -> HttpResponse {
    match err {
        AppwriteError::NotFound(_) => {
            tracing::info!("{}: {}", context, err);
            HttpResponse::NotFound().json(ErrorResponse {
                error: context.to_string(),
                message: err.to_string(),
                status_code: 404,
            })
        }
        _ => {
            tracing::error!("{}: {}", context, err);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: context.to_string(),
                message: err.to_string(),
                status_code: 502,
            })
        }
    }
}
