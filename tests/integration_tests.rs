// Integration tests for Intern Match

use intern_match::core::{Ranker, DEFAULT_PAGE_SIZE};
use intern_match::models::{CandidateProfile, MatchResult, OpportunityProfile};
use serde_json::{json, Value};

fn create_internship(id: &str, skills: Value, location: &str) -> OpportunityProfile {
    OpportunityProfile {
        id: Some(id.to_string()),
        title: json!(format!("Internship {}", id)),
        skills_required: skills,
        language_requirements: json!(["english"]),
        location: json!(location),
        requirements: json!("Students pursuing B.Tech or BCA"),
        ..Default::default()
    }
}

fn create_student(skills: Value) -> CandidateProfile {
    CandidateProfile {
        id: Some("student".to_string()),
        skills,
        languages: json!("English"),
        education: json!([{ "degree": "BCA" }]),
        location: json!("Bengaluru"),
        ..Default::default()
    }
}

#[test]
fn test_integration_end_to_end_recommendations() {
    let ranker = Ranker::default();
    let student = create_student(json!(["react", "node", "sql"]));

    let internships = vec![
        create_internship("1", json!(["react", "node"]), "Bengaluru"),   // Full skill match, same city
        create_internship("2", json!(["react", "node"]), "Remote"),      // Full skill match, remote
        create_internship("3", json!(["react", "go"]), "Bengaluru"),     // Half skill match
        create_internship("4", json!(["figma"]), "Bengaluru"),           // No skill match
        create_internship("5", json!(["react", "node"]), "Mumbai"),      // Wrong city
        create_internship("6", json!(["sql"]), "Chennai"),               // Wrong city
        create_internship("7", json!(["photoshop"]), "Delhi"),           // Nothing
        create_internship("8", json!(["react", "node"]), "Bengaluru"),   // Duplicate of 1
    ];

    let page = ranker.recommend_internships(&student, internships);

    assert_eq!(page.total_candidates, 8);
    assert_eq!(page.results.len(), DEFAULT_PAGE_SIZE);

    // Sorted by score
    for i in 1..page.results.len() {
        assert!(
            page.results[i - 1].score >= page.results[i].score,
            "Results not sorted by score"
        );
    }

    // Equal scores keep input order: 1, 2, 8 all score the same
    let top: Vec<&str> = page.results[..3]
        .iter()
        .map(|r| r.item.id.as_deref().unwrap())
        .collect();
    assert_eq!(top, vec!["1", "2", "8"]);
    assert_eq!(page.results[0].score, 85);

    // Lowest scorer falls off the page
    assert!(page.results.iter().all(|r| r.item.id.as_deref() != Some("7")));
}

#[test]
fn test_score_range() {
    let ranker = Ranker::new(50);
    let student = create_student(json!("python, django"));

    let internships: Vec<OpportunityProfile> = (0..30)
        .map(|i| {
            let skills = if i % 2 == 0 { json!(["python"]) } else { json!("django, docker, k8s") };
            create_internship(&i.to_string(), skills, if i % 3 == 0 { "Remote" } else { "Pune" })
        })
        .collect();

    let page = ranker.recommend_internships(&student, internships);

    assert_eq!(page.results.len(), 30);
    for r in &page.results {
        assert!(r.score <= 100, "Score {} is out of range [0, 100]", r.score);
    }
}

#[test]
fn test_max_limit_enforcement() {
    let ranker = Ranker::new(10);
    let student = create_student(json!(["rust"]));

    let internships: Vec<OpportunityProfile> = (0..50)
        .map(|i| create_internship(&i.to_string(), json!(["rust"]), "Remote"))
        .collect();

    let page = ranker.recommend_internships(&student, internships);

    assert_eq!(page.results.len(), 10, "Should not exceed limit of 10");
    assert_eq!(page.total_candidates, 50);
}

#[test]
fn test_degraded_ranking_without_student_data() {
    let ranker = Ranker::default();
    let internships: Vec<OpportunityProfile> = (0..10)
        .map(|i| create_internship(&i.to_string(), json!(["rust"]), "Pune"))
        .collect();

    let page = ranker.recommend_internships(&CandidateProfile::default(), internships);

    let ids: Vec<&str> = page
        .results
        .iter()
        .map(|r| r.item.id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5"]);
    assert!(page.results.iter().all(|r| r.score == 0));
}

#[test]
fn test_stable_ranking_of_mixed_scores() {
    let ranker = Ranker::default();
    let results: Vec<MatchResult<char>> = [('a', 50), ('b', 80), ('c', 50), ('d', 0), ('e', 80)]
        .into_iter()
        .map(|(item, score)| MatchResult::new(item, score))
        .collect();

    for _ in 0..3 {
        let order: String = ranker.rank(results.clone()).into_iter().map(|r| r.item).collect();
        assert_eq!(order, "beacd");
    }
}

#[test]
fn test_rank_candidates_for_internship() {
    let ranker = Ranker::default();
    let internship = create_internship("backend", json!(["go", "postgres"]), "Remote");

    let students = vec![
        create_student(json!(["go"])),
        create_student(json!(["go", "postgres"])),
        create_student(Value::Null),
    ];

    let page = ranker.rank_candidates(&internship, students);

    let counts: Vec<Option<usize>> = page.results.iter().map(|r| r.match_count).collect();
    assert_eq!(counts, vec![Some(2), Some(1), Some(0)]);
    assert!(page.results[0].score > page.results[1].score);
}
