//! Badge awarding from attendance streaks and grade averages.

mod common;

use axum::http::StatusCode;
use campus_core::roles::Role;
use chrono::{Duration, Utc};
use common::{body_json, get_auth, post_auth, post_json_auth, seed_user_with_token};
use serde_json::json;
use sqlx::PgPool;

async fn mark_days(pool: &PgPool, token: &str, user_id: i64, statuses: &[&str]) {
    let today = Utc::now().date_naive();
    for (offset, status) in statuses.iter().enumerate() {
        let date = today - Duration::days(offset as i64);
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/attendance/mark",
            json!({ "user_id": user_id, "status": status, "date": date }),
            token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_week_streak_awards_badge_once(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, s_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    mark_days(&pool, &t_token, student.id, &["present"; 7]).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/achievements/check/attendance", &s_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["streak"]["max"], 7);
    let awarded = json["data"]["awarded"].as_array().unwrap();
    assert_eq!(awarded.len(), 1);
    assert_eq!(awarded[0]["badge_name"], "Week Warrior");
    assert_eq!(awarded[0]["points"], 50);

    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, "/api/v1/achievements/check/attendance", &s_token).await).await;
    assert!(json["data"]["awarded"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/achievements/points", &s_token).await).await;
    assert_eq!(json["data"]["total_points"], 50);
    assert_eq!(json["data"]["badges"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_absence_breaks_the_streak(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, s_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    mark_days(
        &pool,
        &t_token,
        student.id,
        &["present", "present", "late", "absent", "present", "present", "present", "present"],
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(post_auth(app, "/api/v1/achievements/check/attendance", &s_token).await).await;
    assert_eq!(json["data"]["streak"]["max"], 4);
    assert!(json["data"]["awarded"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_academic_badges_stack(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, s_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, "/api/v1/achievements/check/academic", &s_token).await).await;
    assert!(json["data"]["average_percentage"].is_null());
    assert!(json["data"]["awarded"].as_array().unwrap().is_empty());

    for (subject, obtained) in [("Math", 96.0), ("Physics", 98.0)] {
        let app = common::build_test_app(pool.clone());
        post_json_auth(
            app,
            "/api/v1/grades",
            json!({
                "student_id": student.id,
                "subject": subject,
                "obtained_marks": obtained,
                "max_marks": 100.0,
            }),
            &t_token,
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(post_auth(app, "/api/v1/achievements/check/academic", &s_token).await).await;
    let average = json["data"]["average_percentage"].as_f64().unwrap();
    assert!((average - 97.0).abs() < 1e-9);
    let mut names: Vec<&str> = json["data"]["awarded"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["badge_name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Academic Excellence", "Scholar"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_students_cannot_check_for_others(pool: PgPool) {
    let (_ada, ada_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    let (bob, _) = seed_user_with_token(&pool, "bob@school.test", Role::Student).await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/achievements/check/attendance?user_id={}", bob.id);
    let response = post_auth(app, &uri, &ada_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
