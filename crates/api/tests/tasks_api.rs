//! Task assignment, assignee self-service and statistics.

mod common;

use axum::http::StatusCode;
use campus_core::roles::Role;
use chrono::{Duration, Utc};
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_auth, post_json_auth,
    seed_user_with_token,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn assign(pool: &PgPool, token: &str, body: Value) -> (StatusCode, Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/tasks", body, token).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assign_notifies_and_lists_for_both_sides(pool: PgPool) {
    let (teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, s_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    let (status, json) = assign(
        &pool,
        &t_token,
        json!({ "title": "Essay", "assigned_to": student.id, "category": "career" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["priority"], "medium");
    assert_eq!(json["data"]["assigned_by"], teacher.id);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/tasks", &s_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/tasks/assigned", &t_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/tasks/assigned", &s_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/notifications", &s_token).await).await;
    assert_eq!(json["data"][0]["type"], "task");
    assert_eq!(json["data"][0]["message"], "Essay");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignee_may_only_change_status(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, s_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    let (_, json) = assign(&pool, &t_token, json!({ "title": "Lab", "assigned_to": student.id })).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/tasks/{id}");

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &uri,
        json!({ "kind": "priority", "priority": "low" }),
        &s_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &uri,
        json!({ "kind": "status", "status": "in_progress" }),
        &s_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "in_progress");
    assert!(json["data"]["completed_at"].is_null());

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("{uri}/complete"), &s_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "completed");
    assert!(json["data"]["completed_at"].is_string());

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &s_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &t_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_students_tasks_are_hidden(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (ada, _) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    let (_bob, bob_token) = seed_user_with_token(&pool, "bob@school.test", Role::Student).await;
    let (_, json) = assign(&pool, &t_token, json!({ "title": "Lab", "assigned_to": ada.id })).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/tasks/{id}/complete"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/tasks?user_id={}", ada.id), &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_count_overdue(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, s_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    let yesterday = Utc::now() - Duration::days(1);
    let next_week = Utc::now() + Duration::days(7);

    assign(&pool, &t_token, json!({ "title": "Late", "assigned_to": student.id, "due_date": yesterday })).await;
    assign(&pool, &t_token, json!({ "title": "Soon", "assigned_to": student.id, "due_date": next_week })).await;
    assign(&pool, &t_token, json!({ "title": "Whenever", "assigned_to": student.id })).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/tasks", &s_token).await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Late", "Soon", "Whenever"]);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/tasks/stats", &s_token).await).await;
    assert_eq!(json["data"]["total"], 3);
    assert_eq!(json["data"]["pending"], 3);
    assert_eq!(json["data"]["overdue"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_is_rejected(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, _) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    let (status, json) = assign(&pool, &t_token, json!({ "title": "", "assigned_to": student.id })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
