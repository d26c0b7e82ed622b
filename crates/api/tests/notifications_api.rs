//! Notification delivery and read tracking.

mod common;

use axum::http::StatusCode;
use campus_core::roles::Role;
use common::{body_json, get_auth, post_auth, post_json_auth, seed_user_with_token};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_send_and_read_tracking(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (ada, ada_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    let (bob, bob_token) = seed_user_with_token(&pool, "bob@school.test", Role::Student).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/notifications/bulk",
        json!({
            "user_ids": [ada.id, bob.id],
            "title": "Field trip",
            "message": "Bring a packed lunch",
        }),
        &t_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["type"], "announcement");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/notifications", &ada_token).await).await;
    let id = json["data"][0]["id"].as_i64().unwrap();
    assert_eq!(json["data"][0]["is_read"], false);

    // Someone else's notification changes nothing.
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/notifications/{id}/read");
    let json = body_json(post_auth(app, &uri, &bob_token).await).await;
    assert_eq!(json["data"]["updated"], 0);

    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, &uri, &ada_token).await).await;
    assert_eq!(json["data"]["updated"], 1);

    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, &uri, &ada_token).await).await;
    assert_eq!(json["data"]["updated"], 0);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/notifications?unread_only=true", &ada_token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, "/api/v1/notifications/read-all", &bob_token).await).await;
    assert_eq!(json["data"]["updated"], 1);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/notifications/unread-count", &bob_token).await).await;
    assert_eq!(json["data"]["unread"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_students_cannot_send(pool: PgPool) {
    let (ada, ada_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/notifications",
        json!({ "user_id": ada.id, "title": "Hi", "message": "Self note" }),
        &ada_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_bulk_is_rejected(pool: PgPool) {
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/notifications/bulk",
        json!({ "user_ids": [], "title": "Hi", "message": "Nobody" }),
        &t_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
