//! Private daily routines.

mod common;

use axum::http::StatusCode;
use campus_core::roles::Role;
use common::{body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, seed_user_with_token};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_routine_lifecycle(pool: PgPool) {
    let (user, token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/routines",
        json!({ "day_of_week": 1, "time_slot": "07:00:00", "activity": "Run" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user.id);
    let id = json["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/routines/{id}");

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &uri,
        json!({ "kind": "activity", "activity": "Swim", "description": "50 lengths" }),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["activity"], "Swim");

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &uri,
        json!({ "kind": "slot", "day_of_week": 8, "time_slot": "07:00:00" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/routines", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_users_routines_are_not_found(pool: PgPool) {
    let (_ada, ada_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;
    let (_bob, bob_token) = seed_user_with_token(&pool, "bob@school.test", Role::Student).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/routines",
        json!({ "day_of_week": 2, "time_slot": "18:30:00", "activity": "Piano" }),
        &ada_token,
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/routines/{id}"),
        json!({ "kind": "activity", "activity": "Nap" }),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/routines/{id}"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_activity_is_rejected(pool: PgPool) {
    let (_user, token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/routines",
        json!({ "day_of_week": 0, "time_slot": "09:00:00", "activity": "" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
