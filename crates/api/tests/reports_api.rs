//! Report snapshots and CSV export.

mod common;

use axum::http::{header, StatusCode};
use campus_core::roles::Role;
use common::{
    body_json, body_text, delete_auth, get_auth, post_json_auth, seed_user_with_token,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_generates_grade_report_and_downloads_csv(pool: PgPool) {
    let (_admin, a_token) = seed_user_with_token(&pool, "admin@school.test", Role::Admin).await;
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (student, _) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    for (subject, obtained) in [("Math", 45.0), ("History, Modern", 30.0)] {
        let app = common::build_test_app(pool.clone());
        post_json_auth(
            app,
            "/api/v1/grades",
            json!({
                "student_id": student.id,
                "subject": subject,
                "obtained_marks": obtained,
                "max_marks": 50.0,
            }),
            &t_token,
        )
        .await;
    }

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/reports/grades",
        json!({ "student_id": student.id }),
        &a_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["report_type"], "grades");
    assert_eq!(json["data"]["data"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["data"]["columns"][0], "id");
    assert_eq!(json["data"]["data"]["columns"][2], "subject");

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/reports/{id}/csv"), &a_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"grades_report_{id}.csv\"").as_str()
    );

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "id,student_id,subject,obtained_marks,max_marks,grade,exam_type,semester,\
         academic_year,teacher_id,created_at,updated_at"
    );
    assert!(csv.contains("\"History, Modern\""));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attendance_report_carries_stats(pool: PgPool) {
    let (_admin, a_token) = seed_user_with_token(&pool, "admin@school.test", Role::Admin).await;
    let (student, _) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    for (date, status) in [("2026-03-02", "present"), ("2026-03-03", "absent")] {
        let app = common::build_test_app(pool.clone());
        post_json_auth(
            app,
            "/api/v1/attendance/mark",
            json!({ "user_id": student.id, "status": status, "date": date }),
            &a_token,
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/reports/attendance",
        json!({ "user_id": student.id, "from": "2026-03-01", "to": "2026-03-31" }),
        &a_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], student.id);
    assert_eq!(json["data"]["data"]["filters"]["from"], "2026-03-01");
    assert_eq!(json["data"]["data"]["stats"]["total"], 2);
    assert_eq!(json["data"]["data"]["stats"]["percentage"], 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_admins_generate_and_staff_read(pool: PgPool) {
    let (_admin, a_token) = seed_user_with_token(&pool, "admin@school.test", Role::Admin).await;
    let (_teacher, t_token) = seed_user_with_token(&pool, "t@school.test", Role::Teacher).await;
    let (_student, s_token) = seed_user_with_token(&pool, "ada@school.test", Role::Student).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/reports/tasks", json!({}), &t_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/reports/tasks", json!({}), &a_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/reports", &t_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/reports", &s_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/reports/{id}"), &t_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/reports/{id}"), &a_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/reports/{id}/csv"), &a_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
