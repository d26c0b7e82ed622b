//! Handlers for in-app notifications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::types::DbId;
use campus_db::models::notification::{
    CreateBulkNotification, CreateNotification, Notification,
};
use campus_db::repositories::NotificationRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UnreadFilter {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    /// Rows that flipped from unread to read.
    pub updated: u64,
}

/// GET /api/v1/notifications?unread_only=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<UnreadFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let user_id = user.authorize(Resource::Notification, Operation::Read, None)?;
    let (limit, offset) = page.resolve();

    let notifications =
        NotificationRepo::list_for_user(&state.pool, user_id, filter.unread_only, limit, offset)
            .await?;
    tracing::debug!(user_id, count = notifications.len(), "Listed notifications");
    Ok(Json(DataResponse::new(notifications)))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let user_id = user.authorize(Resource::Notification, Operation::Read, None)?;
    let unread = NotificationRepo::unread_count(&state.pool, user_id).await?;
    Ok(Json(DataResponse::new(UnreadCount { unread })))
}

/// POST /api/v1/notifications/{id}/read
///
/// Marking an already-read (or someone else's) notification updates nothing.
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let user_id = user.authorize(Resource::Notification, Operation::Update, None)?;
    let changed = NotificationRepo::mark_read(&state.pool, id, user_id).await?;
    Ok(Json(DataResponse::new(MarkedRead {
        updated: u64::from(changed),
    })))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let user_id = user.authorize(Resource::Notification, Operation::Update, None)?;
    let updated = NotificationRepo::mark_all_read(&state.pool, user_id).await?;
    tracing::info!(user_id, updated, "Marked all notifications read");
    Ok(Json(DataResponse::new(MarkedRead { updated })))
}

/// POST /api/v1/notifications
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    staff.authorize(Resource::Notification, Operation::Create, Some(input.user_id))?;
    input.validate()?;

    let notification = NotificationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        sender_id = staff.user_id,
        user_id = notification.user_id,
        notification_id = notification.id,
        "Notification sent",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(notification))))
}

/// POST /api/v1/notifications/bulk
///
/// Send one message to many users in a single insert.
pub async fn create_bulk(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateBulkNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Notification>>>)> {
    input.validate()?;
    for user_id in &input.user_ids {
        staff.authorize(Resource::Notification, Operation::Create, Some(*user_id))?;
    }

    let notifications = NotificationRepo::create_bulk(&state.pool, &input).await?;
    tracing::info!(sender_id = staff.user_id, count = notifications.len(), "Bulk notification sent");
    Ok((StatusCode::CREATED, Json(DataResponse::new(notifications))))
}
