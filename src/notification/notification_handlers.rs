use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::notification_dto::{NotificationResponse, UnreadCountResponse};
use super::notification_store::NotificationStore;
use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::AppState,
};

/// List the authenticated user's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "List of notifications", body = [NotificationResponse]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_repository
        .find_all_by_recipient(user_id)
        .await?;

    let responses: Vec<NotificationResponse> =
        notifications.into_iter().map(|n| n.into()).collect();

    Ok(Json(responses))
}

/// Count unread notifications
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Unread notification count", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UnreadCountResponse>> {
    let unread = state.notification_repository.unread_count(user_id).await?;

    Ok(Json(UnreadCountResponse { unread }))
}

/// Mark one notification as read
#[utoipa::path(
    patch,
    path = "/api/notifications/{notification_id}/read",
    params(
        ("notification_id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = NotificationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<NotificationResponse>> {
    let notification = state
        .notification_repository
        .mark_as_read(notification_id, user_id)
        .await?
        .ok_or(AppError::NotFound {
            kind: "notification",
            id: notification_id,
        })?;

    Ok(Json(notification.into()))
}

/// Mark every notification as read
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    responses(
        (status = 204, description = "All notifications marked as read"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    state
        .notification_repository
        .mark_all_as_read(user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
