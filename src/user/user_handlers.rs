use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::AppState,
    user::user_dto::{UpdateActiveStatusRequest, UpdateRoleRequest},
    user::user_models::UserResponse,
};

/// Get current user profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "User profile retrieved successfully", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound {
            kind: "user",
            id: user_id,
        })?;

    Ok((StatusCode::OK, Json(UserResponse::from(user))))
}

// Admin endpoints

/// Get all users (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "Users retrieved successfully", body = [UserResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_all_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_repository.find_all().await?;

    let responses: Vec<UserResponse> = users.into_iter().map(|u| u.into()).collect();

    Ok((StatusCode::OK, Json(responses)))
}

/// Update user role (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/users/{user_id}/role",
    tag = "admin",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "User role updated successfully", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_repository
        .update_role(user_id, payload.role)
        .await?
        .ok_or(AppError::NotFound {
            kind: "user",
            id: user_id,
        })?;

    tracing::info!("User {} role changed to {}", user.id, user.role);

    Ok((StatusCode::OK, Json(UserResponse::from(user))))
}

/// Activate or deactivate a user (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/users/{user_id}/status",
    tag = "admin",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateActiveStatusRequest,
    responses(
        (status = 200, description = "User status updated successfully", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateActiveStatusRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_repository
        .update_active_status(user_id, payload.active)
        .await?
        .ok_or(AppError::NotFound {
            kind: "user",
            id: user_id,
        })?;

    Ok((StatusCode::OK, Json(UserResponse::from(user))))
}
