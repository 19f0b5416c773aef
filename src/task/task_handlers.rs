use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::task_dto::{
    AssignTaskRequest, CreateTaskRequest, TaskListParams, UpdateTaskRequest,
    UpdateTaskStatusRequest,
};
use super::task_models::Task;
use crate::{error::Result, middleware::AuthUser, state::AppState};

/// List tasks visible to the authenticated user
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(
        ("status" = Option<String>, Query, description = "Filter by status (todo, in_progress, done)"),
        ("assignee_id" = Option<Uuid>, Query, description = "Filter by assignee (admin only)")
    ),
    responses(
        (status = 200, description = "List of tasks", body = [Task]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_tasks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<TaskListParams>,
) -> Result<Json<Vec<Task>>> {
    let tasks = state.task_service.list_tasks(user_id, params).await?;
    Ok(Json(tasks))
}

/// Get a single task
#[utoipa::path(
    get,
    path = "/api/tasks/{task_id}",
    params(
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task not found")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Task>> {
    let task = state.task_service.get_task(user_id, task_id).await?;
    Ok(Json(task))
}

/// Create a task (admin only)
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse> {
    let task = state.task_service.create_task(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update task title, description or deadline (admin only)
#[utoipa::path(
    put,
    path = "/api/tasks/{task_id}",
    params(
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task not found")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    let task = state
        .task_service
        .update_task(user_id, task_id, payload)
        .await?;
    Ok(Json(task))
}

/// Move a task through its status lifecycle
#[utoipa::path(
    patch,
    path = "/api/tasks/{task_id}/status",
    params(
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn update_task_status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskStatusRequest>,
) -> Result<Json<Task>> {
    let task = state
        .task_service
        .update_task_status(user_id, task_id, payload.status)
        .await?;
    Ok(Json(task))
}

/// Assign a task to a user (admin only)
#[utoipa::path(
    patch,
    path = "/api/tasks/{task_id}/assignee",
    params(
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = AssignTaskRequest,
    responses(
        (status = 200, description = "Task assigned", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task or user not found"),
        (status = 409, description = "Task cannot be assigned")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn assign_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<AssignTaskRequest>,
) -> Result<Json<Task>> {
    let task = state
        .task_service
        .assign_task(user_id, task_id, payload.assignee_id)
        .await?;
    Ok(Json(task))
}

/// Delete a task (admin only)
#[utoipa::path(
    delete,
    path = "/api/tasks/{task_id}",
    params(
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task not found")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.task_service.delete_task(user_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
