use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::scrum_note_dto::{CreateScrumNoteRequest, ScrumNoteListParams, UpdateScrumNoteRequest};
use super::scrum_note_models::ScrumNote;
use crate::{error::Result, middleware::AuthUser, state::AppState};

/// List scrum notes visible to the authenticated user
#[utoipa::path(
    get,
    path = "/api/scrum-notes",
    params(
        ("user_id" = Option<Uuid>, Query, description = "Filter by author (admin only)"),
        ("date" = Option<String>, Query, description = "Filter by day (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "List of scrum notes", body = [ScrumNote]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "scrum-notes",
    security(("bearer_auth" = []))
)]
pub async fn get_scrum_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ScrumNoteListParams>,
) -> Result<Json<Vec<ScrumNote>>> {
    let notes = state.scrum_note_service.list_notes(user_id, params).await?;
    Ok(Json(notes))
}

/// Get a single scrum note
#[utoipa::path(
    get,
    path = "/api/scrum-notes/{note_id}",
    params(
        ("note_id" = Uuid, Path, description = "Scrum note ID")
    ),
    responses(
        (status = 200, description = "Scrum note found", body = ScrumNote),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Scrum note not found")
    ),
    tag = "scrum-notes",
    security(("bearer_auth" = []))
)]
pub async fn get_scrum_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<Json<ScrumNote>> {
    let note = state.scrum_note_service.get_note(user_id, note_id).await?;
    Ok(Json(note))
}

/// Post today's scrum note
#[utoipa::path(
    post,
    path = "/api/scrum-notes",
    request_body = CreateScrumNoteRequest,
    responses(
        (status = 201, description = "Scrum note created", body = ScrumNote),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A note for this day already exists")
    ),
    tag = "scrum-notes",
    security(("bearer_auth" = []))
)]
pub async fn create_scrum_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateScrumNoteRequest>,
) -> Result<impl IntoResponse> {
    let note = state.scrum_note_service.create_note(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Update a scrum note
#[utoipa::path(
    put,
    path = "/api/scrum-notes/{note_id}",
    params(
        ("note_id" = Uuid, Path, description = "Scrum note ID")
    ),
    request_body = UpdateScrumNoteRequest,
    responses(
        (status = 200, description = "Scrum note updated", body = ScrumNote),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Scrum note not found")
    ),
    tag = "scrum-notes",
    security(("bearer_auth" = []))
)]
pub async fn update_scrum_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(note_id): Path<Uuid>,
    Json(payload): Json<UpdateScrumNoteRequest>,
) -> Result<Json<ScrumNote>> {
    let note = state
        .scrum_note_service
        .update_note(user_id, note_id, payload)
        .await?;
    Ok(Json(note))
}

/// Delete a scrum note
#[utoipa::path(
    delete,
    path = "/api/scrum-notes/{note_id}",
    params(
        ("note_id" = Uuid, Path, description = "Scrum note ID")
    ),
    responses(
        (status = 204, description = "Scrum note deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Scrum note not found")
    ),
    tag = "scrum-notes",
    security(("bearer_auth" = []))
)]
pub async fn delete_scrum_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.scrum_note_service.delete_note(user_id, note_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
