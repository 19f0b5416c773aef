use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Gate for admin-only routes. The role is read from the database
/// rather than the token so a demotion takes effect immediately.
pub async fn admin_only(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Authentication("Invalid credentials".to_string()))?;

    if !user.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}
