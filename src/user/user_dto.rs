use serde::Deserialize;
use utoipa::ToSchema;

use super::user_models::Role;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateActiveStatusRequest {
    pub active: bool,
}
