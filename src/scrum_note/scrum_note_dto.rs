use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScrumNoteRequest {
    /// Defaults to the current UTC day when omitted.
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 2000))]
    pub what_i_did: String,
    #[validate(length(min = 1, max = 2000))]
    pub next_steps: String,
    #[validate(length(max = 2000))]
    pub blockers: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScrumNoteRequest {
    #[validate(length(min = 1, max = 2000))]
    pub what_i_did: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub next_steps: Option<String>,
    /// An empty string clears the blockers field.
    #[validate(length(max = 2000))]
    pub blockers: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScrumNoteListParams {
    pub user_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
}
