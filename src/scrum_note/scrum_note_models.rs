use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A daily standup entry. Each user writes at most one per calendar
/// day; the (user_id, date) pair is unique in storage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScrumNote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub what_i_did: String,
    pub next_steps: String,
    pub blockers: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScrumNote {
    pub fn new(
        user_id: Uuid,
        date: NaiveDate,
        what_i_did: String,
        next_steps: String,
        blockers: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            what_i_did,
            next_steps,
            blockers,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
