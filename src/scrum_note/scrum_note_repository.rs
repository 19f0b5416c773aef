use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::scrum_note_models::ScrumNote;
use super::scrum_note_store::ScrumNoteStore;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct ScrumNoteRepository {
    pool: PgPool,
}

impl ScrumNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScrumNoteStore for ScrumNoteRepository {
    async fn find_by_id(&self, note_id: Uuid) -> Result<Option<ScrumNote>> {
        let note = sqlx::query_as::<_, ScrumNote>("SELECT * FROM scrum_notes WHERE id = $1")
            .bind(note_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(note)
    }

    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ScrumNote>> {
        let note = sqlx::query_as::<_, ScrumNote>(
            "SELECT * FROM scrum_notes WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    async fn save(&self, note: &ScrumNote) -> Result<ScrumNote> {
        // The (user_id, date) unique constraint backs up the service
        // level duplicate check against concurrent inserts.
        let saved = sqlx::query_as::<_, ScrumNote>(
            "INSERT INTO scrum_notes (id, user_id, date, what_i_did, next_steps, blockers, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                what_i_did = EXCLUDED.what_i_did,
                next_steps = EXCLUDED.next_steps,
                blockers = EXCLUDED.blockers,
                updated_at = EXCLUDED.updated_at
             RETURNING *",
        )
        .bind(note.id)
        .bind(note.user_id)
        .bind(note.date)
        .bind(&note.what_i_did)
        .bind(&note.next_steps)
        .bind(&note.blockers)
        .bind(note.created_at)
        .bind(note.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateNote {
                    user_id: note.user_id,
                    date: note.date,
                }
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(saved)
    }

    async fn delete(&self, note_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM scrum_notes WHERE id = $1")
            .bind(note_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_all(&self) -> Result<Vec<ScrumNote>> {
        let notes = sqlx::query_as::<_, ScrumNote>(
            "SELECT * FROM scrum_notes ORDER BY date DESC, created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<ScrumNote>> {
        let notes = sqlx::query_as::<_, ScrumNote>(
            "SELECT * FROM scrum_notes WHERE user_id = $1 ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<ScrumNote>> {
        let notes = sqlx::query_as::<_, ScrumNote>(
            "SELECT * FROM scrum_notes WHERE date = $1 ORDER BY created_at",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
