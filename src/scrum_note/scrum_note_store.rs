use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::scrum_note_models::ScrumNote;
use crate::error::Result;

/// Persistence contract for scrum notes. Implementations must enforce
/// the one-note-per-user-per-day rule: `save` of a new note colliding
/// with an existing (user_id, date) pair fails with `DuplicateNote`.
#[async_trait]
pub trait ScrumNoteStore: Send + Sync {
    async fn find_by_id(&self, note_id: Uuid) -> Result<Option<ScrumNote>>;

    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ScrumNote>>;

    async fn save(&self, note: &ScrumNote) -> Result<ScrumNote>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete(&self, note_id: Uuid) -> Result<u64>;

    async fn find_all(&self) -> Result<Vec<ScrumNote>>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<ScrumNote>>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<ScrumNote>>;
}
