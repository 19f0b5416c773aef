use async_trait::async_trait;
use uuid::Uuid;

use super::user_models::{Role, User};
use crate::error::Result;

/// Read-only view of the user directory, as needed by the task and
/// scrum note services. The Postgres repository implements this; tests
/// substitute an in-memory map.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// All active users holding `role`, for notification fan-out.
    async fn find_all_active_by_role(&self, role: Role) -> Result<Vec<User>>;

    async fn exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.find_by_id(user_id).await?.is_some())
    }
}
