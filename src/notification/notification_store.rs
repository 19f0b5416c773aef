use async_trait::async_trait;
use uuid::Uuid;

use super::notification_models::{NewNotification, Notification};
use crate::error::Result;

/// Persistence contract for notifications: `save` sits on the notify
/// hot path, the rest is the read-state lifecycle. Marking a
/// notification read must be idempotent and scoped to its recipient.
/// Listing and retention cleanup stay on the Postgres repository's
/// inherent methods.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn save(&self, new: &NewNotification) -> Result<Notification>;

    /// Flips `is_read` and returns the updated row; `None` when the id
    /// does not exist or belongs to another recipient. Marking an
    /// already-read notification returns the same row again.
    async fn mark_as_read(&self, id: Uuid, recipient_id: Uuid) -> Result<Option<Notification>>;

    /// Returns the number of rows flipped from unread to read.
    async fn mark_all_as_read(&self, recipient_id: Uuid) -> Result<u64>;

    async fn unread_count(&self, recipient_id: Uuid) -> Result<i64>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notification::notification_models::NotificationType;
    use crate::test_support::InMemoryNotifications;
    use serde_json::json;

    fn store() -> Arc<dyn NotificationStore> {
        Arc::new(InMemoryNotifications::new())
    }

    fn new_notification(recipient_id: Uuid) -> NewNotification {
        NewNotification {
            recipient_id,
            notification_type: NotificationType::TaskAssigned,
            title: "New task".to_string(),
            message: "You were assigned a task".to_string(),
            metadata: json!({ "task_id": Uuid::new_v4().to_string() }),
        }
    }

    #[tokio::test]
    async fn test_marking_a_read_notification_again_returns_the_same_row() {
        let store = store();
        let recipient = Uuid::new_v4();
        let saved = store.save(&new_notification(recipient)).await.unwrap();
        assert!(!saved.is_read);

        let first = store
            .mark_as_read(saved.id, recipient)
            .await
            .unwrap()
            .unwrap();
        assert!(first.is_read);

        let second = store
            .mark_as_read(saved.id, recipient)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.id, first.id);
        assert!(second.is_read);
        assert_eq!(store.unread_count(recipient).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_as_read_is_scoped_to_the_recipient() {
        let store = store();
        let recipient = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let saved = store.save(&new_notification(recipient)).await.unwrap();

        assert!(store
            .mark_as_read(saved.id, stranger)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .mark_as_read(Uuid::new_v4(), recipient)
            .await
            .unwrap()
            .is_none());

        // The stranger's attempt left the row untouched.
        assert_eq!(store.unread_count(recipient).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_all_as_read_flips_only_the_recipients_unread_rows() {
        let store = store();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let first = store.save(&new_notification(alice)).await.unwrap();
        store.save(&new_notification(alice)).await.unwrap();
        store.save(&new_notification(bob)).await.unwrap();

        store.mark_as_read(first.id, alice).await.unwrap();

        assert_eq!(store.mark_all_as_read(alice).await.unwrap(), 1);
        assert_eq!(store.unread_count(alice).await.unwrap(), 0);
        assert_eq!(store.unread_count(bob).await.unwrap(), 1);
    }
}
