use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum NotificationType {
    TaskAssigned,
    TaskStatusUpdated,
    ScrumNoteCreated,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::TaskAssigned => "task_assigned",
            NotificationType::TaskStatusUpdated => "task_status_updated",
            NotificationType::ScrumNoteCreated => "scrum_note_created",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub metadata: serde_json::Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Where the client should land when the notification is clicked.
    /// Derived from the type and metadata, never stored.
    pub fn redirect_url(&self) -> Option<String> {
        match self.notification_type {
            NotificationType::TaskAssigned | NotificationType::TaskStatusUpdated => self
                .metadata
                .get("task_id")
                .and_then(|v| v.as_str())
                .map(|id| format!("/tasks/{id}")),
            NotificationType::ScrumNoteCreated => Some("/scrum-notes".to_string()),
        }
    }
}

/// Everything needed to persist a notification; the id, read flag and
/// timestamp are filled in by the store.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub metadata: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(
        notification_type: NotificationType,
        metadata: serde_json::Value,
    ) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            notification_type,
            title: "title".to_string(),
            message: "message".to_string(),
            metadata,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_task_notifications_redirect_to_the_task() {
        let task_id = Uuid::new_v4();
        let n = notification(
            NotificationType::TaskAssigned,
            json!({ "task_id": task_id.to_string() }),
        );
        assert_eq!(n.redirect_url(), Some(format!("/tasks/{task_id}")));

        let n = notification(
            NotificationType::TaskStatusUpdated,
            json!({ "task_id": task_id.to_string(), "old_status": "TODO", "new_status": "DONE" }),
        );
        assert_eq!(n.redirect_url(), Some(format!("/tasks/{task_id}")));
    }

    #[test]
    fn test_scrum_note_notifications_redirect_to_the_board() {
        let n = notification(
            NotificationType::ScrumNoteCreated,
            json!({ "note_id": Uuid::new_v4().to_string() }),
        );
        assert_eq!(n.redirect_url(), Some("/scrum-notes".to_string()));
    }

    #[test]
    fn test_task_notification_without_task_id_has_no_redirect() {
        let n = notification(NotificationType::TaskAssigned, json!({}));
        assert_eq!(n.redirect_url(), None);
    }
}
