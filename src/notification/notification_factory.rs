//! Builders for every notification the system emits. Centralizing the
//! wording and metadata keys keeps the client contract in one place.

use serde_json::json;
use uuid::Uuid;

use super::notification_models::{NewNotification, NotificationType};
use crate::scrum_note::scrum_note_models::ScrumNote;
use crate::task::task_models::{Task, TaskStatus};
use crate::user::user_models::User;

pub fn task_assigned(recipient_id: Uuid, task: &Task, actor: &User) -> NewNotification {
    NewNotification {
        recipient_id,
        notification_type: NotificationType::TaskAssigned,
        title: "New Task Assigned".to_string(),
        message: format!("{} assigned you a new task: {}", actor.username, task.title),
        metadata: json!({
            "task_id": task.id.to_string(),
            "task_title": task.title,
            "actor_id": actor.id.to_string(),
            "actor_name": actor.username,
        }),
    }
}

/// `old` is the status before the move; the new status is read off the
/// task itself.
pub fn task_status_updated(
    recipient_id: Uuid,
    task: &Task,
    old: TaskStatus,
    actor: &User,
) -> NewNotification {
    NewNotification {
        recipient_id,
        notification_type: NotificationType::TaskStatusUpdated,
        title: "Task Status Updated".to_string(),
        message: format!(
            "{} moved \"{}\" from {} to {}",
            actor.username,
            task.title,
            old.as_str(),
            task.status.as_str()
        ),
        metadata: json!({
            "task_id": task.id.to_string(),
            "task_title": task.title,
            "old_status": old.as_str(),
            "new_status": task.status.as_str(),
            "actor_id": actor.id.to_string(),
            "actor_name": actor.username,
        }),
    }
}

pub fn scrum_note_created(recipient_id: Uuid, note: &ScrumNote, author: &User) -> NewNotification {
    NewNotification {
        recipient_id,
        notification_type: NotificationType::ScrumNoteCreated,
        title: "New Scrum Note".to_string(),
        message: format!("{} posted a scrum note for {}", author.username, note.date),
        metadata: json!({
            "scrum_note_id": note.id.to_string(),
            "actor_id": author.id.to_string(),
            "actor_name": author.username,
            "date": note.date.to_string(),
        }),
    }
}
