//! In-memory store fakes and builders shared by the service tests.
//! They honor the same contracts as the Postgres repositories,
//! including the duplicate-note rule, so services under test cannot
//! tell the difference.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::notification::notification_models::{NewNotification, Notification};
use crate::notification::notification_store::NotificationStore;
use crate::scrum_note::scrum_note_models::ScrumNote;
use crate::scrum_note::scrum_note_store::ScrumNoteStore;
use crate::task::task_models::{Task, TaskStatus};
use crate::task::task_store::TaskStore;
use crate::user::user_models::{Role, User};
use crate::user::user_store::UserLookup;

pub fn admin(name: &str) -> User {
    user(name, Role::Admin)
}

pub fn intern(name: &str) -> User {
    user(name, Role::Intern)
}

fn user(name: &str, role: Role) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password_hash: None,
        role,
        active: true,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: DashMap<Uuid, User>,
    fail_role_lookups: AtomicBool,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> User {
        self.users.insert(user.id, user.clone());
        user
    }

    /// Make `find_all_active_by_role` fail, for exercising the
    /// best-effort fan-out path.
    pub fn fail_role_lookups(&self) {
        self.fail_role_lookups.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserLookup for InMemoryUsers {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&user_id).map(|u| u.value().clone()))
    }

    async fn find_all_active_by_role(&self, role: Role) -> Result<Vec<User>> {
        if self.fail_role_lookups.load(Ordering::SeqCst) {
            return Err(AppError::InternalError);
        }
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|e| e.value().role == role && e.value().active)
            .map(|e| e.value().clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[derive(Default)]
pub struct InMemoryTasks {
    tasks: DashMap<Uuid, Task>,
}

impl InMemoryTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, task_id: Uuid) -> Option<Task> {
        self.tasks.get(&task_id).map(|t| t.value().clone())
    }

    pub fn all(&self) -> Vec<Task> {
        self.tasks.iter().map(|e| e.value().clone()).collect()
    }
}

#[async_trait]
impl TaskStore for InMemoryTasks {
    async fn find_by_id(&self, task_id: Uuid) -> Result<Option<Task>> {
        Ok(self.get(task_id))
    }

    async fn save(&self, task: &Task) -> Result<Task> {
        self.tasks.insert(task.id, task.clone());
        Ok(task.clone())
    }

    async fn delete(&self, task_id: Uuid) -> Result<u64> {
        Ok(self.tasks.remove(&task_id).map(|_| 1).unwrap_or(0))
    }

    async fn find_all(&self) -> Result<Vec<Task>> {
        let mut tasks = self.all();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|e| e.value().status == status)
            .map(|e| e.value().clone())
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn find_by_assignee(&self, assignee_id: Uuid) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|e| e.value().assignee_id == Some(assignee_id))
            .map(|e| e.value().clone())
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }
}

#[derive(Default)]
pub struct InMemoryScrumNotes {
    notes: DashMap<Uuid, ScrumNote>,
}

impl InMemoryScrumNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, note_id: Uuid) -> Option<ScrumNote> {
        self.notes.get(&note_id).map(|n| n.value().clone())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }
}

#[async_trait]
impl ScrumNoteStore for InMemoryScrumNotes {
    async fn find_by_id(&self, note_id: Uuid) -> Result<Option<ScrumNote>> {
        Ok(self.get(note_id))
    }

    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ScrumNote>> {
        Ok(self
            .notes
            .iter()
            .find(|e| e.value().user_id == user_id && e.value().date == date)
            .map(|e| e.value().clone()))
    }

    async fn save(&self, note: &ScrumNote) -> Result<ScrumNote> {
        let collision = self.notes.iter().any(|e| {
            e.value().id != note.id
                && e.value().user_id == note.user_id
                && e.value().date == note.date
        });
        if collision {
            return Err(AppError::DuplicateNote {
                user_id: note.user_id,
                date: note.date,
            });
        }
        self.notes.insert(note.id, note.clone());
        Ok(note.clone())
    }

    async fn delete(&self, note_id: Uuid) -> Result<u64> {
        Ok(self.notes.remove(&note_id).map(|_| 1).unwrap_or(0))
    }

    async fn find_all(&self) -> Result<Vec<ScrumNote>> {
        let mut notes: Vec<ScrumNote> = self.notes.iter().map(|e| e.value().clone()).collect();
        notes.sort_by(|a, b| b.date.cmp(&a.date).then(a.created_at.cmp(&b.created_at)));
        Ok(notes)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<ScrumNote>> {
        let mut notes: Vec<ScrumNote> = self
            .notes
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        notes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(notes)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<ScrumNote>> {
        let mut notes: Vec<ScrumNote> = self
            .notes
            .iter()
            .filter(|e| e.value().date == date)
            .map(|e| e.value().clone())
            .collect();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(notes)
    }
}

#[derive(Default)]
pub struct InMemoryNotifications {
    saved: Mutex<Vec<Notification>>,
    fail_for: Mutex<Option<Uuid>>,
}

impl InMemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `save` fail for one recipient, for exercising the
    /// best-effort delivery path.
    pub fn fail_for(&self, recipient_id: Uuid) {
        *self.fail_for.lock().unwrap() = Some(recipient_id);
    }

    pub fn for_recipient(&self, recipient_id: Uuid) -> Vec<Notification> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.saved.lock().unwrap().clear();
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotifications {
    async fn save(&self, new: &NewNotification) -> Result<Notification> {
        if *self.fail_for.lock().unwrap() == Some(new.recipient_id) {
            return Err(AppError::InternalError);
        }

        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id: new.recipient_id,
            notification_type: new.notification_type,
            title: new.title.clone(),
            message: new.message.clone(),
            metadata: new.metadata.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.saved.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn mark_as_read(&self, id: Uuid, recipient_id: Uuid) -> Result<Option<Notification>> {
        let mut saved = self.saved.lock().unwrap();
        Ok(saved
            .iter_mut()
            .find(|n| n.id == id && n.recipient_id == recipient_id)
            .map(|n| {
                n.is_read = true;
                n.clone()
            }))
    }

    async fn mark_all_as_read(&self, recipient_id: Uuid) -> Result<u64> {
        let mut saved = self.saved.lock().unwrap();
        let mut flipped = 0;
        for n in saved
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
        {
            n.is_read = true;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn unread_count(&self, recipient_id: Uuid) -> Result<i64> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as i64)
    }
}
