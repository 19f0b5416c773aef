use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::notification::notification_factory;
use crate::notification::notifier::Notifier;
use crate::policy;
use crate::task::task_dto::{CreateTaskRequest, TaskListParams, UpdateTaskRequest};
use crate::task::task_models::{Task, TaskStatus};
use crate::task::task_store::TaskStore;
use crate::user::user_models::User;
use crate::user::user_store::UserLookup;

/// Task business logic: authorization, the status state machine, and
/// the notification side effects that hang off assignment and status
/// changes. Persistence failures abort the operation; notification
/// failures never do.
#[derive(Clone)]
pub struct TaskService {
    users: Arc<dyn UserLookup>,
    tasks: Arc<dyn TaskStore>,
    notifier: Notifier,
}

impl TaskService {
    pub fn new(users: Arc<dyn UserLookup>, tasks: Arc<dyn TaskStore>, notifier: Notifier) -> Self {
        Self {
            users,
            tasks,
            notifier,
        }
    }

    pub async fn create_task(&self, actor_id: Uuid, payload: CreateTaskRequest) -> Result<Task> {
        let actor = self.load_actor(actor_id).await?;
        policy::ensure_can_create_task(&actor)?;

        payload.validate()?;
        validate_deadline(payload.deadline)?;

        let task = Task::new(payload.title, payload.description, actor.id, payload.deadline);
        let saved = self.tasks.save(&task).await?;

        tracing::info!("Task {} created by {}", saved.id, actor.username);

        Ok(saved)
    }

    pub async fn update_task(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        payload: UpdateTaskRequest,
    ) -> Result<Task> {
        let actor = self.load_actor(actor_id).await?;
        policy::ensure_can_modify_task_details(&actor)?;

        payload.validate()?;
        validate_deadline(payload.deadline)?;

        let mut task = self.load_task(task_id).await?;

        if let Some(title) = payload.title {
            task.title = title;
        }
        if let Some(description) = payload.description {
            task.description = description;
        }
        if let Some(deadline) = payload.deadline {
            task.deadline = Some(deadline);
        }
        task.touch();

        self.tasks.save(&task).await
    }

    pub async fn update_task_status(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        next: TaskStatus,
    ) -> Result<Task> {
        let actor = self.load_actor(actor_id).await?;
        let mut task = self.load_task(task_id).await?;
        policy::ensure_can_change_task_status(&actor, &task)?;

        let old = task.status;
        task.transition_to(next)?;
        let saved = self.tasks.save(&task).await?;

        // Tell the creator, unless they made the change themselves or
        // the status did not actually move.
        if old != saved.status && saved.creator_id != actor.id {
            self.notifier
                .notify(notification_factory::task_status_updated(
                    saved.creator_id,
                    &saved,
                    old,
                    &actor,
                ))
                .await;
        }

        Ok(saved)
    }

    pub async fn assign_task(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        assignee_id: Uuid,
    ) -> Result<Task> {
        let actor = self.load_actor(actor_id).await?;
        policy::ensure_can_assign_task(&actor)?;

        let mut task = self.load_task(task_id).await?;
        if task.status == TaskStatus::Done {
            return Err(AppError::NotAssignable(
                "task is already done".to_string(),
            ));
        }

        let assignee =
            self.users
                .find_by_id(assignee_id)
                .await?
                .ok_or(AppError::NotFound {
                    kind: "user",
                    id: assignee_id,
                })?;
        if !assignee.active {
            return Err(AppError::NotAssignable(
                "assignee is deactivated".to_string(),
            ));
        }

        task.assign(assignee.id);
        let saved = self.tasks.save(&task).await?;

        // The previous assignee is not told; only the new one, and
        // never the admin assigning work to themselves.
        if assignee.id != actor.id {
            self.notifier
                .notify(notification_factory::task_assigned(
                    assignee.id,
                    &saved,
                    &actor,
                ))
                .await;
        }

        Ok(saved)
    }

    pub async fn delete_task(&self, actor_id: Uuid, task_id: Uuid) -> Result<()> {
        let actor = self.load_actor(actor_id).await?;
        policy::ensure_can_delete_task(&actor)?;

        let task = self.load_task(task_id).await?;
        self.tasks.delete(task.id).await?;

        tracing::info!("Task {} deleted by {}", task.id, actor.username);

        Ok(())
    }

    pub async fn get_task(&self, actor_id: Uuid, task_id: Uuid) -> Result<Task> {
        let actor = self.load_actor(actor_id).await?;
        let task = self.load_task(task_id).await?;
        policy::ensure_can_view_task(&actor, &task)?;

        Ok(task)
    }

    /// Admins see the whole board and may filter freely; interns only
    /// ever see their own assignments.
    pub async fn list_tasks(&self, actor_id: Uuid, params: TaskListParams) -> Result<Vec<Task>> {
        let actor = self.load_actor(actor_id).await?;

        if actor.is_admin() {
            let mut tasks = match (params.assignee_id, params.status) {
                (Some(assignee_id), _) => {
                    if !self.users.exists(assignee_id).await? {
                        return Err(AppError::NotFound {
                            kind: "user",
                            id: assignee_id,
                        });
                    }
                    self.tasks.find_by_assignee(assignee_id).await?
                }
                (None, Some(status)) => self.tasks.find_by_status(status).await?,
                (None, None) => self.tasks.find_all().await?,
            };
            if let Some(status) = params.status {
                tasks.retain(|t| t.status == status);
            }
            return Ok(tasks);
        }

        if let Some(assignee_id) = params.assignee_id {
            if assignee_id != actor.id {
                return Err(AppError::Unauthorized {
                    actor: actor.id,
                    action: "list tasks assigned to other users",
                });
            }
        }

        let mut tasks = self.tasks.find_by_assignee(actor.id).await?;
        if let Some(status) = params.status {
            tasks.retain(|t| t.status == status);
        }
        Ok(tasks)
    }

    async fn load_actor(&self, actor_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(actor_id)
            .await?
            .ok_or(AppError::NotFound {
                kind: "user",
                id: actor_id,
            })
    }

    async fn load_task(&self, task_id: Uuid) -> Result<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(AppError::NotFound {
                kind: "task",
                id: task_id,
            })
    }
}

fn validate_deadline(deadline: Option<NaiveDate>) -> Result<()> {
    if let Some(date) = deadline {
        if date < Utc::now().date_naive() {
            return Err(AppError::Validation {
                field: "deadline".to_string(),
                reason: "deadline cannot be in the past".to_string(),
            });
        }
    }
    Ok(())
}
