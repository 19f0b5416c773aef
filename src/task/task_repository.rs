use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::task_models::{Task, TaskStatus};
use super::task_store::TaskStore;
use crate::error::Result;

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn find_by_id(&self, task_id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    async fn save(&self, task: &Task) -> Result<Task> {
        // creator_id and created_at are fixed at creation and never
        // overwritten by the upsert.
        let saved = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, description, status, creator_id, assignee_id, deadline, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                status = EXCLUDED.status,
                assignee_id = EXCLUDED.assignee_id,
                deadline = EXCLUDED.deadline,
                updated_at = EXCLUDED.updated_at
             RETURNING *",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.creator_id)
        .bind(task.assignee_id)
        .bind(task.deadline)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn delete(&self, task_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_all(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn find_by_assignee(&self, assignee_id: Uuid) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE assignee_id = $1 ORDER BY created_at DESC",
        )
        .bind(assignee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }
}
