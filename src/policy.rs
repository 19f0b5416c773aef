//! Role checks shared by the task and scrum note services.
//!
//! Admins manage the board; interns act only on what belongs to them:
//! tasks they are assigned and notes they wrote.

use crate::error::{AppError, Result};
use crate::scrum_note::scrum_note_models::ScrumNote;
use crate::task::task_models::Task;
use crate::user::user_models::{Role, User};

pub fn can_create_task(role: Role) -> bool {
    role.is_admin()
}

pub fn can_modify_task_details(role: Role) -> bool {
    role.is_admin()
}

pub fn can_delete_task(role: Role) -> bool {
    role.is_admin()
}

pub fn can_assign_task(role: Role) -> bool {
    role.is_admin()
}

pub fn can_change_task_status(actor: &User, task: &Task) -> bool {
    actor.is_admin() || task.assignee_id == Some(actor.id)
}

pub fn can_view_task(actor: &User, task: &Task) -> bool {
    actor.is_admin() || task.assignee_id == Some(actor.id)
}

pub fn can_modify_scrum_note(actor: &User, note: &ScrumNote) -> bool {
    actor.is_admin() || note.user_id == actor.id
}

pub fn can_delete_scrum_note(actor: &User, note: &ScrumNote) -> bool {
    actor.is_admin() || note.user_id == actor.id
}

pub fn can_view_scrum_note(actor: &User, note: &ScrumNote) -> bool {
    actor.is_admin() || note.user_id == actor.id
}

pub fn ensure_can_create_task(actor: &User) -> Result<()> {
    if can_create_task(actor.role) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "create tasks",
        })
    }
}

pub fn ensure_can_modify_task_details(actor: &User) -> Result<()> {
    if can_modify_task_details(actor.role) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "modify task details",
        })
    }
}

pub fn ensure_can_delete_task(actor: &User) -> Result<()> {
    if can_delete_task(actor.role) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "delete tasks",
        })
    }
}

pub fn ensure_can_assign_task(actor: &User) -> Result<()> {
    if can_assign_task(actor.role) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "assign tasks",
        })
    }
}

pub fn ensure_can_change_task_status(actor: &User, task: &Task) -> Result<()> {
    if can_change_task_status(actor, task) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "change the status of this task",
        })
    }
}

pub fn ensure_can_view_task(actor: &User, task: &Task) -> Result<()> {
    if can_view_task(actor, task) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "view this task",
        })
    }
}

pub fn ensure_can_modify_scrum_note(actor: &User, note: &ScrumNote) -> Result<()> {
    if can_modify_scrum_note(actor, note) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "modify this scrum note",
        })
    }
}

pub fn ensure_can_delete_scrum_note(actor: &User, note: &ScrumNote) -> Result<()> {
    if can_delete_scrum_note(actor, note) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "delete this scrum note",
        })
    }
}

pub fn ensure_can_view_scrum_note(actor: &User, note: &ScrumNote) -> Result<()> {
    if can_view_scrum_note(actor, note) {
        Ok(())
    } else {
        Err(AppError::Unauthorized {
            actor: actor.id,
            action: "view this scrum note",
        })
    }
}
