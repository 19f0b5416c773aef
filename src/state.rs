use std::sync::Arc;

use crate::auth::AuthService;
use crate::notification::NotificationRepository;
use crate::scrum_note::ScrumNoteService;
use crate::task::TaskService;
use crate::user::UserRepository;
use crate::websocket::NotificationChannel;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub channel: NotificationChannel,
    pub user_repository: UserRepository,
    pub notification_repository: NotificationRepository,
    pub auth_service: AuthService,
    pub task_service: TaskService,
    pub scrum_note_service: ScrumNoteService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub notification_retention_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            notification_retention_days: std::env::var("NOTIFICATION_RETENTION_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("NOTIFICATION_RETENTION_DAYS must be a number"),
        }
    }
}
