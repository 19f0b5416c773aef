mod auth;
mod db;
mod error;
mod middleware;
mod notification;
mod policy;
mod routes;
mod scrum_note;
mod state;
mod task;
#[cfg(test)]
mod test_support;
mod user;
mod websocket;

use std::sync::Arc;

use db::{create_pool, run_migrations};
use notification::{start_retention_job, Notifier};
use routes::create_router;
use state::{AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,team_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Live notification channel shared by the notifier and the
    // websocket handler
    let channel = websocket::NotificationChannel::new();

    // Repositories
    let user_repository = user::UserRepository::new(db.clone());
    let task_repository = task::TaskRepository::new(db.clone());
    let scrum_note_repository = scrum_note::ScrumNoteRepository::new(db.clone());
    let notification_repository = notification::NotificationRepository::new(db.clone());

    // Services
    let users: Arc<dyn user::UserLookup> = Arc::new(user_repository.clone());
    let notifier = Notifier::new(
        Arc::new(notification_repository.clone()),
        channel.clone(),
    );
    let auth_service = auth::AuthService::new(
        user_repository.clone(),
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    );
    let task_service = task::TaskService::new(
        users.clone(),
        Arc::new(task_repository),
        notifier.clone(),
    );
    let scrum_note_service = scrum_note::ScrumNoteService::new(
        users,
        Arc::new(scrum_note_repository),
        notifier,
    );

    let state = AppState {
        config: config.clone(),
        channel,
        user_repository,
        notification_repository,
        auth_service,
        task_service,
        scrum_note_service,
    };

    // Nightly purge of old notifications
    let retention_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_retention_job(retention_state).await {
            tracing::error!("Notification retention job error: {:?}", e);
        }
    });

    let app = create_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
