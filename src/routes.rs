use crate::{
    auth::auth_dto::{AuthResponse, LoginRequest, RegisterRequest},
    auth::auth_handlers,
    middleware::{admin_only, auth_middleware},
    notification::notification_dto::{NotificationResponse, UnreadCountResponse},
    notification::notification_handlers,
    notification::notification_models::{Notification, NotificationType},
    scrum_note::scrum_note_dto::{CreateScrumNoteRequest, UpdateScrumNoteRequest},
    scrum_note::scrum_note_handlers,
    scrum_note::scrum_note_models::ScrumNote,
    state::AppState,
    task::task_dto::{
        AssignTaskRequest, CreateTaskRequest, UpdateTaskRequest, UpdateTaskStatusRequest,
    },
    task::task_handlers,
    task::task_models::{Task, TaskStatus},
    user::user_dto::{UpdateActiveStatusRequest, UpdateRoleRequest},
    user::user_handlers,
    user::user_models::{Role, User, UserResponse},
    websocket::ws_handler,
};
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        task_handlers::get_tasks,
        task_handlers::get_task,
        task_handlers::create_task,
        task_handlers::update_task,
        task_handlers::delete_task,
        task_handlers::update_task_status,
        task_handlers::assign_task,
        scrum_note_handlers::get_scrum_notes,
        scrum_note_handlers::get_scrum_note,
        scrum_note_handlers::create_scrum_note,
        scrum_note_handlers::update_scrum_note,
        scrum_note_handlers::delete_scrum_note,
        notification_handlers::get_notifications,
        notification_handlers::unread_count,
        notification_handlers::mark_notification_read,
        notification_handlers::mark_all_read,
        user_handlers::get_current_user,
        user_handlers::get_all_users,
        user_handlers::update_user_role,
        user_handlers::update_user_status,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CreateTaskRequest,
            UpdateTaskRequest,
            UpdateTaskStatusRequest,
            AssignTaskRequest,
            CreateScrumNoteRequest,
            UpdateScrumNoteRequest,
            UpdateRoleRequest,
            UpdateActiveStatusRequest,
            User,
            UserResponse,
            Role,
            Task,
            TaskStatus,
            ScrumNote,
            Notification,
            NotificationType,
            NotificationResponse,
            UnreadCountResponse,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "scrum-notes", description = "Daily scrum note endpoints"),
        (name = "notifications", description = "Notification endpoints"),
        (name = "users", description = "User profile endpoints"),
        (name = "admin", description = "User administration endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login));

    // Protected routes (auth required)
    let task_routes = Router::new()
        .route(
            "/",
            get(task_handlers::get_tasks).post(task_handlers::create_task),
        )
        .route(
            "/:id",
            get(task_handlers::get_task)
                .put(task_handlers::update_task)
                .delete(task_handlers::delete_task),
        )
        .route("/:id/status", patch(task_handlers::update_task_status))
        .route("/:id/assignee", patch(task_handlers::assign_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let scrum_note_routes = Router::new()
        .route(
            "/",
            get(scrum_note_handlers::get_scrum_notes).post(scrum_note_handlers::create_scrum_note),
        )
        .route(
            "/:id",
            get(scrum_note_handlers::get_scrum_note)
                .put(scrum_note_handlers::update_scrum_note)
                .delete(scrum_note_handlers::delete_scrum_note),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let notification_routes = Router::new()
        .route("/", get(notification_handlers::get_notifications))
        .route("/unread-count", get(notification_handlers::unread_count))
        .route(
            "/:id/read",
            patch(notification_handlers::mark_notification_read),
        )
        .route("/read-all", post(notification_handlers::mark_all_read))
        .route("/ws", get(ws_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let user_routes = Router::new()
        .route("/me", get(user_handlers::get_current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Admin routes: the auth layer is added last so it runs first and
    // seeds the user id the admin gate reads.
    let admin_routes = Router::new()
        .route("/users", get(user_handlers::get_all_users))
        .route("/users/:id/role", patch(user_handlers::update_user_role))
        .route(
            "/users/:id/status",
            patch(user_handlers::update_user_status),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_only))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .nest("/scrum-notes", scrum_note_routes)
        .nest("/notifications", notification_routes)
        .nest("/users", user_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
