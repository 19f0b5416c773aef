pub mod admin;
pub mod auth;

pub use admin::admin_only;
pub use auth::{auth_middleware, AuthUser};
