pub mod user_dto;
pub mod user_handlers;
pub mod user_models;
pub mod user_repository;
pub mod user_store;

pub use user_models::{Role, User, UserResponse};
pub use user_repository::UserRepository;
pub use user_store::UserLookup;
