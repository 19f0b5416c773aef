pub mod notification_dto;
pub mod notification_factory;
pub mod notification_handlers;
pub mod notification_models;
pub mod notification_repository;
pub mod notification_service;
pub mod notification_store;
pub mod notifier;

pub use notification_models::{NewNotification, Notification, NotificationType};
pub use notification_repository::NotificationRepository;
pub use notification_service::start_retention_job;
pub use notification_store::NotificationStore;
pub use notifier::Notifier;
