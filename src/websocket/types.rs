use serde::Serialize;
use utoipa::ToSchema;

use crate::notification::notification_dto::NotificationResponse;

/// Server-to-client frames. The notification socket is one-way: the
/// server never expects anything but close frames back.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum WsMessage {
    Notification(NotificationResponse),
}
