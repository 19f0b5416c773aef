use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use uuid::Uuid;

use crate::{middleware::AuthUser, state::AppState, websocket::types::WsMessage};

/// WebSocket upgrade handler for the live notification feed
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, user_id, state))
}

async fn handle_socket(socket: WebSocket, user_id: Uuid, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscription = state.channel.subscribe(user_id);

    // Forward everything published for this user onto the socket. The
    // subscription drops with this task, which unregisters the user.
    let mut send_task = tokio::spawn(async move {
        while let Some(notification) = subscription.next().await {
            let frame = WsMessage::Notification(notification.into());
            match serde_json::to_string(&frame) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize notification frame: {}", e);
                }
            }
        }
    });

    // Clients only listen; drain the read side until the socket closes.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::info!("WebSocket connection closed for user {}", user_id);
}
