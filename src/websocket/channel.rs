use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;
use uuid::Uuid;

use crate::notification::notification_models::Notification;

/// Per-recipient live delivery channel backing the notification
/// websocket. Senders are keyed by recipient id; publishing to a user
/// with no open subscription is a cheap no-op.
#[derive(Clone)]
pub struct NotificationChannel {
    connections: Arc<DashMap<Uuid, mpsc::UnboundedSender<Notification>>>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
        }
    }

    /// Register `recipient_id` for live pushes. Subscribing again
    /// replaces the previous subscription, which goes quiet.
    pub fn subscribe(&self, recipient_id: Uuid) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.insert(recipient_id, tx.clone());
        tracing::info!("User {} subscribed to live notifications", recipient_id);

        Subscription {
            recipient_id,
            tx,
            inner: UnboundedReceiverStream::new(rx),
            channel: self.clone(),
        }
    }

    /// Fire-and-forget push. Returns whether a live subscriber took
    /// delivery.
    pub fn publish(&self, recipient_id: &Uuid, notification: &Notification) -> bool {
        if let Some(sender) = self.connections.get(recipient_id) {
            sender.send(notification.clone()).is_ok()
        } else {
            false
        }
    }

    pub fn is_subscribed(&self, recipient_id: &Uuid) -> bool {
        self.connections.contains_key(recipient_id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// A live feed of one recipient's notifications. Dropping it
/// unregisters the recipient, unless a newer subscription has already
/// taken their slot.
pub struct Subscription {
    recipient_id: Uuid,
    tx: mpsc::UnboundedSender<Notification>,
    inner: UnboundedReceiverStream<Notification>,
    channel: NotificationChannel,
}

impl Stream for Subscription {
    type Item = Notification;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let removed = self
            .channel
            .connections
            .remove_if(&self.recipient_id, |_, tx| tx.same_channel(&self.tx));
        if removed.is_some() {
            tracing::info!(
                "User {} unsubscribed from live notifications",
                self.recipient_id
            );
        }
    }
}
