use std::sync::Arc;

use super::notification_models::NewNotification;
use super::notification_store::NotificationStore;
use crate::error::Result;
use crate::websocket::channel::NotificationChannel;

/// Persist-then-push delivery pipeline. Persistence is the source of
/// truth; the live push is opportunistic and only reaches recipients
/// with an open socket. Callers fire and forget: a failed delivery is
/// logged here and never surfaces to the triggering operation.
#[derive(Clone)]
pub struct Notifier {
    store: Arc<dyn NotificationStore>,
    channel: NotificationChannel,
}

impl Notifier {
    pub fn new(store: Arc<dyn NotificationStore>, channel: NotificationChannel) -> Self {
        Self { store, channel }
    }

    pub async fn notify(&self, new: NewNotification) {
        let recipient_id = new.recipient_id;
        let kind = new.notification_type;

        match self.persist_and_push(new).await {
            Ok(true) => {
                tracing::debug!("Notified user {} of {} (live)", recipient_id, kind);
            }
            Ok(false) => {
                tracing::debug!("Notified user {} of {} (stored)", recipient_id, kind);
            }
            Err(e) => {
                tracing::warn!("Failed to notify user {} of {}: {}", recipient_id, kind, e);
            }
        }
    }

    /// Returns whether the recipient received a live push.
    async fn persist_and_push(&self, new: NewNotification) -> Result<bool> {
        let notification = self.store.save(&new).await?;
        Ok(self.channel.publish(&notification.recipient_id, &notification))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notification_factory;
    use crate::notification::notification_models::NotificationType;
    use crate::task::task_models::Task;
    use crate::test_support::{admin, intern, InMemoryNotifications};
    use futures::FutureExt;
    use tokio_stream::StreamExt;
    use uuid::Uuid;

    fn assignment(recipient_id: Uuid) -> NewNotification {
        let boss = admin("boss");
        let task = Task::new(
            "Wire up alerts".to_string(),
            "Hook the pager into the on-call rota".to_string(),
            boss.id,
            None,
        );
        notification_factory::task_assigned(recipient_id, &task, &boss)
    }

    #[tokio::test]
    async fn test_notify_persists_even_when_nobody_is_connected() {
        let store = Arc::new(InMemoryNotifications::new());
        let notifier = Notifier::new(store.clone(), NotificationChannel::new());
        let worker = intern("worker");

        notifier.notify(assignment(worker.id)).await;

        let stored = store.for_recipient(worker.id);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].notification_type, NotificationType::TaskAssigned);
        assert!(!stored[0].is_read);
    }

    #[tokio::test]
    async fn test_notify_pushes_to_a_live_subscriber() {
        let store = Arc::new(InMemoryNotifications::new());
        let channel = NotificationChannel::new();
        let notifier = Notifier::new(store.clone(), channel.clone());
        let worker = intern("worker");
        let mut subscription = channel.subscribe(worker.id);

        notifier.notify(assignment(worker.id)).await;

        let pushed = subscription.next().now_or_never().flatten().unwrap();
        assert_eq!(pushed.recipient_id, worker.id);
        // The pushed value is the persisted row, id included.
        assert_eq!(pushed.id, store.for_recipient(worker.id)[0].id);
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed_and_nothing_is_pushed() {
        let store = Arc::new(InMemoryNotifications::new());
        let channel = NotificationChannel::new();
        let notifier = Notifier::new(store.clone(), channel.clone());
        let worker = intern("worker");
        let mut subscription = channel.subscribe(worker.id);

        store.fail_for(worker.id);
        notifier.notify(assignment(worker.id)).await;

        assert_eq!(store.len(), 0);
        assert!(subscription.next().now_or_never().is_none());
    }
}
