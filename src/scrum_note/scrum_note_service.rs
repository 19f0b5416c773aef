use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::notification::notification_factory;
use crate::notification::notifier::Notifier;
use crate::policy;
use crate::scrum_note::scrum_note_dto::{
    CreateScrumNoteRequest, ScrumNoteListParams, UpdateScrumNoteRequest,
};
use crate::scrum_note::scrum_note_models::ScrumNote;
use crate::scrum_note::scrum_note_store::ScrumNoteStore;
use crate::user::user_models::{Role, User};
use crate::user::user_store::UserLookup;

/// Scrum note business logic. Creation by an intern fans a
/// notification out to every active admin; each delivery is its own
/// failure domain and none of them can fail the write.
#[derive(Clone)]
pub struct ScrumNoteService {
    users: Arc<dyn UserLookup>,
    notes: Arc<dyn ScrumNoteStore>,
    notifier: Notifier,
}

impl ScrumNoteService {
    pub fn new(
        users: Arc<dyn UserLookup>,
        notes: Arc<dyn ScrumNoteStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            users,
            notes,
            notifier,
        }
    }

    pub async fn create_note(
        &self,
        actor_id: Uuid,
        payload: CreateScrumNoteRequest,
    ) -> Result<ScrumNote> {
        let actor = self.load_actor(actor_id).await?;
        payload.validate()?;

        let date = payload.date.unwrap_or_else(|| Utc::now().date_naive());

        if let Some(existing) = self.notes.find_by_user_and_date(actor.id, date).await? {
            return Err(AppError::DuplicateNote {
                user_id: existing.user_id,
                date: existing.date,
            });
        }

        let note = ScrumNote::new(
            actor.id,
            date,
            payload.what_i_did,
            payload.next_steps,
            normalize_blockers(payload.blockers),
        );
        let saved = self.notes.save(&note).await?;

        if actor.role == Role::Intern {
            self.notify_admins(&saved, &actor).await;
        }

        Ok(saved)
    }

    pub async fn update_note(
        &self,
        actor_id: Uuid,
        note_id: Uuid,
        payload: UpdateScrumNoteRequest,
    ) -> Result<ScrumNote> {
        let actor = self.load_actor(actor_id).await?;
        payload.validate()?;

        let mut note = self.load_note(note_id).await?;
        policy::ensure_can_modify_scrum_note(&actor, &note)?;

        if let Some(what_i_did) = payload.what_i_did {
            note.what_i_did = what_i_did;
        }
        if let Some(next_steps) = payload.next_steps {
            note.next_steps = next_steps;
        }
        if let Some(blockers) = payload.blockers {
            note.blockers = normalize_blockers(Some(blockers));
        }
        note.touch();

        self.notes.save(&note).await
    }

    pub async fn delete_note(&self, actor_id: Uuid, note_id: Uuid) -> Result<()> {
        let actor = self.load_actor(actor_id).await?;
        let note = self.load_note(note_id).await?;
        policy::ensure_can_delete_scrum_note(&actor, &note)?;

        self.notes.delete(note.id).await?;
        Ok(())
    }

    pub async fn get_note(&self, actor_id: Uuid, note_id: Uuid) -> Result<ScrumNote> {
        let actor = self.load_actor(actor_id).await?;
        let note = self.load_note(note_id).await?;
        policy::ensure_can_view_scrum_note(&actor, &note)?;

        Ok(note)
    }

    /// Admins browse every note, narrowed by the optional user and day
    /// filters; interns only ever see their own.
    pub async fn list_notes(
        &self,
        actor_id: Uuid,
        params: ScrumNoteListParams,
    ) -> Result<Vec<ScrumNote>> {
        let actor = self.load_actor(actor_id).await?;

        if actor.is_admin() {
            if let Some(user_id) = params.user_id {
                if !self.users.exists(user_id).await? {
                    return Err(AppError::NotFound {
                        kind: "user",
                        id: user_id,
                    });
                }
            }
            return match (params.user_id, params.date) {
                (Some(user_id), Some(date)) => Ok(self
                    .notes
                    .find_by_user_and_date(user_id, date)
                    .await?
                    .into_iter()
                    .collect()),
                (Some(user_id), None) => self.notes.find_by_user(user_id).await,
                (None, Some(date)) => self.notes.find_by_date(date).await,
                (None, None) => self.notes.find_all().await,
            };
        }

        if let Some(user_id) = params.user_id {
            if user_id != actor.id {
                return Err(AppError::Unauthorized {
                    actor: actor.id,
                    action: "list other users' scrum notes",
                });
            }
        }

        let mut notes = self.notes.find_by_user(actor.id).await?;
        if let Some(date) = params.date {
            notes.retain(|n| n.date == date);
        }
        Ok(notes)
    }

    async fn notify_admins(&self, note: &ScrumNote, author: &User) {
        let admins = match self.users.find_all_active_by_role(Role::Admin).await {
            Ok(admins) => admins,
            Err(e) => {
                tracing::warn!(
                    "Could not look up admins to notify about scrum note {}: {}",
                    note.id,
                    e
                );
                return;
            }
        };

        for admin in admins {
            if admin.id == author.id {
                continue;
            }
            self.notifier
                .notify(notification_factory::scrum_note_created(
                    admin.id, note, author,
                ))
                .await;
        }
    }

    async fn load_actor(&self, actor_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(actor_id)
            .await?
            .ok_or(AppError::NotFound {
                kind: "user",
                id: actor_id,
            })
    }

    async fn load_note(&self, note_id: Uuid) -> Result<ScrumNote> {
        self.notes
            .find_by_id(note_id)
            .await?
            .ok_or(AppError::NotFound {
                kind: "scrum note",
                id: note_id,
            })
    }
}

fn normalize_blockers(blockers: Option<String>) -> Option<String> {
    blockers.filter(|b| !b.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notification_models::NotificationType;
    use crate::test_support::{
        admin, intern, InMemoryNotifications, InMemoryScrumNotes, InMemoryUsers,
    };
    use crate::websocket::channel::NotificationChannel;
    use chrono::NaiveDate;

    struct Fixture {
        service: ScrumNoteService,
        users: Arc<InMemoryUsers>,
        notes: Arc<InMemoryScrumNotes>,
        notifications: Arc<InMemoryNotifications>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUsers::new());
        let notes = Arc::new(InMemoryScrumNotes::new());
        let notifications = Arc::new(InMemoryNotifications::new());
        let notifier = Notifier::new(notifications.clone(), NotificationChannel::new());
        let service = ScrumNoteService::new(users.clone(), notes.clone(), notifier);
        Fixture {
            service,
            users,
            notes,
            notifications,
        }
    }

    fn note_request(date: Option<NaiveDate>) -> CreateScrumNoteRequest {
        CreateScrumNoteRequest {
            date,
            what_i_did: "Reviewed the auth changes".to_string(),
            next_steps: "Pick up the retry queue".to_string(),
            blockers: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[tokio::test]
    async fn test_intern_note_notifies_every_active_admin_once() {
        let fx = fixture();
        let alice = fx.users.insert(admin("alice"));
        let bob = fx.users.insert(admin("bob"));
        let mut retired = admin("retired");
        retired.active = false;
        let retired = fx.users.insert(retired);
        let worker = fx.users.insert(intern("worker"));
        let peer = fx.users.insert(intern("peer"));

        let note = fx
            .service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();

        assert_eq!(fx.notifications.for_recipient(alice.id).len(), 1);
        assert_eq!(fx.notifications.for_recipient(bob.id).len(), 1);
        assert_eq!(fx.notifications.for_recipient(retired.id).len(), 0);
        assert_eq!(fx.notifications.for_recipient(worker.id).len(), 0);
        assert_eq!(fx.notifications.for_recipient(peer.id).len(), 0);

        let n = &fx.notifications.for_recipient(alice.id)[0];
        assert_eq!(n.notification_type, NotificationType::ScrumNoteCreated);
        assert_eq!(n.metadata["scrum_note_id"], note.id.to_string());
        assert_eq!(n.metadata["actor_name"], "worker");
        assert_eq!(n.metadata["date"], "2025-06-02");
        assert!(n.message.contains("worker"));
        assert_eq!(n.redirect_url(), Some("/scrum-notes".to_string()));
    }

    #[tokio::test]
    async fn test_admin_note_fans_out_to_nobody() {
        let fx = fixture();
        let alice = fx.users.insert(admin("alice"));
        fx.users.insert(admin("bob"));

        fx.service
            .create_note(alice.id, note_request(Some(day(2))))
            .await
            .unwrap();

        assert_eq!(fx.notifications.len(), 0);
    }

    #[tokio::test]
    async fn test_second_note_same_day_is_rejected() {
        let fx = fixture();
        fx.users.insert(admin("alice"));
        let worker = fx.users.insert(intern("worker"));

        fx.service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();
        fx.notifications.clear();

        let err = fx
            .service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap_err();

        match err {
            AppError::DuplicateNote { user_id, date } => {
                assert_eq!(user_id, worker.id);
                assert_eq!(date, day(2));
            }
            other => panic!("expected DuplicateNote, got {other:?}"),
        }
        assert_eq!(fx.notes.len(), 1);
        assert_eq!(fx.notifications.len(), 0);
    }

    #[tokio::test]
    async fn test_one_note_per_day_is_scoped_to_the_user_and_day() {
        let fx = fixture();
        let worker = fx.users.insert(intern("worker"));
        let peer = fx.users.insert(intern("peer"));

        fx.service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();
        fx.service
            .create_note(worker.id, note_request(Some(day(3))))
            .await
            .unwrap();
        fx.service
            .create_note(peer.id, note_request(Some(day(2))))
            .await
            .unwrap();

        assert_eq!(fx.notes.len(), 3);
    }

    #[tokio::test]
    async fn test_note_date_defaults_to_today() {
        let fx = fixture();
        let worker = fx.users.insert(intern("worker"));

        let note = fx
            .service
            .create_note(worker.id, note_request(None))
            .await
            .unwrap();

        assert_eq!(note.date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_one_failed_admin_delivery_does_not_stop_the_rest() {
        let fx = fixture();
        let alice = fx.users.insert(admin("alice"));
        let bob = fx.users.insert(admin("bob"));
        let worker = fx.users.insert(intern("worker"));

        fx.notifications.fail_for(alice.id);

        let note = fx
            .service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();

        // The note itself lands, and the healthy recipient still hears.
        assert!(fx.notes.get(note.id).is_some());
        assert_eq!(fx.notifications.for_recipient(alice.id).len(), 0);
        assert_eq!(fx.notifications.for_recipient(bob.id).len(), 1);
    }

    #[tokio::test]
    async fn test_admin_lookup_failure_does_not_fail_the_write() {
        let fx = fixture();
        fx.users.insert(admin("alice"));
        let worker = fx.users.insert(intern("worker"));

        fx.users.fail_role_lookups();

        let note = fx
            .service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();

        assert!(fx.notes.get(note.id).is_some());
        assert_eq!(fx.notifications.len(), 0);
    }

    #[tokio::test]
    async fn test_owner_updates_their_note_and_empty_blockers_clear() {
        let fx = fixture();
        let worker = fx.users.insert(intern("worker"));

        let mut payload = note_request(Some(day(2)));
        payload.blockers = Some("Waiting on review".to_string());
        let note = fx.service.create_note(worker.id, payload).await.unwrap();
        assert_eq!(note.blockers.as_deref(), Some("Waiting on review"));

        let updated = fx
            .service
            .update_note(
                worker.id,
                note.id,
                UpdateScrumNoteRequest {
                    what_i_did: Some("Reviewed and merged".to_string()),
                    next_steps: None,
                    blockers: Some(String::new()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.what_i_did, "Reviewed and merged");
        assert_eq!(updated.next_steps, "Pick up the retry queue");
        assert!(updated.blockers.is_none());
    }

    #[tokio::test]
    async fn test_foreign_intern_cannot_touch_a_note() {
        let fx = fixture();
        let worker = fx.users.insert(intern("worker"));
        let peer = fx.users.insert(intern("peer"));

        let note = fx
            .service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();

        let err = fx
            .service
            .update_note(
                peer.id,
                note.id,
                UpdateScrumNoteRequest {
                    what_i_did: Some("Hijacked".to_string()),
                    next_steps: None,
                    blockers: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));

        let err = fx.service.delete_note(peer.id, note.id).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));

        let err = fx.service.get_note(peer.id, note.id).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_admin_can_update_and_delete_any_note() {
        let fx = fixture();
        let alice = fx.users.insert(admin("alice"));
        let worker = fx.users.insert(intern("worker"));

        let note = fx
            .service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();

        let updated = fx
            .service
            .update_note(
                alice.id,
                note.id,
                UpdateScrumNoteRequest {
                    what_i_did: None,
                    next_steps: Some("Pair with alice on deploy".to_string()),
                    blockers: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.next_steps, "Pair with alice on deploy");

        fx.service.delete_note(alice.id, note.id).await.unwrap();
        assert!(fx.notes.get(note.id).is_none());
    }

    #[tokio::test]
    async fn test_listing_respects_role_visibility() {
        let fx = fixture();
        let alice = fx.users.insert(admin("alice"));
        let worker = fx.users.insert(intern("worker"));
        let peer = fx.users.insert(intern("peer"));

        fx.service
            .create_note(worker.id, note_request(Some(day(2))))
            .await
            .unwrap();
        fx.service
            .create_note(peer.id, note_request(Some(day(2))))
            .await
            .unwrap();
        fx.service
            .create_note(worker.id, note_request(Some(day(3))))
            .await
            .unwrap();

        let own = fx
            .service
            .list_notes(
                worker.id,
                ScrumNoteListParams {
                    user_id: None,
                    date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|n| n.user_id == worker.id));

        let err = fx
            .service
            .list_notes(
                worker.id,
                ScrumNoteListParams {
                    user_id: Some(peer.id),
                    date: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));

        let board = fx
            .service
            .list_notes(
                alice.id,
                ScrumNoteListParams {
                    user_id: None,
                    date: Some(day(2)),
                },
            )
            .await
            .unwrap();
        assert_eq!(board.len(), 2);

        let workers_notes = fx
            .service
            .list_notes(
                alice.id,
                ScrumNoteListParams {
                    user_id: Some(worker.id),
                    date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(workers_notes.len(), 2);

        // No filters at all: an admin sees every note, not just today's.
        let everything = fx
            .service
            .list_notes(
                alice.id,
                ScrumNoteListParams {
                    user_id: None,
                    date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(everything.len(), 3);

        let exact = fx
            .service
            .list_notes(
                alice.id,
                ScrumNoteListParams {
                    user_id: Some(worker.id),
                    date: Some(day(2)),
                },
            )
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].user_id, worker.id);
        assert_eq!(exact[0].date, day(2));
    }

    #[tokio::test]
    async fn test_admin_filter_by_unknown_user_is_not_found() {
        let fx = fixture();
        let alice = fx.users.insert(admin("alice"));

        let err = fx
            .service
            .list_notes(
                alice.id,
                ScrumNoteListParams {
                    user_id: Some(Uuid::new_v4()),
                    date: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: "user", .. }));
    }
}
