//! # EventService
//!
//! Event creation, the time-bucketed event feed, and registration.
//! Registration goes through the same optimistic-transaction pattern as
//! voting: the store commits the entry under the event's version, the
//! service retries commit conflicts up to a fixed bound. Duplicates are
//! terminal (`AlreadyExists`) and never retried.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domains::{AppError, AudienceRule, Event, EventStore, Registration, Result, Viewer};
use serde::Serialize;
use uuid::Uuid;

use crate::feed::{bucket_events, visible_to, EventScope};

/// Caller-supplied fields for a new event.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub poster_url: Option<String>,
    pub audience: AudienceRule,
}

/// An event as the caller sees it, decorated with their registration
/// status and the current head count. Decoration only; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub registered: bool,
    pub registration_count: usize,
}

pub struct EventService {
    store: Arc<dyn EventStore>,
    retry_limit: u32,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>, retry_limit: u32) -> Self {
        Self { store, retry_limit }
    }

    pub async fn create(&self, viewer: Option<&Viewer>, draft: EventDraft) -> Result<Event> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("creating an event requires a signed-in viewer".to_string())
        })?;
        if draft.title.trim().is_empty() {
            return Err(AppError::InvalidArgument("event title is empty".to_string()));
        }
        if draft.ends_at <= draft.starts_at {
            return Err(AppError::InvalidArgument(
                "event must end after it starts".to_string(),
            ));
        }

        let event = Event {
            id: Uuid::now_v7(),
            author_id: viewer.id.clone(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            venue: draft.venue,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            poster_url: draft.poster_url,
            audience: draft.audience,
            created_at: Utc::now(),
        };
        self.store.insert_event(event.clone()).await?;
        tracing::info!(event_id = %event.id, author = %viewer.id, "event created");
        Ok(event)
    }

    /// The event feed for one time bucket: audience-filtered, bucket-ordered
    /// (upcoming ascending by start, past descending by end), decorated with
    /// the caller's registration status.
    pub async fn feed(&self, viewer: Option<&Viewer>, scope: EventScope) -> Result<Vec<EventView>> {
        let events = self.store.list_events().await?;
        let visible = visible_to(events, viewer.map(|v| &v.profile));
        let bucket = bucket_events(visible, scope, Utc::now());

        let mine: HashSet<Uuid> = match viewer {
            Some(v) => self
                .store
                .registrations_by_user(&v.id)
                .await?
                .into_iter()
                .map(|r| r.event_id)
                .collect(),
            None => HashSet::new(),
        };

        let mut views = Vec::with_capacity(bucket.len());
        for event in bucket {
            let registration_count = self.store.registration_count(event.id).await?;
            let registered = mine.contains(&event.id);
            views.push(EventView {
                event,
                registered,
                registration_count,
            });
        }
        Ok(views)
    }

    /// Registers the viewer for an event.
    ///
    /// Checks run in order: authentication, existence, eligibility against
    /// the event's audience rule, and whether the event already ended. The
    /// write itself is one transactional attempt per loop iteration.
    pub async fn register(&self, viewer: Option<&Viewer>, event_id: Uuid) -> Result<Registration> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("registration requires a signed-in viewer".to_string())
        })?;
        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event", event_id.to_string()))?;
        if !event.audience.admits(Some(&viewer.profile)) {
            return Err(AppError::Unauthenticated(
                "viewer is not eligible for this event".to_string(),
            ));
        }
        if event.ends_at <= Utc::now() {
            return Err(AppError::InvalidArgument(
                "registration closed: the event has ended".to_string(),
            ));
        }

        let entry = Registration {
            event_id,
            user_id: viewer.id.clone(),
            registered_at: Utc::now(),
        };

        let mut attempt: u32 = 0;
        loop {
            match self.store.register(entry.clone()).await {
                Err(err) if err.is_retryable() && attempt < self.retry_limit => {
                    attempt += 1;
                    tracing::warn!(
                        %event_id,
                        user = %viewer.id,
                        attempt,
                        "registration transaction conflicted, retrying"
                    );
                }
                Err(err) => return Err(err),
                Ok(()) => {
                    tracing::info!(%event_id, user = %viewer.id, "registration committed");
                    return Ok(entry);
                }
            }
        }
    }
}
