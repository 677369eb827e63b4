//! # MemoryStore
//!
//! An addressable document table keyed by item id, with per-document
//! versions. Vote and registration commits are optimistic transactions:
//! snapshot the version, compute the change, then commit under the
//! document entry only if the version is unchanged, otherwise
//! `Conflict`, and the caller retries against fresh state. Every commit
//! bumps the version, so a matching version also guarantees the related
//! vote/registration records are unchanged since the snapshot.
//!
//! Counters are mutated here and nowhere else.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use domains::{
    voting, AppError, Event, EventStore, LostFoundReport, LostFoundStore, Opportunity,
    OpportunityStore, Post, PostStore, Registration, Result, VoteAction, VoteReceipt, VoteRecord,
    VoteStore,
};

/// A stored document plus its optimistic-concurrency version.
#[derive(Debug, Clone)]
struct Versioned<T> {
    version: u64,
    doc: T,
}

impl<T> Versioned<T> {
    fn new(doc: T) -> Self {
        Self { version: 0, doc }
    }
}

/// In-process implementation of every storage port.
#[derive(Default)]
pub struct MemoryStore {
    posts: DashMap<Uuid, Versioned<Post>>,
    votes: DashMap<(Uuid, String), VoteRecord>,
    events: DashMap<Uuid, Versioned<Event>>,
    registrations: DashMap<(Uuid, String), Registration>,
    opportunities: DashMap<Uuid, Opportunity>,
    reports: DashMap<Uuid, LostFoundReport>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.iter().map(|e| e.doc.clone()).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.posts.get(&id).map(|e| e.doc.clone()))
    }

    async fn insert_post(&self, post: Post) -> Result<()> {
        self.posts.insert(post.id, Versioned::new(post));
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<()> {
        if self.posts.remove(&id).is_none() {
            return Err(AppError::NotFound("post", id.to_string()));
        }
        // The document is gone; its vote records go with it.
        self.votes.retain(|key, _| key.0 != id);
        Ok(())
    }
}

#[async_trait]
impl VoteStore for MemoryStore {
    async fn apply_vote(
        &self,
        item_id: Uuid,
        voter_id: &str,
        action: VoteAction,
    ) -> Result<VoteReceipt> {
        // Snapshot phase: item version and the voter's current record.
        let read_version = self
            .posts
            .get(&item_id)
            .map(|entry| entry.version)
            .ok_or_else(|| AppError::NotFound("post", item_id.to_string()))?;
        let vote_key = (item_id, voter_id.to_string());
        let existing = self.votes.get(&vote_key).map(|record| record.kind);
        let transition = voting::transition(existing, action);

        // Commit phase: everything below holds the item entry, which
        // serializes all voters on this item.
        let mut entry = self
            .posts
            .get_mut(&item_id)
            .ok_or_else(|| AppError::NotFound("post", item_id.to_string()))?;
        if entry.version != read_version {
            return Err(AppError::Conflict(format!(
                "post {item_id} changed since the vote was read"
            )));
        }

        match transition.next {
            Some(kind) => {
                self.votes.insert(
                    vote_key,
                    VoteRecord {
                        item_id,
                        voter_id: voter_id.to_string(),
                        kind,
                        updated_at: chrono::Utc::now(),
                    },
                );
            }
            None => {
                self.votes.remove(&vote_key);
            }
        }
        entry.doc.upvotes = voting::apply_delta(entry.doc.upvotes, transition.up_delta);
        entry.doc.downvotes = voting::apply_delta(entry.doc.downvotes, transition.down_delta);
        entry.version += 1;

        tracing::debug!(
            %item_id,
            voter = voter_id,
            version = entry.version,
            upvotes = entry.doc.upvotes,
            downvotes = entry.doc.downvotes,
            "vote transaction committed"
        );
        Ok(VoteReceipt {
            new_state: transition.next,
            upvotes: entry.doc.upvotes,
            downvotes: entry.doc.downvotes,
        })
    }

    async fn find_vote(&self, item_id: Uuid, voter_id: &str) -> Result<Option<VoteRecord>> {
        let key = (item_id, voter_id.to_string());
        Ok(self.votes.get(&key).map(|record| record.value().clone()))
    }

    async fn votes_by_voter(&self, voter_id: &str) -> Result<Vec<VoteRecord>> {
        Ok(self
            .votes
            .iter()
            .filter(|entry| entry.voter_id == voter_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.events.iter().map(|e| e.doc.clone()).collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(events)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.events.get(&id).map(|e| e.doc.clone()))
    }

    async fn insert_event(&self, event: Event) -> Result<()> {
        self.events.insert(event.id, Versioned::new(event));
        Ok(())
    }

    async fn register(&self, entry: Registration) -> Result<()> {
        // Same snapshot/commit shape as voting; a duplicate is terminal,
        // a version race is retryable.
        let read_version = self
            .events
            .get(&entry.event_id)
            .map(|e| e.version)
            .ok_or_else(|| AppError::NotFound("event", entry.event_id.to_string()))?;
        let key = (entry.event_id, entry.user_id.clone());
        if self.registrations.contains_key(&key) {
            return Err(AppError::AlreadyExists(format!(
                "user {} is already registered for event {}",
                entry.user_id, entry.event_id
            )));
        }

        let mut event = self
            .events
            .get_mut(&entry.event_id)
            .ok_or_else(|| AppError::NotFound("event", entry.event_id.to_string()))?;
        if event.version != read_version {
            return Err(AppError::Conflict(format!(
                "event {} changed since the registration was read",
                entry.event_id
            )));
        }

        tracing::debug!(event_id = %entry.event_id, user = %entry.user_id, "registration committed");
        self.registrations.insert(key, entry);
        event.version += 1;
        Ok(())
    }

    async fn registrations_by_user(&self, user_id: &str) -> Result<Vec<Registration>> {
        Ok(self
            .registrations
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn registration_count(&self, event_id: Uuid) -> Result<usize> {
        Ok(self
            .registrations
            .iter()
            .filter(|entry| entry.event_id == event_id)
            .count())
    }
}

#[async_trait]
impl OpportunityStore for MemoryStore {
    async fn list_opportunities(&self) -> Result<Vec<Opportunity>> {
        let mut all: Vec<Opportunity> =
            self.opportunities.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>> {
        Ok(self.opportunities.get(&id).map(|e| e.value().clone()))
    }

    async fn insert_opportunity(&self, opportunity: Opportunity) -> Result<()> {
        self.opportunities.insert(opportunity.id, opportunity);
        Ok(())
    }
}

#[async_trait]
impl LostFoundStore for MemoryStore {
    async fn list_active_reports(&self) -> Result<Vec<LostFoundReport>> {
        let mut reports: Vec<LostFoundReport> = self
            .reports
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.value().clone())
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reports)
    }

    async fn get_report(&self, id: Uuid) -> Result<Option<LostFoundReport>> {
        Ok(self.reports.get(&id).map(|e| e.value().clone()))
    }

    async fn insert_report(&self, report: LostFoundReport) -> Result<()> {
        self.reports.insert(report.id, report);
        Ok(())
    }

    async fn remove_report(&self, id: Uuid) -> Result<()> {
        if self.reports.remove(&id).is_none() {
            return Err(AppError::NotFound("report", id.to_string()));
        }
        Ok(())
    }
}
