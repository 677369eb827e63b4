//! # Core Traits (Ports)
//!
//! Contracts the storage adapters must implement. The managed document
//! store behind these traits supplies ordered reads and one optimistic
//! transaction primitive; everything else in the system is built on top.
//!
//! With the `testing` feature enabled, mockall generates `MockXxx` types
//! for each port so service logic can be tested without an adapter.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Event, LostFoundReport, Opportunity, Post, Registration};
use crate::voting::{VoteAction, VoteReceipt, VoteRecord};

/// Persistence contract for community posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, ordered by creation time descending (store-side index).
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>>;
    async fn insert_post(&self, post: Post) -> Result<()>;
    /// Hard delete; the source design has no soft-delete tombstones.
    async fn delete_post(&self, id: Uuid) -> Result<()>;
}

/// Vote persistence and the single transactional primitive in the system.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// One optimistic transaction attempt: read the voter's record and the
    /// item's counters, apply the vote transition, and commit record plus
    /// clamped counters under the item's version. Returns
    /// [`crate::AppError::Conflict`] when another commit won the race
    /// (retry policy belongs to the caller) and
    /// [`crate::AppError::NotFound`] when the item does not exist, in
    /// which case nothing is mutated.
    async fn apply_vote(
        &self,
        item_id: Uuid,
        voter_id: &str,
        action: VoteAction,
    ) -> Result<VoteReceipt>;

    async fn find_vote(&self, item_id: Uuid, voter_id: &str) -> Result<Option<VoteRecord>>;

    /// Every vote the voter currently holds; used for read-only feed
    /// decoration.
    async fn votes_by_voter(&self, voter_id: &str) -> Result<Vec<VoteRecord>>;
}

/// Persistence contract for events and their registrations.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events, ordered by creation time descending. Time-bucket
    /// ordering (upcoming/past) is the feed composer's job.
    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;
    async fn insert_event(&self, event: Event) -> Result<()>;

    /// One optimistic transaction attempt for registration: existence
    /// check, duplicate check, and write commit under the event's version.
    /// Duplicate registration is `AlreadyExists` (terminal); a version race
    /// is `Conflict` (retryable).
    async fn register(&self, entry: Registration) -> Result<()>;

    async fn registrations_by_user(&self, user_id: &str) -> Result<Vec<Registration>>;
    async fn registration_count(&self, event_id: Uuid) -> Result<usize>;
}

/// Persistence contract for job/internship opportunities.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait OpportunityStore: Send + Sync {
    async fn list_opportunities(&self) -> Result<Vec<Opportunity>>;
    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>>;
    async fn insert_opportunity(&self, opportunity: Opportunity) -> Result<()>;
}

/// Persistence contract for the lost-and-found board.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LostFoundStore: Send + Sync {
    /// Active reports only, ordered by creation time descending.
    async fn list_active_reports(&self) -> Result<Vec<LostFoundReport>>;
    async fn get_report(&self, id: Uuid) -> Result<Option<LostFoundReport>>;
    async fn insert_report(&self, report: LostFoundReport) -> Result<()>;
    /// Hard delete, matching the source's close-report lifecycle.
    async fn remove_report(&self, id: Uuid) -> Result<()>;
}
