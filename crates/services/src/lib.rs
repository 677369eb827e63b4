//! # services
//!
//! Application services for CampusConnect: feed composition, the vote
//! aggregator's retry/auth shell, event registration, and the CRUD
//! orchestration around each content area. Services talk to storage only
//! through the port traits in `domains`; they own validation, ownership
//! checks, and retry policy, never persistence details.

pub mod events;
pub mod feed;
pub mod lost_found;
pub mod opportunities;
pub mod posts;
pub mod votes;

pub use events::{EventDraft, EventService, EventView};
pub use feed::{bucket_events, visible_to, Audienced, EventScope};
pub use lost_found::{LostFoundService, ReportDraft};
pub use opportunities::{OpportunityDraft, OpportunityService};
pub use posts::{PostDraft, PostService, PostView};
pub use votes::VoteService;
