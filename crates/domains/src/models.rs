//! # Domain Models
//!
//! These structs represent the core entities of CampusConnect.
//! We use UUID v7 for time-ordered, globally unique identification; user ids
//! are opaque strings issued by the external identity service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audience::AudienceRule;

/// Academic branch of a viewer or an allow-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "ECE")]
    Ece,
    /// Profile incomplete; never matches a non-empty allow-list.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Branch {
    /// Parses the loosely-cased tokens found in raw rule documents.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "CSE" => Some(Branch::Cse),
            "IT" => Some(Branch::It),
            "ECE" => Some(Branch::Ece),
            _ => None,
        }
    }
}

/// Self-declared gender of a viewer or an allow-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
    /// Profile incomplete; never matches a non-empty allow-list.
    Unknown,
}

impl Gender {
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            "prefernottosay" | "prefer_not_to_say" => Some(Gender::PreferNotToSay),
            _ => None,
        }
    }
}

/// Demographic attributes used for eligibility matching.
/// Owned by the external profile store; immutable for the duration of a
/// filtering operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerProfile {
    pub branch: Branch,
    pub graduation_year: i32,
    pub gender: Gender,
}

/// An authenticated caller: identity-service uid plus demographic profile.
/// Supplied by the (excluded) identity collaborator; `None` at call sites
/// means an anonymous viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub profile: ViewerProfile,
}

/// A community post/notice. The only votable content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub title: String,
    pub body: String,
    /// Object-storage URL; upload mechanics live outside the core.
    pub image_url: Option<String>,
    pub audience: AudienceRule,
    pub upvotes: u32,
    pub downvotes: u32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: &str, title: &str, body: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            author_id: author_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            image_url: None,
            audience: AudienceRule::everyone(),
            upvotes: 0,
            downvotes: 0,
            created_at: Utc::now(),
        }
    }
}

/// A campus event viewers can register for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub author_id: String,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub poster_url: Option<String>,
    pub audience: AudienceRule,
    pub created_at: DateTime<Utc>,
}

/// One registration per (event, user): the pair key is the invariant the
/// registration transaction preserves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub event_id: Uuid,
    pub user_id: String,
    pub registered_at: DateTime<Utc>,
}

/// A job/internship posting gated by an eligibility rule of the same shape
/// as post/event audience rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: Uuid,
    pub author_id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub apply_url: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub eligibility: AudienceRule,
    pub created_at: DateTime<Utc>,
}

/// Whether a lost-and-found report describes a lost item or a found one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Lost,
    Found,
}

/// A lost-and-found board entry. Reports are public (no audience rule) and
/// hard-deleted when closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostFoundReport {
    pub id: Uuid,
    pub reporter_id: String,
    pub kind: ReportKind,
    pub item_name: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
    /// A found report may point back at the lost report it answers.
    /// The lost report stays active; multiple independent found claims
    /// are allowed.
    pub related_report: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
