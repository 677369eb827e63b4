//! Shared fixtures for the cross-crate test suite.

use chrono::{DateTime, Duration, Utc};
use domains::{AudienceRule, Branch, Event, Gender, Viewer, ViewerProfile};
use uuid::Uuid;

/// A signed-in viewer with the given demographics.
pub fn viewer(id: &str, branch: Branch, year: i32, gender: Gender) -> Viewer {
    Viewer {
        id: id.to_string(),
        profile: ViewerProfile {
            branch,
            graduation_year: year,
            gender,
        },
    }
}

/// The concrete viewer the visibility scenarios in the test suite revolve
/// around: CSE, class of 2026, female.
pub fn cse_2026() -> Viewer {
    viewer("uid-cse-2026", Branch::Cse, 2026, Gender::Female)
}

/// An event running over `[start_in_hours, start_in_hours + len_hours)`
/// relative to `now`.
pub fn event_at(now: DateTime<Utc>, start_in_hours: i64, len_hours: i64, title: &str) -> Event {
    Event {
        id: Uuid::now_v7(),
        author_id: "uid-organizer".to_string(),
        title: title.to_string(),
        description: String::new(),
        venue: "Main block".to_string(),
        starts_at: now + Duration::hours(start_in_hours),
        ends_at: now + Duration::hours(start_in_hours + len_hours),
        poster_url: None,
        audience: AudienceRule::everyone(),
        created_at: now,
    }
}
