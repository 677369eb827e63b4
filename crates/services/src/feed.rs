//! # Feed Composition Helpers
//!
//! Order-preserving visibility filtering and the time-bucket ordering used
//! by the event feed. Visibility is re-derived on every fetch; nothing here
//! is cached or persisted.

use chrono::{DateTime, Utc};
use domains::{AudienceRule, Event, Opportunity, Post, ViewerProfile};

/// Content that carries an audience/eligibility rule.
pub trait Audienced {
    fn audience(&self) -> &AudienceRule;
}

impl Audienced for Post {
    fn audience(&self) -> &AudienceRule {
        &self.audience
    }
}

impl Audienced for Event {
    fn audience(&self) -> &AudienceRule {
        &self.audience
    }
}

impl Audienced for Opportunity {
    fn audience(&self) -> &AudienceRule {
        &self.eligibility
    }
}

/// Keeps the items the viewer may see, preserving the input order.
pub fn visible_to<T: Audienced>(items: Vec<T>, viewer: Option<&ViewerProfile>) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| item.audience().admits(viewer))
        .collect()
}

/// Time bucket selected by the caller for the event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// Events still running or yet to start; nearest start first.
    Upcoming,
    /// Finished events; most recently ended first.
    Past,
}

/// Splits events into the requested bucket and orders it.
pub fn bucket_events(events: Vec<Event>, scope: EventScope, now: DateTime<Utc>) -> Vec<Event> {
    match scope {
        EventScope::Upcoming => {
            let mut bucket: Vec<Event> =
                events.into_iter().filter(|e| e.ends_at > now).collect();
            bucket.sort_by_key(|e| e.starts_at);
            bucket
        }
        EventScope::Past => {
            let mut bucket: Vec<Event> =
                events.into_iter().filter(|e| e.ends_at <= now).collect();
            bucket.sort_by(|a, b| b.ends_at.cmp(&a.ends_at));
            bucket
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domains::{Branch, Gender};

    fn event(title: &str, start_in_hours: i64, len_hours: i64, now: DateTime<Utc>) -> Event {
        Event {
            id: uuid::Uuid::now_v7(),
            author_id: "uid-club".to_string(),
            title: title.to_string(),
            description: String::new(),
            venue: "Auditorium".to_string(),
            starts_at: now + Duration::hours(start_in_hours),
            ends_at: now + Duration::hours(start_in_hours + len_hours),
            poster_url: None,
            audience: AudienceRule::everyone(),
            created_at: now,
        }
    }

    #[test]
    fn filtering_preserves_relative_order() {
        let viewer = ViewerProfile {
            branch: Branch::It,
            graduation_year: 2026,
            gender: Gender::Male,
        };
        let mut restricted = AudienceRule::everyone();
        restricted.branches.insert(Branch::Ece);

        let mut a = Post::new("u1", "first", "...");
        a.audience = AudienceRule::everyone();
        let mut b = Post::new("u1", "hidden", "...");
        b.audience = restricted;
        let c = Post::new("u1", "last", "...");

        let out = visible_to(vec![a, b, c], Some(&viewer));
        let titles: Vec<&str> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "last"]);
    }

    #[test]
    fn upcoming_bucket_sorts_by_nearest_start() {
        let now = Utc::now();
        let events = vec![
            event("later", 48, 2, now),
            event("soon", 2, 2, now),
            event("done", -10, 2, now),
        ];
        let upcoming = bucket_events(events, EventScope::Upcoming, now);
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["soon", "later"]);
    }

    #[test]
    fn past_bucket_sorts_by_most_recent_end() {
        let now = Utc::now();
        let events = vec![
            event("old", -100, 2, now),
            event("recent", -5, 2, now),
            event("running", -1, 4, now),
        ];
        let past = bucket_events(events, EventScope::Past, now);
        let titles: Vec<&str> = past.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["recent", "old"]);
    }

    #[test]
    fn event_still_running_counts_as_upcoming() {
        let now = Utc::now();
        let events = vec![event("running", -1, 4, now)];
        assert_eq!(bucket_events(events, EventScope::Upcoming, now).len(), 1);
    }
}
