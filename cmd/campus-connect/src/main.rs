//! # campus-connect
//!
//! Wiring binary for the CampusConnect core: initializes logging, loads
//! settings, assembles the in-memory store behind the ports, optionally
//! seeds demo content, and runs a smoke pass over the feeds so a deployment
//! can verify the whole stack end to end.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use configs::Settings;
use domains::{AudienceRule, Branch, Gender, Viewer, ViewerProfile, VoteAction};
use services::{
    EventDraft, EventScope, EventService, LostFoundService, OpportunityDraft, OpportunityService,
    PostDraft, PostService, ReportDraft, VoteService,
};
use storage_adapters::MemoryStore;
use tracing_subscriber::EnvFilter;

struct App {
    posts: PostService,
    votes: VoteService,
    events: EventService,
    opportunities: OpportunityService,
    lost_found: LostFoundService,
}

impl App {
    fn assemble(settings: &Settings) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            posts: PostService::new(store.clone(), store.clone()),
            votes: VoteService::new(store.clone(), settings.store.vote_retry_limit),
            events: EventService::new(store.clone(), settings.store.registration_retry_limit),
            opportunities: OpportunityService::new(store.clone()),
            lost_found: LostFoundService::new(store),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_new(&settings.log.filter).context("invalid log filter")?,
        )
        .init();

    let app = App::assemble(&settings);
    tracing::info!("campus-connect core assembled");

    if settings.store.seed_demo_data {
        seed_and_smoke(&app).await.context("smoke run failed")?;
    }
    Ok(())
}

/// Seeds a small campus and walks the core paths: gated feeds, a vote
/// round-trip, an event registration, and a lost/found pair.
async fn seed_and_smoke(app: &App) -> anyhow::Result<()> {
    let asha = Viewer {
        id: "uid-asha".to_string(),
        profile: ViewerProfile {
            branch: Branch::Cse,
            graduation_year: 2026,
            gender: Gender::Female,
        },
    };
    let ravi = Viewer {
        id: "uid-ravi".to_string(),
        profile: ViewerProfile {
            branch: Branch::Ece,
            graduation_year: 2025,
            gender: Gender::Male,
        },
    };

    // Audience rules arrive from the store in the loosely-typed source
    // shape; normalize them through the parser.
    let seniors_only = AudienceRule::from_raw(&serde_json::json!({
        "allowedBranches": ["CSE", "IT"],
        "allowedGraduationYears": [2026],
    }))
    .context("seed rule failed to parse")?;

    let notice = app
        .posts
        .create(
            Some(&asha),
            PostDraft {
                title: "Campus wifi maintenance tonight".to_string(),
                body: "Expect outages between 11pm and 1am.".to_string(),
                image_url: None,
                audience: AudienceRule::everyone(),
            },
        )
        .await?;
    app.posts
        .create(
            Some(&asha),
            PostDraft {
                title: "Placement prep group for 2026 CSE/IT".to_string(),
                body: "Weekly mock interviews, DM to join.".to_string(),
                image_url: None,
                audience: seniors_only.clone(),
            },
        )
        .await?;

    let now = Utc::now();
    let event = app
        .events
        .create(
            Some(&ravi),
            EventDraft {
                title: "Robotics club demo day".to_string(),
                description: "Line followers and a very confused drone.".to_string(),
                venue: "Main auditorium".to_string(),
                starts_at: now + Duration::days(2),
                ends_at: now + Duration::days(2) + Duration::hours(3),
                poster_url: None,
                audience: AudienceRule::everyone(),
            },
        )
        .await?;
    app.opportunities
        .create(
            Some(&asha),
            OpportunityDraft {
                title: "Backend intern".to_string(),
                company: "Acme Systems".to_string(),
                description: "Six months, stipend, Rust a plus.".to_string(),
                apply_url: Some("https://careers.example.com/backend-intern".to_string()),
                deadline: Some(now + Duration::days(14)),
                eligibility: seniors_only,
            },
        )
        .await?;
    let lost = app
        .lost_found
        .report_lost(
            Some(&ravi),
            ReportDraft {
                item_name: "Blue water bottle".to_string(),
                description: "Left in LH-3 after the maths lecture.".to_string(),
                location: "LH-3".to_string(),
                image_url: None,
            },
        )
        .await?;
    app.lost_found
        .report_found(
            Some(&asha),
            ReportDraft {
                item_name: "Blue water bottle".to_string(),
                description: "Handed in at the library desk.".to_string(),
                location: "Library".to_string(),
                image_url: None,
            },
            Some(lost.id),
        )
        .await?;

    // Vote round-trip and a registration.
    let receipt = app
        .votes
        .cast(Some(&ravi), notice.id, VoteAction::Up)
        .await?;
    tracing::info!(post = %notice.id, ?receipt.new_state, receipt.upvotes, "vote committed");
    app.events.register(Some(&asha), event.id).await?;

    // Feed summaries per viewer; the gated post and opportunity must be
    // invisible to Ravi (ECE 2025) and to anonymous viewers.
    for (label, viewer) in [
        ("asha", Some(&asha)),
        ("ravi", Some(&ravi)),
        ("anonymous", None),
    ] {
        let posts = app.posts.feed(viewer).await?;
        let upcoming = app.events.feed(viewer, EventScope::Upcoming).await?;
        let opportunities = app.opportunities.feed(viewer).await?;
        let reports = app.lost_found.feed().await?;
        tracing::info!(
            viewer = label,
            posts = posts.len(),
            upcoming_events = upcoming.len(),
            opportunities = opportunities.len(),
            reports = reports.len(),
            "feed summary"
        );
    }
    Ok(())
}
