//! # OpportunityService
//!
//! Job/internship postings gated by eligibility rules of the same shape as
//! post audience rules. The feed is eligibility-filtered per viewer on
//! every fetch, newest first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domains::{AppError, AudienceRule, Opportunity, OpportunityStore, Result, Viewer};
use uuid::Uuid;

use crate::feed::visible_to;

/// Caller-supplied fields for a new opportunity.
#[derive(Debug, Clone)]
pub struct OpportunityDraft {
    pub title: String,
    pub company: String,
    pub description: String,
    pub apply_url: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub eligibility: AudienceRule,
}

pub struct OpportunityService {
    store: Arc<dyn OpportunityStore>,
}

impl OpportunityService {
    pub fn new(store: Arc<dyn OpportunityStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        viewer: Option<&Viewer>,
        draft: OpportunityDraft,
    ) -> Result<Opportunity> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("posting an opportunity requires a signed-in viewer".to_string())
        })?;
        if draft.title.trim().is_empty() || draft.company.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "opportunity needs a title and a company".to_string(),
            ));
        }
        if let Some(deadline) = draft.deadline {
            if deadline <= Utc::now() {
                return Err(AppError::InvalidArgument(
                    "application deadline is already past".to_string(),
                ));
            }
        }

        let opportunity = Opportunity {
            id: Uuid::now_v7(),
            author_id: viewer.id.clone(),
            title: draft.title.trim().to_string(),
            company: draft.company.trim().to_string(),
            description: draft.description,
            apply_url: draft.apply_url,
            deadline: draft.deadline,
            eligibility: draft.eligibility,
            created_at: Utc::now(),
        };
        self.store.insert_opportunity(opportunity.clone()).await?;
        tracing::info!(opportunity_id = %opportunity.id, author = %viewer.id, "opportunity created");
        Ok(opportunity)
    }

    /// Eligibility-filtered feed, newest first (store order preserved).
    pub async fn feed(&self, viewer: Option<&Viewer>) -> Result<Vec<Opportunity>> {
        let all = self.store.list_opportunities().await?;
        Ok(visible_to(all, viewer.map(|v| &v.profile)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{Branch, Gender, MockOpportunityStore, ViewerProfile};

    fn opportunity(title: &str, eligibility: AudienceRule) -> Opportunity {
        Opportunity {
            id: Uuid::now_v7(),
            author_id: "uid-tpo".to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            apply_url: None,
            deadline: None,
            eligibility,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn feed_applies_eligibility_per_viewer() {
        let mut cse_only = AudienceRule::everyone();
        cse_only.branches.insert(Branch::Cse);
        let listed = vec![
            opportunity("open to all", AudienceRule::everyone()),
            opportunity("cse internship", cse_only),
        ];

        let mut store = MockOpportunityStore::new();
        store
            .expect_list_opportunities()
            .returning(move || Ok(listed.clone()));
        let service = OpportunityService::new(Arc::new(store));

        let ece_viewer = Viewer {
            id: "uid-3".to_string(),
            profile: ViewerProfile {
                branch: Branch::Ece,
                graduation_year: 2025,
                gender: Gender::Male,
            },
        };
        let feed = service.feed(Some(&ece_viewer)).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].title, "open to all");

        let anonymous = service.feed(None).await.unwrap();
        assert_eq!(anonymous.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_past_deadline() {
        let service = OpportunityService::new(Arc::new(MockOpportunityStore::new()));
        let v = Viewer {
            id: "uid-tpo".to_string(),
            profile: ViewerProfile {
                branch: Branch::It,
                graduation_year: 2024,
                gender: Gender::PreferNotToSay,
            },
        };
        let err = service
            .create(
                Some(&v),
                OpportunityDraft {
                    title: "SDE Intern".to_string(),
                    company: "Acme".to_string(),
                    description: String::new(),
                    apply_url: None,
                    deadline: Some(Utc::now() - chrono::Duration::days(1)),
                    eligibility: AudienceRule::everyone(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
