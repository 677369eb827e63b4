//! # LostFoundService
//!
//! The lost-and-found board. Reports are public, newest first. A found
//! report may answer a lost report via `related_report`; the lost report
//! stays active, so several independent found claims can coexist. Closing
//! a report removes the record outright.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    AppError, LostFoundReport, LostFoundStore, ReportKind, Result, Viewer,
};
use uuid::Uuid;

/// Caller-supplied fields for a new report.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub item_name: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
}

pub struct LostFoundService {
    store: Arc<dyn LostFoundStore>,
}

impl LostFoundService {
    pub fn new(store: Arc<dyn LostFoundStore>) -> Self {
        Self { store }
    }

    pub async fn report_lost(
        &self,
        viewer: Option<&Viewer>,
        draft: ReportDraft,
    ) -> Result<LostFoundReport> {
        self.file(viewer, draft, ReportKind::Lost, None).await
    }

    /// Files a found report, optionally answering an existing lost report.
    /// The referenced report must exist and be a lost report; it is left
    /// active.
    pub async fn report_found(
        &self,
        viewer: Option<&Viewer>,
        draft: ReportDraft,
        answers: Option<Uuid>,
    ) -> Result<LostFoundReport> {
        if let Some(lost_id) = answers {
            let original = self
                .store
                .get_report(lost_id)
                .await?
                .ok_or_else(|| AppError::NotFound("report", lost_id.to_string()))?;
            if original.kind != ReportKind::Lost {
                return Err(AppError::InvalidArgument(
                    "a found report can only answer a lost report".to_string(),
                ));
            }
        }
        self.file(viewer, draft, ReportKind::Found, answers).await
    }

    /// Removes a report. Reporter-only; the record is hard-deleted.
    pub async fn close(&self, viewer: Option<&Viewer>, id: Uuid) -> Result<()> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("closing a report requires a signed-in viewer".to_string())
        })?;
        let report = self
            .store
            .get_report(id)
            .await?
            .ok_or_else(|| AppError::NotFound("report", id.to_string()))?;
        if report.reporter_id != viewer.id {
            return Err(AppError::Unauthenticated(
                "only the reporter may close a report".to_string(),
            ));
        }
        self.store.remove_report(id).await?;
        tracing::info!(report_id = %id, reporter = %viewer.id, "report closed");
        Ok(())
    }

    /// Active reports, newest first. The board is public: no audience rule.
    pub async fn feed(&self) -> Result<Vec<LostFoundReport>> {
        self.store.list_active_reports().await
    }

    async fn file(
        &self,
        viewer: Option<&Viewer>,
        draft: ReportDraft,
        kind: ReportKind,
        related_report: Option<Uuid>,
    ) -> Result<LostFoundReport> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("filing a report requires a signed-in viewer".to_string())
        })?;
        if draft.item_name.trim().is_empty() {
            return Err(AppError::InvalidArgument("report item name is empty".to_string()));
        }

        let report = LostFoundReport {
            id: Uuid::now_v7(),
            reporter_id: viewer.id.clone(),
            kind,
            item_name: draft.item_name.trim().to_string(),
            description: draft.description,
            location: draft.location,
            image_url: draft.image_url,
            related_report,
            active: true,
            created_at: Utc::now(),
        };
        self.store.insert_report(report.clone()).await?;
        tracing::info!(report_id = %report.id, reporter = %viewer.id, kind = ?kind, "report filed");
        Ok(report)
    }
}
