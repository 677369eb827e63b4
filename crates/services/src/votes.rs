//! # VoteService
//!
//! The authentication gate and retry shell around the vote transaction.
//! The state machine itself lives in `domains::voting`; the single-attempt
//! transaction lives behind the [`VoteStore`] port. This service rejects
//! anonymous callers before touching the store and absorbs transient
//! commit conflicts up to a fixed bound.

use std::sync::Arc;

use domains::{AppError, Result, Viewer, VoteAction, VoteReceipt, VoteStore};
use uuid::Uuid;

pub struct VoteService {
    store: Arc<dyn VoteStore>,
    /// How many times a conflicted transaction is re-attempted before the
    /// conflict surfaces to the caller.
    retry_limit: u32,
}

impl VoteService {
    pub fn new(store: Arc<dyn VoteStore>, retry_limit: u32) -> Self {
        Self { store, retry_limit }
    }

    /// Casts `action` on `item_id` for the given viewer.
    ///
    /// Each attempt re-reads the voter's committed record inside the store
    /// transaction, so a retry after a lost race observes the winner's
    /// state rather than assuming "no existing vote".
    pub async fn cast(
        &self,
        viewer: Option<&Viewer>,
        item_id: Uuid,
        action: VoteAction,
    ) -> Result<VoteReceipt> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("voting requires a signed-in viewer".to_string())
        })?;

        let mut attempt: u32 = 0;
        loop {
            match self.store.apply_vote(item_id, &viewer.id, action).await {
                Err(err) if err.is_retryable() && attempt < self.retry_limit => {
                    attempt += 1;
                    tracing::warn!(
                        %item_id,
                        voter = %viewer.id,
                        attempt,
                        "vote transaction conflicted, retrying"
                    );
                }
                Ok(receipt) => {
                    tracing::debug!(
                        %item_id,
                        voter = %viewer.id,
                        new_state = ?receipt.new_state,
                        upvotes = receipt.upvotes,
                        downvotes = receipt.downvotes,
                        "vote committed"
                    );
                    return Ok(receipt);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
