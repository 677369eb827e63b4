//! # PostService
//!
//! CRUD orchestration and feed composition for community posts/notices.
//! The feed is audience-filtered per viewer on every fetch and decorated
//! with the caller's own vote by a read-only lookup.

use std::collections::HashMap;
use std::sync::Arc;

use domains::{
    AppError, AudienceRule, Post, PostStore, Result, Viewer, VoteKind, VoteStore,
};
use serde::Serialize;
use uuid::Uuid;

/// Caller-supplied fields for a new post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub audience: AudienceRule,
}

/// A post as the caller sees it: the record plus the caller's own vote.
/// Decoration only; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub my_vote: Option<VoteKind>,
}

pub struct PostService {
    posts: Arc<dyn PostStore>,
    votes: Arc<dyn VoteStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, votes: Arc<dyn VoteStore>) -> Self {
        Self { posts, votes }
    }

    pub async fn create(&self, viewer: Option<&Viewer>, draft: PostDraft) -> Result<Post> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("posting requires a signed-in viewer".to_string())
        })?;
        if draft.title.trim().is_empty() {
            return Err(AppError::InvalidArgument("post title is empty".to_string()));
        }
        if draft.body.trim().is_empty() {
            return Err(AppError::InvalidArgument("post body is empty".to_string()));
        }

        let mut post = Post::new(&viewer.id, draft.title.trim(), &draft.body);
        post.image_url = draft.image_url;
        post.audience = draft.audience;

        self.posts.insert_post(post.clone()).await?;
        tracing::info!(post_id = %post.id, author = %viewer.id, "post created");
        Ok(post)
    }

    /// Removes a post. Only the author may do this; the record is gone
    /// afterwards, there is no tombstone.
    pub async fn delete(&self, viewer: Option<&Viewer>, id: Uuid) -> Result<()> {
        let viewer = viewer.ok_or_else(|| {
            AppError::Unauthenticated("deleting requires a signed-in viewer".to_string())
        })?;
        let post = self
            .posts
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", id.to_string()))?;
        if post.author_id != viewer.id {
            return Err(AppError::Unauthenticated(
                "only the author may delete a post".to_string(),
            ));
        }
        self.posts.delete_post(id).await?;
        tracing::info!(post_id = %id, author = %viewer.id, "post deleted");
        Ok(())
    }

    /// The notice feed: newest first, audience-filtered for the viewer,
    /// each entry decorated with the viewer's own vote.
    pub async fn feed(&self, viewer: Option<&Viewer>) -> Result<Vec<PostView>> {
        let posts = self.posts.list_posts().await?;
        let visible = crate::feed::visible_to(posts, viewer.map(|v| &v.profile));

        let my_votes: HashMap<Uuid, VoteKind> = match viewer {
            Some(v) => self
                .votes
                .votes_by_voter(&v.id)
                .await?
                .into_iter()
                .map(|record| (record.item_id, record.kind))
                .collect(),
            None => HashMap::new(),
        };

        Ok(visible
            .into_iter()
            .map(|post| {
                let my_vote = my_votes.get(&post.id).copied();
                PostView { post, my_vote }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{Branch, Gender, MockPostStore, MockVoteStore, ViewerProfile, VoteRecord};

    fn viewer(id: &str) -> Viewer {
        Viewer {
            id: id.to_string(),
            profile: ViewerProfile {
                branch: Branch::Cse,
                graduation_year: 2026,
                gender: Gender::Female,
            },
        }
    }

    #[tokio::test]
    async fn create_rejects_blank_body() {
        let service = PostService::new(
            Arc::new(MockPostStore::new()),
            Arc::new(MockVoteStore::new()),
        );
        let v = viewer("uid-1");
        let err = service
            .create(
                Some(&v),
                PostDraft {
                    title: "Notice".to_string(),
                    body: "   ".to_string(),
                    image_url: None,
                    audience: AudienceRule::everyone(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn delete_refuses_non_author() {
        let stranger = viewer("uid-stranger");
        let post = Post::new("uid-owner", "title", "body");
        let post_id = post.id;

        let mut posts = MockPostStore::new();
        posts
            .expect_get_post()
            .returning(move |_| Ok(Some(post.clone())));
        posts.expect_delete_post().never();

        let service = PostService::new(Arc::new(posts), Arc::new(MockVoteStore::new()));
        let err = service.delete(Some(&stranger), post_id).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn feed_decorates_with_the_callers_vote_only() {
        let v = viewer("uid-1");
        let voted = Post::new("uid-2", "voted", "body");
        let other = Post::new("uid-2", "other", "body");
        let voted_id = voted.id;

        let mut posts = MockPostStore::new();
        let listed = vec![voted, other];
        posts
            .expect_list_posts()
            .returning(move || Ok(listed.clone()));

        let mut votes = MockVoteStore::new();
        votes.expect_votes_by_voter().returning(move |voter| {
            Ok(vec![VoteRecord {
                item_id: voted_id,
                voter_id: voter.to_string(),
                kind: VoteKind::Up,
                updated_at: Utc::now(),
            }])
        });

        let service = PostService::new(Arc::new(posts), Arc::new(votes));
        let feed = service.feed(Some(&v)).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].my_vote, Some(VoteKind::Up));
        assert_eq!(feed[1].my_vote, None);
    }

    #[tokio::test]
    async fn anonymous_feed_skips_the_vote_lookup_and_restricted_posts() {
        let open = Post::new("uid-2", "open", "body");
        let mut gated = Post::new("uid-2", "gated", "body");
        gated.audience.branches.insert(Branch::Cse);

        let mut posts = MockPostStore::new();
        let listed = vec![open, gated];
        posts
            .expect_list_posts()
            .returning(move || Ok(listed.clone()));

        let mut votes = MockVoteStore::new();
        votes.expect_votes_by_voter().never();

        let service = PostService::new(Arc::new(posts), Arc::new(votes));
        let feed = service.feed(None).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].post.title, "open");
    }
}
