//! Contract checks at the port boundary: services must respect the order
//! the store supplies and must keep decoration read-only.

use std::sync::Arc;

use chrono::{Duration, Utc};
use domains::{MockPostStore, MockVoteStore, Post};
use integration_tests::cse_2026;
use services::PostService;

#[tokio::test]
async fn feed_preserves_the_stores_ordering_verbatim() {
    // The store owns ordering (created_at descending via its index); the
    // composer must not re-sort.
    let mut first = Post::new("uid-x", "first", "body");
    first.created_at = Utc::now();
    let mut second = Post::new("uid-x", "second", "body");
    second.created_at = Utc::now() - Duration::minutes(1);
    let mut third = Post::new("uid-x", "third", "body");
    third.created_at = Utc::now() - Duration::minutes(2);

    let listed = vec![first, second, third];
    let mut posts = MockPostStore::new();
    posts
        .expect_list_posts()
        .returning(move || Ok(listed.clone()));
    let mut votes = MockVoteStore::new();
    votes.expect_votes_by_voter().returning(|_| Ok(Vec::new()));

    let service = PostService::new(Arc::new(posts), Arc::new(votes));
    let v = cse_2026();
    let feed = service.feed(Some(&v)).await.unwrap();
    let titles: Vec<&str> = feed.iter().map(|p| p.post.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn decoration_reads_the_vote_store_exactly_once_per_feed() {
    let listed = vec![Post::new("uid-x", "a", "body"), Post::new("uid-x", "b", "body")];
    let mut posts = MockPostStore::new();
    posts
        .expect_list_posts()
        .times(1)
        .returning(move || Ok(listed.clone()));

    // One voter-scoped lookup, never a per-item query and never a write.
    let mut votes = MockVoteStore::new();
    votes
        .expect_votes_by_voter()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    votes.expect_apply_vote().never();

    let service = PostService::new(Arc::new(posts), Arc::new(votes));
    let v = cse_2026();
    let feed = service.feed(Some(&v)).await.unwrap();
    assert_eq!(feed.len(), 2);
    assert!(feed.iter().all(|p| p.my_vote.is_none()));
}
