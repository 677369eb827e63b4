//! Visibility-rule behavior across the full matrix the feeds rely on.

use domains::{AppError, AudienceRule, Branch, Gender, Post, ViewerProfile};
use integration_tests::cse_2026;
use services::visible_to;

fn profile(branch: Branch, year: i32, gender: Gender) -> ViewerProfile {
    ViewerProfile {
        branch,
        graduation_year: year,
        gender,
    }
}

#[test]
fn fully_open_rule_admits_every_viewer_including_anonymous() {
    let rule = AudienceRule::everyone();
    assert!(rule.admits(None));
    for branch in [Branch::Cse, Branch::It, Branch::Ece, Branch::Unknown] {
        assert!(rule.admits(Some(&profile(branch, 1999, Gender::Unknown))));
    }
}

#[test]
fn one_failing_dimension_excludes_despite_two_matches() {
    // Branch and gender match; year does not. AND semantics must exclude.
    let mut rule = AudienceRule::everyone();
    rule.branches.insert(Branch::Cse);
    rule.graduation_years.insert(2027);
    rule.genders.insert(Gender::Female);

    let viewer = cse_2026();
    assert!(!rule.admits(Some(&viewer.profile)));

    // Fixing the failing dimension flips the outcome.
    rule.graduation_years.insert(2026);
    assert!(rule.admits(Some(&viewer.profile)));
}

#[test]
fn branch_allow_list_concrete_scenarios() {
    let viewer = cse_2026();

    let cse_or_it = AudienceRule::from_raw(&serde_json::json!({
        "allowedBranches": ["CSE", "IT"],
    }))
    .unwrap();
    assert!(cse_or_it.admits(Some(&viewer.profile)));

    let ece_only = AudienceRule::from_raw(&serde_json::json!({
        "allowedBranches": ["ECE"],
    }))
    .unwrap();
    assert!(!ece_only.admits(Some(&viewer.profile)));
}

#[test]
fn anonymous_viewers_only_see_fully_open_items() {
    let mut year_gated = AudienceRule::everyone();
    year_gated.graduation_years.insert(2026);
    assert!(!year_gated.admits(None));

    let mut gender_gated = AudienceRule::everyone();
    gender_gated.genders.insert(Gender::Female);
    assert!(!gender_gated.admits(None));
}

#[test]
fn feed_filter_keeps_order_and_drops_ineligible_items() {
    let viewer = cse_2026();
    let mut ece_only = AudienceRule::everyone();
    ece_only.branches.insert(Branch::Ece);

    let mut posts = Vec::new();
    for (i, title) in ["a", "b", "c", "d"].iter().enumerate() {
        let mut post = Post::new("uid-x", title, "body");
        if i % 2 == 1 {
            post.audience = ece_only.clone();
        }
        posts.push(post);
    }

    let filtered = visible_to(posts, Some(&viewer.profile));
    let titles: Vec<&str> = filtered.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c"]);
}

#[test]
fn malformed_rule_documents_are_rejected_not_defaulted() {
    let err = AudienceRule::from_raw(&serde_json::json!({
        "allowedGraduationYears": ["twenty-six"],
    }))
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));

    // A wholly absent rule is the open rule, not an error.
    assert!(AudienceRule::from_raw(&serde_json::Value::Null)
        .unwrap()
        .is_open());
}
