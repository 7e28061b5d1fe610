use gateway::InMemoryApi;
use tutor_core::model::{Article, ArticleId, Question, QuestionId, Role};

use super::test_harness::setup_view_harness;

const EMAIL: &str = "ann@example.com";

fn seeded_api() -> InMemoryApi {
    let api = InMemoryApi::new();
    api.add_account(EMAIL, "pw", Role::User);
    api.add_article(Article::new(
        ArticleId::new(1),
        "Binary Search",
        "# Halving\n\nKeep the invariant `lo <= hi`.",
        "Searching",
    ));
    api.add_article(Article::new(ArticleId::new(2), "Tries", "Prefix trees.", "Trees"));
    api.add_question(Question::new(
        QuestionId::new(10),
        "Search Insert Position",
        "https://leetcode.com/problems/search-insert-position/",
        "Easy",
        ArticleId::new(1),
    ));
    api.add_question(Question::new(
        QuestionId::new(20),
        "Koko Eating Bananas",
        "https://leetcode.com/problems/koko-eating-bananas/",
        "Medium",
        ArticleId::new(1),
    ));
    api
}

#[tokio::test(flavor = "current_thread")]
async fn logged_out_screen_shows_auth_tabs() {
    let mut harness = setup_view_harness(seeded_api(), None).await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Login"), "missing login tab in {html}");
    assert!(html.contains("Sign Up"), "missing signup tab in {html}");
    assert!(html.contains("Password"), "missing form in {html}");
    assert!(!html.contains("Logout"), "unexpected shell in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn articles_tab_renders_flags_and_degraded_articles() {
    let api = seeded_api();
    api.set_progress(EMAIL, &[QuestionId::new(10)]);
    api.break_questions(ArticleId::new(2));
    let mut harness = setup_view_harness(api, Some((EMAIL, "pw"))).await;

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Logged in as User"), "missing status in {html}");
    assert!(html.contains("Binary Search"), "missing article in {html}");
    assert!(html.contains("<h1>Halving</h1>"), "missing markdown in {html}");
    assert!(html.contains("Completed"), "missing completed flag in {html}");
    assert!(html.contains("Mark as Done"), "missing mark button in {html}");
    assert!(html.contains("1/2 completed"), "missing count in {html}");
    assert!(html.contains("Tries"), "degraded article hidden in {html}");
    assert!(html.contains("Questions unavailable"), "missing note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn rejected_token_falls_back_to_login() {
    let api = seeded_api();
    let mut harness = setup_view_harness(api, Some((EMAIL, "pw"))).await;
    harness.api.revoke_tokens();

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(!harness.services.sessions().is_authenticated());
    assert!(html.contains("Sign Up"), "expected auth screen in {html}");
    assert!(!html.contains("Logout"), "shell still shown in {html}");
}
