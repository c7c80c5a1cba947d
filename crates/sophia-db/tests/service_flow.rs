//! End-to-end flow through the public service API on a file database.

use sophia_config::SophiaConfig;
use sophia_core::entities::NewSnippet;
use sophia_core::enums::Language;
use sophia_db::SophiaService;
use sophia_db::repos::snippet::SnippetFilter;

fn config() -> SophiaConfig {
    let mut config = SophiaConfig::default();
    config.auth.pbkdf2_iterations = 1_000;
    config.auth.secret_key = "integration-secret".into();
    config
}

#[tokio::test]
async fn register_login_organise_and_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("sophia.db");
    let path = path.to_str().unwrap();

    let token = {
        let svc = SophiaService::new_local(path, &config()).await.unwrap();
        let user = svc
            .register_user("ada", "ada@example.com", "s3cret", "s3cret")
            .await
            .unwrap();
        let (_, token) = svc.login("ada", "s3cret", true).await.unwrap();

        let (graphs, _) = svc.create_collection(&user.id, "Graphs", None).await.unwrap();
        svc.create_snippet(
            &user.id,
            NewSnippet {
                title: "Breadth-first search".into(),
                code: "from collections import deque".into(),
                language: Language::Python,
                tags: Some("graphs, bfs".into()),
                collection_id: Some(graphs.id),
                ..NewSnippet::default()
            },
        )
        .await
        .unwrap();
        token
    };

    // Same file, new process-like handle: session and data persist.
    let svc = SophiaService::new_local(path, &config()).await.unwrap();
    let user = svc.resolve_session(&token).await.unwrap().expect("session persists");
    assert_eq!(user.username, "ada");

    let page = svc
        .list_snippets(
            &user.id,
            &SnippetFilter {
                tag: Some("bfs".into()),
                ..SnippetFilter::default()
            },
            1,
            10,
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    let profile = svc.user_profile(&user.id).await.unwrap();
    assert_eq!(profile.total_points, 15);
    assert!(profile.badges.iter().any(|b| b.badge.slug == "first-snippet"));

    // Badge definitions are re-synced, not duplicated.
    assert_eq!(svc.list_badges().await.unwrap().len(), config().gamification.badges.len());
}

#[tokio::test]
async fn different_secret_invalidates_sessions() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("sophia.db");
    let path = path.to_str().unwrap();

    let svc = SophiaService::new_local(path, &config()).await.unwrap();
    svc.register_user("ada", "ada@example.com", "pw", "pw").await.unwrap();
    let (_, token) = svc.login("ada", "pw", false).await.unwrap();
    drop(svc);

    let mut rotated = config();
    rotated.auth.secret_key = "rotated-secret".into();
    let svc = SophiaService::new_local(path, &rotated).await.unwrap();
    assert!(svc.resolve_session(&token).await.unwrap().is_none());
}
