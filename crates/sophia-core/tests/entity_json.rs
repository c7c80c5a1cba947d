//! JSON shape of the entities printed by `sophia --format json`.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use sophia_core::entities::*;
use sophia_core::enums::{Activity, Language};

fn snippet() -> Snippet {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    Snippet {
        id: "snp-0a1b2c3d".into(),
        user_id: "usr-11223344".into(),
        collection_id: None,
        title: "Two Sum".into(),
        code: "def two_sum(nums, target): ...".into(),
        description: Some("hash map lookup".into()),
        language: Language::Python,
        tags: vec!["arrays".into(), "hashing".into()],
        has_embedding: true,
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn snippet_serializes_language_and_tags() {
    let value = serde_json::to_value(snippet()).unwrap();
    assert_eq!(value["language"], json!("python"));
    assert_eq!(value["tags"], json!(["arrays", "hashing"]));
    assert_eq!(value["collection_id"], json!(null));
    assert_eq!(value["created_at"], json!("2026-03-01T12:00:00Z"));
}

#[test]
fn scored_snippet_keeps_score() {
    let scored = ScoredSnippet {
        snippet: snippet(),
        score: 0.5,
    };
    let value = serde_json::to_value(&scored).unwrap();
    assert_eq!(value["score"], json!(0.5));
    assert_eq!(value["snippet"]["title"], json!("Two Sum"));
}

#[test]
fn badge_icon_is_optional_on_input() {
    let badge: Badge = serde_json::from_value(json!({
        "slug": "night-owl",
        "name": "Night Owl",
        "description": "Searched a lot",
        "criteria": "search >= 50",
    }))
    .unwrap();
    assert_eq!(badge.icon, None);
}

#[test]
fn activity_stats_keys_are_activity_names() {
    let stats = ActivityStats {
        counts: [(Activity::SnippetCreated, 3), (Activity::Search, 1)]
            .into_iter()
            .collect(),
        total_points: 31,
    };
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(
        value,
        json!({"counts": {"snippet_created": 3, "search": 1}, "total_points": 31})
    );
    assert_eq!(stats.count(Activity::AiTagging), 0);
}

#[test]
fn collection_tree_totals_include_descendants() {
    let at = Utc::now();
    let leaf = |id: &str, count: u64| CollectionNode {
        collection: Collection {
            id: id.into(),
            user_id: "usr-11223344".into(),
            name: id.into(),
            parent_id: Some("col-root0000".into()),
            created_at: at,
            updated_at: at,
        },
        snippet_count: count,
        children: vec![],
    };
    let mut root = leaf("col-root0000", 1);
    root.collection.parent_id = None;
    root.children = vec![leaf("col-aaaaaaaa", 2), leaf("col-bbbbbbbb", 4)];
    assert_eq!(root.total_snippets(), 7);
}
