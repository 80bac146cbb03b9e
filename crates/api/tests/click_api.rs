//! HTTP-level integration tests for `POST /api/increment_click`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_app, build_pg_test_app, build_test_app, get, id_of, item, post_json,
};
use gallery_core::object_store::MemoryObjectStore;
use gallery_db::models::item::CreateItem;
use gallery_db::repositories::ItemRepo;
use gallery_db::store::FixtureItemStore;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::test]
async fn increment_returns_next_count_and_persists_it() {
    let app = build_test_app(vec![item(1, "X", 1, 5)]);

    let response = post_json(app.clone(), "/api/increment_click", json!({ "id": id_of(1) })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "success": true, "click_count": 6 }));

    let item = body_json(get(app, &format!("/api/items/{}", id_of(1))).await).await;
    assert_eq!(item["click_count"], 6);
}

#[tokio::test]
async fn increment_missing_item_is_404_and_creates_nothing() {
    let app = build_test_app(vec![item(1, "X", 1, 5)]);

    let response = post_json(
        app.clone(),
        "/api/increment_click",
        json!({ "id": "missing-id" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["error"].is_string());

    let response = post_json(app.clone(), "/api/increment_click", json!({ "id": id_of(2) })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = body_json(get(app, "/api/items").await).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["click_count"], 5);
}

#[tokio::test]
async fn increment_without_id_is_400() {
    let app = build_test_app(vec![item(1, "X", 1, 5)]);

    for body in [json!({}), json!({ "id": "" }), json!({ "id": "   " })] {
        let response = post_json(app.clone(), "/api/increment_click", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Wallpaper ID is required");
    }
}

#[tokio::test]
async fn increment_with_malformed_body_is_400() {
    let app = build_test_app(vec![item(1, "X", 1, 5)]);
    let response = post_json(app, "/api/increment_click", json!({ "id": 42 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejected_write_reports_best_effort_count() {
    let store = FixtureItemStore::new(vec![item(1, "X", 1, 5)]).read_only();
    let app = build_app(Arc::new(store), Arc::new(MemoryObjectStore::new("/media")));

    let response = post_json(app.clone(), "/api/increment_click", json!({ "id": id_of(1) })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["click_count"], 6);
    assert_eq!(json["note"], "Click recorded locally");

    // Nothing was stored.
    let item = body_json(get(app, &format!("/api/items/{}", id_of(1))).await).await;
    assert_eq!(item["click_count"], 5);
}

#[tokio::test]
async fn rejected_write_on_missing_item_is_still_404() {
    let store = FixtureItemStore::new(vec![item(1, "X", 1, 5)]).read_only();
    let app = build_app(Arc::new(store), Arc::new(MemoryObjectStore::new("/media")));

    let response = post_json(app, "/api/increment_click", json!({ "id": id_of(3) })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Postgres-backed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_increments_are_not_lost(pool: PgPool) {
    let id = Uuid::from_u128(1);
    ItemRepo::create(
        &pool,
        &CreateItem {
            id,
            title: "X".to_string(),
            description: None,
            cover_url: "/media/covers/x.png".to_string(),
            pan_link: "https://pan.example.com/s/x".to_string(),
            created_by: None,
        },
    )
    .await
    .unwrap();

    let app = build_pg_test_app(pool.clone());
    let mut handles = Vec::new();
    for _ in 0..10 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post_json(app, "/api/increment_click", json!({ "id": id.to_string() }))
                .await
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let item = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(item.click_count, 10);
}
