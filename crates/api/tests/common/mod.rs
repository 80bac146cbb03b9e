#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use gallery_core::object_store::{MemoryObjectStore, ObjectStore};
use gallery_db::models::item::Item;
use gallery_db::store::{FixtureItemStore, ItemStore, PgItemStore};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use gallery_api::auth::jwt::{generate_access_token, JwtConfig};
use gallery_api::auth::password::hash_password;
use gallery_api::config::{AdminConfig, DataSource, ServerConfig, StorageConfig};
use gallery_api::router::build_app_router;
use gallery_api::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test_password_123!";
pub const MAX_COVER_BYTES: usize = 1024;

/// Hashing is slow in debug builds; every test shares one hash.
fn admin_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(ADMIN_PASSWORD).expect("hashing should succeed"))
        .clone()
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a 1 KiB cover limit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_source: DataSource::Fixture {
            path: None,
            read_only: false,
        },
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        admin: AdminConfig {
            username: ADMIN_USERNAME.to_string(),
            password_hash: admin_password_hash(),
        },
        storage: StorageConfig {
            root: PathBuf::from("unused-in-tests"),
            public_base_url: "/media".to_string(),
            max_cover_bytes: MAX_COVER_BYTES,
        },
    }
}

/// Build the full application router with all middleware layers around the
/// given stores.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the production middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery).
pub fn build_app(items: Arc<dyn ItemStore>, objects: Arc<dyn ObjectStore>) -> Router {
    let config = test_config();
    let state = AppState {
        items,
        objects,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router over an in-memory catalog holding `items`.
pub fn build_test_app(items: Vec<Item>) -> Router {
    build_app(
        Arc::new(FixtureItemStore::new(items)),
        Arc::new(MemoryObjectStore::new("/media")),
    )
}

/// Router over the Postgres catalog behind `pool`.
pub fn build_pg_test_app(pool: PgPool) -> Router {
    build_app(
        Arc::new(PgItemStore::new(pool)),
        Arc::new(MemoryObjectStore::new("/media")),
    )
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// An item with a deterministic id (`Uuid::from_u128(n)`) created on
/// 2024-01-`day`.
pub fn item(n: u128, title: &str, day: u32, clicks: i64) -> Item {
    let created_at = Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
    Item {
        id: Uuid::from_u128(n),
        title: title.to_string(),
        description: Some(format!("{title} description")),
        cover_url: format!("/media/covers/{n}.png"),
        pan_link: format!("https://pan.example.com/s/{n}"),
        click_count: clicks,
        created_at,
        updated_at: created_at,
        created_by: None,
    }
}

pub fn id_of(n: u128) -> String {
    Uuid::from_u128(n).to_string()
}

/// A valid admin Bearer header value, signed with the test secret.
pub fn admin_bearer() -> String {
    bearer_for_role("admin")
}

pub fn bearer_for_role(role: &str) -> String {
    let token = generate_access_token(ADMIN_USERNAME, role, &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, bearer: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, bearer)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "gallery-test-boundary";

/// A part of a `multipart/form-data` body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    bearer: Option<&str>,
    parts: &[Part<'_>],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(bearer) = bearer {
        builder = builder.header(AUTHORIZATION, bearer);
    }
    let request = builder.body(Body::from(multipart_body(parts))).unwrap();
    send(app, request).await
}
