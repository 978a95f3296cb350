// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use profile_service::config::Config;
use profile_service::db::{MemoryProfileStore, MongoProfileStore, ProfileStore};
use profile_service::error::AppError;
use profile_service::models::UserProfile;
use profile_service::routes::create_router;
use profile_service::AppState;
use std::sync::Arc;

/// Check if a MongoDB server is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGODB_URI").is_ok()
}

/// Skip test with message if MongoDB is not available.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: MONGODB_URI not set");
            return;
        }
    };
}

/// Connect to the test MongoDB using a fresh collection.
#[allow(dead_code)]
pub async fn test_mongo_store() -> MongoProfileStore {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let config = Config {
        mongodb_uri: std::env::var("MONGODB_URI").unwrap(),
        collection: format!("profiles_{}", nanos),
        ..Config::test_default()
    };

    MongoProfileStore::connect(&config)
        .await
        .expect("Failed to connect to MongoDB")
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the store so tests can inspect it.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<MemoryProfileStore>) {
    let store = Arc::new(MemoryProfileStore::new());
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: store.clone(),
    });

    (create_router(state), store)
}

/// Build a request with an optional JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Store that fails every call, like a MongoDB server that went away.
#[allow(dead_code)]
pub struct OfflineStore;

#[async_trait::async_trait]
impl ProfileStore for OfflineStore {
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        Err(offline())
    }

    async fn insert(&self, _profile: &UserProfile) -> Result<(), AppError> {
        Err(offline())
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        Err(offline())
    }

    async fn find_by_msisdn(&self, _msisdn: &str) -> Result<Option<UserProfile>, AppError> {
        Err(offline())
    }

    async fn replace_by_msisdn(
        &self,
        _msisdn: &str,
        _profile: &UserProfile,
    ) -> Result<bool, AppError> {
        Err(offline())
    }

    async fn delete_by_msisdn(&self, _msisdn: &str) -> Result<bool, AppError> {
        Err(offline())
    }
}

fn offline() -> AppError {
    AppError::Store("server selection timeout: connection refused".to_string())
}

/// Create a test app whose store is unreachable.
#[allow(dead_code)]
pub fn create_offline_test_app() -> axum::Router {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: Arc::new(OfflineStore),
    });

    create_router(state)
}
