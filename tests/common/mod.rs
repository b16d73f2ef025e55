#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use posts_api::app::cors_layer;
use posts_api::auth::TokenVerifier;
use posts_api::config::{ApiConfig, SecurityConfig};
use posts_api::database::{DatabaseError, MemoryPostStore, NewPost, Post, PostStore, PostWithUser};
use posts_api::{app, AppState};

pub const SECRET: &str = "integration-secret";
pub const ADA: i32 = 5;
pub const BOB: i32 = 9;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryPostStore>,
    pub verifier: TokenVerifier,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl TestResponse {
    pub fn json(&self) -> &Value {
        self.body.as_ref().expect("response had no JSON body")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub fn api_config(mount_path: &str) -> ApiConfig {
    ApiConfig {
        port: 0,
        mount_path: mount_path.to_string(),
        enable_request_logging: false,
        max_request_size_bytes: 64 * 1024,
    }
}

/// Router over an in-memory store seeded with users 5 (ada) and 9 (bob)
pub async fn spawn_app() -> TestApp {
    spawn_app_at("").await
}

pub async fn spawn_app_at(mount_path: &str) -> TestApp {
    let store = Arc::new(MemoryPostStore::new());
    store.insert_user(ADA, json!({ "name": "ada" })).await;
    store.insert_user(BOB, json!({ "name": "bob" })).await;

    let verifier = TokenVerifier::new(SECRET, 1);
    let state = AppState::new(store.clone(), verifier.clone());
    let router = app(state, &api_config(mount_path), None);

    TestApp {
        router,
        store,
        verifier,
    }
}

/// Store whose every call fails, as if the database were unreachable
pub struct FailingStore;

impl FailingStore {
    fn down<T>() -> Result<T, DatabaseError> {
        Err(DatabaseError::QueryError("connection refused".to_string()))
    }
}

#[async_trait]
impl PostStore for FailingStore {
    async fn create(&self, _post: NewPost) -> Result<Post, DatabaseError> {
        Self::down()
    }

    async fn find_all(&self) -> Result<Vec<PostWithUser>, DatabaseError> {
        Self::down()
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<PostWithUser>, DatabaseError> {
        Self::down()
    }

    async fn find_by_user_id(&self, _user_id: i32) -> Result<Vec<PostWithUser>, DatabaseError> {
        Self::down()
    }

    async fn delete(&self, _id: i32) -> Result<(), DatabaseError> {
        Self::down()
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Self::down()
    }
}

/// Router over `store` with CORS built from `cors_origins` (disabled when `None`)
pub fn router_with(store: Arc<dyn PostStore>, cors_origins: Option<&[&str]>) -> Router {
    let security = SecurityConfig {
        jwt_secret: SECRET.to_string(),
        enable_cors: cors_origins.is_some(),
        cors_origins: cors_origins
            .unwrap_or_default()
            .iter()
            .map(|o| o.to_string())
            .collect(),
        jwt_expiry_hours: 1,
    };
    let state = AppState::new(store, TokenVerifier::new(SECRET, 1));
    app(state, &api_config(""), cors_layer(&security))
}

/// Drive one request through `router` and collect status, headers and JSON body
pub async fn send(router: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes)?)
    };

    Ok(TestResponse {
        status,
        headers,
        body,
    })
}

impl TestApp {
    pub fn token_for(&self, user_id: i32) -> String {
        self.verifier.issue(user_id).expect("failed to sign token")
    }

    /// Insert a post directly through the store, bypassing HTTP
    pub async fn seed_post(&self, description: &str, owner_id: i32) -> i32 {
        self.store
            .create(NewPost {
                description: description.to_string(),
                owner_id,
            })
            .await
            .expect("failed to seed post")
            .id
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        send(&self.router, request).await
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn get_as(&self, uri: &str, user_id: i32) -> Result<TestResponse> {
        let auth = format!("Bearer {}", self.token_for(user_id));
        self.request(Method::GET, uri, Some(&auth), None).await
    }

    pub async fn create_as(&self, user_id: i32, body: Value) -> Result<TestResponse> {
        let auth = format!("Bearer {}", self.token_for(user_id));
        self.request(Method::POST, "/post", Some(&auth), Some(body)).await
    }

    pub async fn delete_as(&self, uri: &str, user_id: i32) -> Result<TestResponse> {
        let auth = format!("Bearer {}", self.token_for(user_id));
        self.request(Method::DELETE, uri, Some(&auth), None).await
    }
}
