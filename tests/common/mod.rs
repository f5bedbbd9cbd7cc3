#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use community_backend::{
    AppState, config::Config, database::MemoryStore, router::create_router, storage::PhotoStorage,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub photo_dir: PathBuf,
    _tmp: TempDir,
}

pub fn test_config(storage_dir: PathBuf) -> Config {
    Config {
        database_url: "memory".into(),
        database_max_connections: 1,
        jwt_secret: "integration-secret".into(),
        jwt_expiration_secs: 3600,
        bcrypt_cost: 4,
        server_host: "127.0.0.1".into(),
        server_port: 0,
        api_base_uri: "/api".into(),
        storage_dir,
        max_upload_bytes: 1024 * 1024,
    }
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let photo_dir = tmp.path().join("photos");
    let config = test_config(photo_dir.clone());

    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
        storage: PhotoStorage::new(photo_dir.clone()).await.unwrap(),
        config,
    };

    TestApp {
        router: create_router(state),
        store,
        photo_dir,
        _tmp: tmp,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn code(&self) -> i64 {
        self.body["statusCode"].as_i64().unwrap()
    }

    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, body }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.call(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.call(Method::DELETE, uri, token, None).await
    }

    /// 注册并返回 (token, user id)
    pub async fn register(&self, phone_number: &str, email: &str) -> (String, String) {
        let response = self
            .post(
                "/api/register",
                None,
                json!({
                    "name": "Ada Lovelace",
                    "email": email,
                    "phoneNumber": phone_number,
                    "password": "analytical"
                }),
            )
            .await;
        assert_eq!(response.code(), 0, "register failed: {}", response.body);
        let data = response.data();
        (
            data["token"].as_str().unwrap().to_string(),
            data["id"].as_str().unwrap().to_string(),
        )
    }

    pub async fn create_community(&self, token: &str, name: &str) -> String {
        let response = self
            .post(
                "/api/communities",
                Some(token),
                json!({
                    "name": name,
                    "emails": ["board@example.org"],
                    "phoneNumbers": ["+15550100"],
                    "description": "Residents association"
                }),
            )
            .await;
        assert_eq!(response.code(), 0, "create community failed: {}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    pub fn photo_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.photo_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
    }
}

const BOUNDARY: &str = "community-test-boundary";

/// 手工拼出 multipart/form-data 请求体
pub fn multipart_request(
    uri: &str,
    token: &str,
    fields: &[(&str, String)],
    files: &[(&str, &[u8])],
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{name}.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn card_fields(community_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("cardNumber", "CN-0001".to_string()),
        ("fullName", "Ada Lovelace".to_string()),
        ("communityId", community_id.to_string()),
        ("dateOfBirth", "1815-12-10".to_string()),
        ("nationality", "British".to_string()),
        ("gender", "female".to_string()),
    ]
}

pub const PHOTOS: [(&str, &[u8]); 3] = [
    ("passportPhoto", b"passport-bytes"),
    ("frontPhoto", b"front-bytes"),
    ("backPhoto", b"back-bytes"),
];
