//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use artist_site_server::{build_router, config::Config, state::AppState};

pub const PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub router: axum::Router,
    pub dir: tempfile::TempDir,
}

impl TestApp {
    pub fn content_path(&self) -> PathBuf {
        self.dir.path().join("data").join("site-content.json")
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("public").join("uploads")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Log in and return the raw `admin_token` cookie pair.
    pub async fn login(&self) -> String {
        let response = self.send(login_request(PASSWORD, "192.0.2.1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        admin_cookie(&response).expect("login sets admin_token")
    }

    pub fn read_content(&self) -> Value {
        let raw = std::fs::read(self.content_path()).unwrap();
        serde_json::from_slice(&raw).unwrap()
    }
}

pub fn sample_content() -> Value {
    json!({
        "hero": { "title": "DJ Nova", "subtitle": "House and techno" },
        "about": { "title": "About", "bio": "Born in Lisbon." },
        "contact": {
            "email": "booking@example.com",
            "phone": "",
            "address": "",
            "social": { "spotify": "", "instagram": "", "youtube": "",
                        "twitter": "", "facebook": "", "tiktok": "" }
        },
        "businessServices": [],
        "events": [
            { "id": "1", "title": "Opening", "date": "2025-05-01", "description": "Season opener" }
        ],
        "sponsors": []
    })
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(Some(PASSWORD), Some(sample_content()))
}

pub fn spawn_app_with(password: Option<&str>, content: Option<Value>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    if let Some(content) = content {
        std::fs::write(
            data_dir.join("site-content.json"),
            serde_json::to_vec_pretty(&content).unwrap(),
        )
        .unwrap();
    }

    let config = Config {
        admin_password: password.map(str::to_string),
        jwt_secret: Some("integration-test-secret".to_string()),
        content_path: data_dir.join("site-content.json"),
        public_dir: dir.path().join("public"),
        upload_dir: dir.path().join("public").join("uploads"),
        ..Config::default()
    };

    TestApp {
        router: build_router(AppState::from_config(config)),
        dir,
    }
}

pub fn login_request(password: &str, identity: &str) -> Request<Body> {
    Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", identity)
        .body(Body::from(json!({ "password": password }).to_string()))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `name=value` of the `admin_token` Set-Cookie header, if any.
pub fn admin_cookie(response: &Response<Body>) -> Option<String> {
    set_cookie(response)
        .and_then(|c| c.split(';').next().map(str::to_string))
        .filter(|pair| pair.starts_with("admin_token="))
}

pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

const BOUNDARY: &str = "----artist-site-test-boundary";

/// A multipart upload with a single `file` field.
pub fn upload_request(
    cookie: Option<&str>,
    file_name: &str,
    mime_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    multipart_request(cookie, body)
}

/// A multipart body with only a text field.
pub fn upload_without_file(cookie: Option<&str>) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"caption\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );
    multipart_request(cookie, body.into_bytes())
}

fn multipart_request(cookie: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::post("/api/upload").header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}
