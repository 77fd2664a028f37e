#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bizcard_api::config::AppConfig;
use bizcard_api::database::MemoryRepository;
use bizcard_api::AppState;

pub struct TestApp {
    router: Router,
    pub config: AppConfig,
}

impl TestApp {
    /// Development preset over a fresh in-memory store, without seed data.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::development();
        config.seed.enabled = false;
        config.api.enable_request_logging = false;
        config.security.jwt_secret = "integration-test-secret".to_string();
        adjust(&mut config);

        let state = AppState::new(Arc::new(MemoryRepository::new()), config.clone());
        Self {
            router: bizcard_api::app(state),
            config,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    /// Send a prepared request, for cases the JSON helpers cannot express.
    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<(StatusCode, Value)> {
        self.request(Method::PATCH, uri, token, body).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Register an account and return `(data, token)`.
    pub async fn register(&self, body: Value) -> Result<(Value, String)> {
        let (status, body) = self.post("/users", None, body).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed with {status}: {body}");
        let token = body["data"]["token"]
            .as_str()
            .context("register response has no token")?
            .to_string();
        Ok((body["data"].clone(), token))
    }

    pub async fn register_regular(&self, email: &str) -> Result<(Value, String)> {
        self.register(user_payload(email)).await
    }

    pub async fn register_business(&self, email: &str) -> Result<(Value, String)> {
        let mut body = user_payload(email);
        body["isBusiness"] = json!(true);
        self.register(body).await
    }

    pub async fn register_admin(&self, email: &str) -> Result<(Value, String)> {
        let mut body = user_payload(email);
        body["isBusiness"] = json!(true);
        body["isAdmin"] = json!(true);
        self.register(body).await
    }

    /// Create a card as the given business user and return its data.
    pub async fn create_card(&self, token: &str, title: &str) -> Result<Value> {
        let (status, body) = self.post("/cards", Some(token), card_payload(title)).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create card failed with {status}: {body}");
        Ok(body["data"].clone())
    }
}

pub const PASSWORD: &str = "Secret@123";

pub fn user_payload(email: &str) -> Value {
    json!({
        "name": { "first": "Dana", "last": "Levi" },
        "phone": "0501234567",
        "email": email,
        "password": PASSWORD,
        "address": {
            "country": "Israel",
            "city": "Haifa",
            "street": "HaNassi",
            "houseNumber": 3
        }
    })
}

pub fn card_payload(title: &str) -> Value {
    json!({
        "title": title,
        "subtitle": "Pipes and more",
        "description": "Family business since 1990",
        "phone": "0521234567",
        "email": "office@example.com",
        "web": "https://plumbing.example.com",
        "address": {
            "country": "Israel",
            "city": "Haifa",
            "street": "Herzl",
            "houseNumber": 12
        }
    })
}

pub fn id_of(data: &Value) -> String {
    data["_id"].as_str().unwrap_or_default().to_string()
}
