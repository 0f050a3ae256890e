#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use eventhub_api::token::TokenIssuer;
use eventhub_api::{AppState, AppStateInner, router};
use eventhub_db::Database;

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_db(Database::open_in_memory().unwrap())
    }

    pub fn with_db(db: Database) -> Self {
        let tokens = TokenIssuer::new(SECRET, Duration::minutes(120));
        let state = AppStateInner::new(db, tokens);
        Self {
            app: router(state.clone()),
            state,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// Register and log in an admin, returning (token, admin id).
    pub async fn admin(&self, email: &str) -> (String, i64) {
        let (status, _) = self
            .post(
                "/api/auth/register",
                None,
                json!({"fullName": "Ada Admin", "email": email, "password": "admin-pass-1"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({"email": email, "password": "admin-pass-1", "role": "Admin"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["token"].as_str().unwrap().to_string(),
            body["admin"]["adminId"].as_i64().unwrap(),
        )
    }

    /// Sign up and log in a participant, returning (token, participant id).
    pub async fn participant(&self, email: &str) -> (String, i64) {
        let (status, _) = self
            .post(
                "/api/Participants/SignUp",
                None,
                json!({"fullName": "Pat Participant", "email": email, "phoneNumber": "555", "password": "user-pass-1"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post(
                "/api/Participants/Login",
                None,
                json!({"email": email, "password": "user-pass-1"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["token"].as_str().unwrap().to_string(),
            body["participant"]["participantId"].as_i64().unwrap(),
        )
    }

    pub async fn create_event(&self, admin_token: &str, name: &str, date: &str, max_capacity: i64) -> i64 {
        let (status, body) = self
            .post(
                "/api/Events/create",
                Some(admin_token),
                json!({
                    "eventName": name,
                    "eventDate": date,
                    "location": "Main Hall",
                    "description": "Bring a laptop",
                    "maxCapacity": max_capacity,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["eventId"].as_i64().unwrap()
    }

    pub async fn capacity(&self, token: &str, event_id: i64) -> i64 {
        let (status, body) = self.get(&format!("/api/Events/{event_id}/capacity"), token).await;
        assert_eq!(status, StatusCode::OK);
        body["currentRegistrations"].as_i64().unwrap()
    }
}
