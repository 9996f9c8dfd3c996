//! Shared fixtures for driving the router in-process.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use waterplant_backend_rs::{
    app,
    modules::{
        auth::{repository::otp::InMemoryOtpStore, service::otp::OtpService},
        notification::service::{sms::SmsSender, Result as SmsResult},
        user::repository::{Account, CreateAccountPayload, Role},
    },
    types::{AppContext, AppEnvironment, Context, DatabaseContext},
};

/// Records every message instead of sending it.
#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSms {
    /// The six-digit code from the last message.
    pub fn last_code(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let (_, body) = sent.last().expect("no sms was sent");
        body.chars()
            .filter(|c| c.is_ascii_digit())
            .take(6)
            .collect()
    }
}

#[async_trait]
impl SmsSender for RecordingSms {
    async fn send(&self, to: &str, body: &str) -> SmsResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn advance(&self, delta: Duration) {
        *self.0.lock().unwrap() += delta;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct TestApp {
    pub ctx: Arc<Context>,
    pub sms: Arc<RecordingSms>,
    pub clock: Arc<MutableClock>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let sms = Arc::new(RecordingSms::default());
        let clock = Arc::new(MutableClock(Mutex::new(Utc::now())));

        let ctx = Arc::new(Context {
            app: AppContext {
                host: "127.0.0.1".to_string(),
                environment: AppEnvironment::Development,
                port: 0,
            },
            db: DatabaseContext::in_memory(clock.clone()),
            otp: Arc::new(OtpService::new(
                Arc::new(InMemoryOtpStore::new()),
                sms.clone(),
                clock.clone(),
                Duration::minutes(5),
                "+91".to_string(),
            )),
            clock: clock.clone(),
            otp_purge_interval: std::time::Duration::from_secs(60),
        });

        Self {
            router: app::router(ctx.clone()),
            ctx,
            sms,
            clock,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Inserts an account straight into the store, skipping registration.
    pub async fn seed_account(&self, name: &str, phone: &str, role: Role) -> Account {
        self.ctx
            .db
            .accounts
            .create(CreateAccountPayload {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: phone.to_string(),
                password_hash: "not-a-bcrypt-hash".to_string(),
                address: Some("4 Temple Street".to_string()),
                pincode: Some("560001".to_string()),
                role,
                latitude: Some(12.97),
                longitude: Some(77.59),
            })
            .await
            .unwrap()
    }
}
