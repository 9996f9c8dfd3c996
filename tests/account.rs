mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::TestApp;
use serde_json::json;
use waterplant_backend_rs::modules::user::repository::{CreateAccountPayload, Role};

#[tokio::test]
async fn new_phone_verifies_registers_and_logs_in() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/auth/send-otp", json!({ "phone": "+15550001111" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let code = app.sms.last_code();
    assert_eq!(app.sms.sent.lock().unwrap()[0].0, "+15550001111");

    let (status, body) = app
        .post(
            "/api/auth/verify-otp",
            json!({ "phone": "+15550001111", "code": code }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isExistingAccount"], false);
    assert_eq!(body["newUser"], true);

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({
                "name": "Asha",
                "email": "Asha@Example.com",
                "phone": "+15550001111",
                "password": "s3cret-pass",
                "address": "4 Temple Street",
                "pincode": "560001"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body.to_string().contains("s3cret-pass"));

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "phone": " +15550001111 ", "password": "s3cret-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Asha");
}

#[tokio::test]
async fn code_cannot_be_used_twice() {
    let app = TestApp::new();
    app.post("/api/auth/send-otp", json!({ "phone": "+15550001111" }))
        .await;
    let code = app.sms.last_code();

    let payload = json!({ "phone": "+15550001111", "otp": code });
    let (status, _) = app.post("/api/auth/verify-otp", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.post("/api/auth/verify-otp", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP expired or not found");
}

#[tokio::test]
async fn code_expires_after_five_minutes() {
    let app = TestApp::new();
    app.post("/api/auth/send-otp", json!({ "phone": "+15550001111" }))
        .await;
    let code = app.sms.last_code();

    app.clock.advance(Duration::minutes(5) + Duration::seconds(1));

    let (status, body) = app
        .post(
            "/api/auth/verify-otp",
            json!({ "phone": "+15550001111", "code": code }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP expired");
}

#[tokio::test]
async fn requesting_again_replaces_the_pending_code() {
    let app = TestApp::new();
    app.post("/api/auth/send-otp", json!({ "phone": "+15550001111" }))
        .await;
    let first = app.sms.last_code();
    app.post("/api/auth/send-otp", json!({ "phone": "+15550001111" }))
        .await;
    let second = app.sms.last_code();

    if first != second {
        let (status, body) = app
            .post(
                "/api/auth/verify-otp",
                json!({ "phone": "+15550001111", "code": first }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid OTP");
    }

    let (status, _) = app
        .post(
            "/api/auth/verify-otp",
            json!({ "phone": "+15550001111", "code": second }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn send_otp_requires_a_phone() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/auth/send-otp", json!({ "phone": "  " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Phone number required");
    assert!(app.sms.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verifying_a_known_phone_returns_the_account() {
    let app = TestApp::new();
    let account = app.seed_account("Ravi", "+919800000001", Role::Driver).await;

    app.post("/api/auth/send-otp", json!({ "phone": "+919800000001" }))
        .await;
    let code = app.sms.last_code();

    let (status, body) = app
        .post(
            "/api/auth/verify-otp",
            json!({ "phone": "+919800000001", "code": code }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isExistingAccount"], true);
    assert_eq!(body["user"]["id"], account.id);
    assert_eq!(body["user"]["role"], "driver");
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = TestApp::new();
    let profile = json!({
        "name": "Asha",
        "email": "asha@example.com",
        "phone": "+15550001111",
        "password": "s3cret-pass"
    });

    let (status, _) = app.post("/api/auth/register", profile).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({
                "name": "Someone Else",
                "email": "ASHA@example.com",
                "phone": "+15550002222",
                "password": "another-pass"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn registration_requires_a_password_and_known_role() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({ "name": "Asha", "email": "asha@example.com", "phone": "+15550001111" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["errors"].get("password").is_some());

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({
                "name": "Asha",
                "email": "asha@example.com",
                "phone": "+15550001111",
                "password": "s3cret-pass",
                "role": "superuser"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid role");
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = TestApp::new();
    app.post(
        "/api/auth/register",
        json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+15550001111",
            "password": "s3cret-pass"
        }),
    )
    .await;

    let (wrong_password, wrong_password_body) = app
        .post(
            "/api/auth/login",
            json!({ "identifier": "+15550001111", "password": "nope" }),
        )
        .await;
    let (unknown_phone, unknown_phone_body) = app
        .post(
            "/api/auth/login",
            json!({ "identifier": "+15559999999", "password": "nope" }),
        )
        .await;

    assert_eq!(wrong_password, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_phone, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password_body, unknown_phone_body);
}

#[tokio::test]
async fn login_tries_every_account_sharing_the_phone() {
    let app = TestApp::new();
    // An older row with an unusable hash shares the phone number.
    app.seed_account("Legacy", "+15550001111", Role::Customer).await;
    app.ctx
        .db
        .accounts
        .create(CreateAccountPayload {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+15550001111".to_string(),
            password_hash: bcrypt::hash("s3cret-pass", 4).unwrap(),
            address: None,
            pincode: None,
            role: Role::Customer,
            latitude: None,
            longitude: None,
        })
        .await
        .unwrap();

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "phone": "+15550001111", "password": "s3cret-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Asha");
}

#[tokio::test]
async fn concurrent_registrations_for_one_phone_create_one_account() {
    let app = TestApp::new();
    let profile = |name: &str| {
        json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "phone": "+15550001111",
            "password": "s3cret-pass"
        })
    };

    let ((first, _), (second, second_body)) = tokio::join!(
        app.post("/api/auth/register", profile("Asha")),
        app.post("/api/auth/register", profile("Meena")),
    );

    let mut statuses = vec![first, second];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);
    if second == StatusCode::BAD_REQUEST {
        assert_eq!(second_body["error"], "User already exists");
    }

    let accounts = app
        .ctx
        .db
        .accounts
        .find_many_by_phone("+15550001111")
        .await
        .unwrap();
    assert_eq!(accounts.len(), 1);
}
