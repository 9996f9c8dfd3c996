mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::TestApp;
use serde_json::json;
use waterplant_backend_rs::modules::user::repository::Role;

#[tokio::test]
async fn assigns_a_driver_and_lists_their_customers() {
    let app = TestApp::new();
    let customer = app.seed_account("Asha", "+911111111111", Role::Customer).await;
    let driver = app.seed_account("Ravi", "+912222222222", Role::Driver).await;

    let (status, body) = app
        .post(
            "/api/users/assign-driver",
            json!({ "customerId": customer.id, "driverId": driver.id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Driver Ravi assigned to customer Asha");

    let (status, body) = app
        .get(&format!("/api/AssignedCustomers/{}", driver.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    let customers = body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["id"], customer.id);
    assert_eq!(customers[0]["address"], "4 Temple Street");
    assert!(customers[0].get("password").is_none());
}

#[tokio::test]
async fn customer_account_cannot_be_the_driver() {
    let app = TestApp::new();
    let customer = app.seed_account("Asha", "+911111111111", Role::Customer).await;
    let other_customer = app.seed_account("Meena", "+913333333333", Role::Customer).await;

    let (status, body) = app
        .post(
            "/api/users/assign-driver",
            json!({ "customerId": customer.id, "driverId": other_customer.id }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid driver ID");
}

#[tokio::test]
async fn driver_account_cannot_be_the_customer() {
    let app = TestApp::new();
    let driver = app.seed_account("Ravi", "+912222222222", Role::Driver).await;

    let (status, body) = app
        .post(
            "/api/users/assign-driver",
            json!({ "customerId": driver.id, "driverId": driver.id }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid customer ID");
}

#[tokio::test]
async fn assignment_requires_both_ids() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/users/assign-driver", json!({ "customerId": 7 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "customerId and driverId are required");
}

#[tokio::test]
async fn assigned_customers_needs_a_numeric_driver_id() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/AssignedCustomers/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid driver ID");

    let (status, body) = app.get("/api/AssignedCustomers").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Driver ID is required");
}

#[tokio::test]
async fn driver_without_customers_gets_an_empty_list() {
    let app = TestApp::new();
    let driver = app.seed_account("Ravi", "+912222222222", Role::Driver).await;

    let (status, body) = app
        .get(&format!("/api/AssignedCustomers/{}", driver.id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customers"], json!([]));
}

#[tokio::test]
async fn places_an_order_and_assigns_a_driver_to_it() {
    let app = TestApp::new();
    let customer = app.seed_account("Asha", "+911111111111", Role::Customer).await;
    let driver = app.seed_account("Ravi", "+912222222222", Role::Driver).await;

    let (status, body) = app
        .post(
            "/api/waterorder/place-order",
            json!({ "user_id": customer.id, "cans": 3, "slot": "morning", "isPremium": false }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["status"], "pending");
    let order_id = body["order"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(
            "/api/waterorder/assign-driver",
            json!({ "orderId": order_id, "driverId": customer.id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid driver ID");

    let (status, body) = app
        .post(
            "/api/waterorder/assign-driver",
            json!({ "orderId": 999, "driverId": driver.id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid order ID");

    let (status, body) = app
        .post(
            "/api/waterorder/assign-driver",
            json!({ "orderId": order_id.to_string(), "driverId": driver.id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Driver Ravi assigned to order #{}", order_id)
    );

    let (status, body) = app
        .get(&format!("/api/waterorder/history/{}", customer.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily"][0]["driver_id"], driver.id);
    assert_eq!(body["monthly"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn place_order_requires_user_cans_and_slot() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/waterorder/place-order", json!({ "user_id": 1, "cans": 2 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn place_order_accepts_numeric_strings() {
    let app = TestApp::new();
    let customer = app.seed_account("Asha", "+911111111111", Role::Customer).await;

    let (status, body) = app
        .post(
            "/api/waterorder/place-order",
            json!({ "user_id": customer.id.to_string(), "cans": "2", "slot": "evening" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["cans"], 2);

    let (status, body) = app
        .post(
            "/api/waterorder/place-order",
            json!({ "user_id": customer.id, "cans": "lots", "slot": "evening" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert!(body["errors"].get("cans").is_some());
}

#[tokio::test]
async fn lists_all_orders_and_orders_per_user_newest_first() {
    let app = TestApp::new();
    let asha = app.seed_account("Asha", "+911111111111", Role::Customer).await;
    let meena = app.seed_account("Meena", "+913333333333", Role::Customer).await;

    for (user_id, slot) in [(asha.id, "morning"), (meena.id, "evening"), (asha.id, "evening")] {
        app.post(
            "/api/waterorder/place-order",
            json!({ "user_id": user_id, "cans": 1, "slot": slot }),
        )
        .await;
        app.clock.advance(Duration::minutes(1));
    }

    let (status, body) = app.get("/api/waterorder/all").await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0]["user_id"], asha.id);
    assert_eq!(orders[0]["slot"], "evening");
    assert_eq!(orders[2]["slot"], "morning");

    let (status, body) = app.get(&format!("/api/waterorder/user/{}", meena.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/waterorder/user/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn history_buckets_follow_the_clock() {
    let app = TestApp::new();
    let customer = app.seed_account("Asha", "+911111111111", Role::Customer).await;

    app.post(
        "/api/waterorder/place-order",
        json!({ "user_id": customer.id, "cans": 2, "slot": "morning" }),
    )
    .await;
    app.clock.advance(Duration::days(2));

    let uri = format!("/api/waterorder/history/{}", customer.id);
    let (_, body) = app.get(&uri).await;
    assert_eq!(body["daily"], json!([]));
    assert_eq!(body["weekly"].as_array().unwrap().len(), 1);

    app.clock.advance(Duration::days(10));
    let (_, body) = app.get(&uri).await;
    assert_eq!(body["weekly"], json!([]));
    assert_eq!(body["monthly"].as_array().unwrap().len(), 1);
}
