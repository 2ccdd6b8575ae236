//! API integration tests
//!
//! These run against a live server backed by PostgreSQL. Start it with a
//! `JWT_SECRET` and an admin hash (`hash-password`) for the password in
//! `ADMIN_PASSWORD` (default "admin"), then:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn admin_password() -> String {
    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string())
}

/// Suffix keeping test rows apart from each other and from real data
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Helper to get an admin token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": admin_password()
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn register_laptop(client: &Client, serial: &str, elcot: &str) -> reqwest::Response {
    client
        .post(format!("{}/laptops", BASE_URL))
        .json(&json!({ "serialNumber": serial, "elcotNumber": elcot }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn delete_laptop(client: &Client, token: &str, id: &str) -> reqwest::Response {
    client
        .delete(format!("{}/laptops/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "definitely-wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_list_and_delete_laptop() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let serial = unique("SN");
    let elcot = unique("ELC");

    let response = register_laptop(&client, &format!("  {}  ", serial), &elcot).await;
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["serialNumber"], serial.as_str());
    let id = created["id"].as_str().expect("No laptop ID").to_string();

    // Duplicate serial, then duplicate ELCOT
    let response = register_laptop(&client, &serial, &unique("ELC")).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "This serial number already exists");

    let response = register_laptop(&client, &unique("SN"), &elcot).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "This ELCOT number already exists");

    // Found by search on the first page
    let response = client
        .get(format!("{}/laptops", BASE_URL))
        .query(&[("search", elcot.to_lowercase())])
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["laptops"][0]["serialNumber"], serial.as_str());
    assert_eq!(body["laptops"][0]["elcotNumber"], elcot.as_str());

    let response = delete_laptop(&client, &token, &id).await;
    assert_eq!(response.status(), 200);

    let response = delete_laptop(&client, &token, &id).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_assignment_rules() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let elcot = unique("ELC");
    let student = json!({
        "elcotNumber": elcot,
        "studentName": "Integration Student",
        "department": "CSB",
        "year": "1"
    });

    let response = client
        .post(format!("{}/students", BASE_URL))
        .json(&student)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = register_laptop(&client, &unique("SN"), &elcot).await;
    let laptop: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .post(format!("{}/students", BASE_URL))
        .json(&student)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/students", BASE_URL))
        .json(&student)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("Integration Student"));

    // The assignment outlives the laptop and is reported as orphaned
    let response = delete_laptop(&client, &token, laptop["id"].as_str().unwrap()).await;
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["orphanedAssignment"]["elcotNumber"], elcot.as_str());

    let response = client
        .get(format!("{}/students", BASE_URL))
        .query(&[("search", elcot.as_str()), ("department", "CSB")])
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["students"][0]["inInventory"], false);
}

#[tokio::test]
#[ignore]
async fn test_export_laptops() {
    let client = Client::new();

    let response = client
        .get(format!("{}/laptops/export", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let disposition = response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("laptop-inventory-"));
    let bytes = response.bytes().await.expect("Failed to read body");
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_delete() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/laptops/{}", BASE_URL, uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
