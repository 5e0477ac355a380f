//! `/user`, `/user/list` and `/user/me`

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body_json};
use serde_json::{Value, json};
use simple_banking::entities::v1::sea_orm_active_enums::Role;
use simple_banking::middlewares::v1::auth::ADMIN_KEY_HEADER;
use simple_banking::testing::setup::{self, ADMIN_TOKEN, PASSWORD};

// =============================================================================
// CREATE
// =============================================================================

#[actix_web::test]
async fn test_admin_key_creates_user_with_opening_accounts() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::post()
        .uri("/user")
        .insert_header((ADMIN_KEY_HEADER, ADMIN_TOKEN))
        .set_json(json!({ "username": "alice", "password": "s3cret" }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "Admin key should create users");

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_i64());

    let accounts = body["accounts"].as_array().unwrap();
    assert_eq!(accounts.len(), 3, "One account per currency");

    let currencies: Vec<&str> = accounts
        .iter()
        .map(|a| a["currency"].as_str().unwrap())
        .collect();
    assert_eq!(currencies, vec!["USD", "EUR", "RUB"]);
    assert!(accounts.iter().all(|a| a["amount"] == 1));
}

#[actix_web::test]
async fn test_created_user_can_authenticate() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::post()
        .uri("/user/")
        .insert_header((ADMIN_KEY_HEADER, ADMIN_TOKEN))
        .set_json(json!({ "username": "carol", "password": "pa:ss" }))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri("/user/me/")
        .insert_header(("Authorization", setup::basic("carol", "pa:ss")))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "New user should log in with Basic");

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["username"], "carol");
}

#[actix_web::test]
async fn test_non_admin_user_cannot_create_users() {
    let (service, state) = simple_banking::service!();
    setup::create_user(&state.db, "alice", Role::User).await;

    let req = TestRequest::post()
        .uri("/user/")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({ "username": "mallory", "password": "password" }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN, "Users must not self-register");
}

#[actix_web::test]
async fn test_admin_role_user_can_create_users() {
    let (service, state) = simple_banking::service!();
    setup::create_user(&state.db, "root", Role::Admin).await;

    let req = TestRequest::post()
        .uri("/user")
        .insert_header(("Authorization", setup::basic("root", PASSWORD)))
        .set_json(json!({ "username": "dave", "password": "password" }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_create_user_without_credentials_is_unauthorized() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::post()
        .uri("/user")
        .set_json(json!({ "username": "eve", "password": "password" }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_duplicate_username_is_rejected() {
    let (service, state) = simple_banking::service!();
    setup::create_user(&state.db, "alice", Role::User).await;

    let req = TestRequest::post()
        .uri("/user")
        .insert_header((ADMIN_KEY_HEADER, ADMIN_TOKEN))
        .set_json(json!({ "username": "alice", "password": "password" }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["message"], "Username already exists");
}

#[actix_web::test]
async fn test_invalid_username_and_password_report_field_errors() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::post()
        .uri("/user")
        .insert_header((ADMIN_KEY_HEADER, ADMIN_TOKEN))
        .set_json(json!({ "username": "ab", "password": "" }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = read_body_json(resp).await;
    assert!(body["errors"]["username"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[actix_web::test]
async fn test_username_is_trimmed() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::post()
        .uri("/user")
        .insert_header((ADMIN_KEY_HEADER, ADMIN_TOKEN))
        .set_json(json!({ "username": "  bob  ", "password": "password" }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["username"], "bob");
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::post()
        .uri("/user")
        .insert_header((ADMIN_KEY_HEADER, ADMIN_TOKEN))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// LIST & ME
// =============================================================================

#[actix_web::test]
async fn test_list_returns_every_user_without_balances() {
    let (service, state) = simple_banking::service!();
    let (alice, _) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, bob_accounts) = setup::create_user(&state.db, "bob", Role::User).await;

    let req = TestRequest::get()
        .uri("/user/list/")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], alice.id);
    assert_eq!(users[1]["id"], bob.id);
    assert_eq!(users[1]["accounts"][0]["id"], bob_accounts[0].id);
    assert!(users[1]["accounts"][0].get("amount").is_none(), "Balances stay private");
}

#[actix_web::test]
async fn test_me_returns_own_profile_with_balances() {
    let (service, state) = simple_banking::service!();
    let (alice, accounts) = setup::create_user(&state.db, "alice", Role::User).await;
    setup::create_user(&state.db, "bob", Role::User).await;

    let req = TestRequest::get()
        .uri("/user/me")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["id"], alice.id);
    assert_eq!(body["accounts"].as_array().unwrap().len(), 3);
    assert_eq!(body["accounts"][0]["id"], accounts[0].id);
    assert_eq!(body["accounts"][0]["amount"], 1);
}

#[actix_web::test]
async fn test_admin_key_alone_cannot_read_profiles() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::get()
        .uri("/user/me")
        .insert_header((ADMIN_KEY_HEADER, ADMIN_TOKEN))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
