//! `/transfer`

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body};
use futures_util::future::join_all;
use serde_json::json;
use simple_banking::entities::v1::accounts;
use simple_banking::entities::v1::sea_orm_active_enums::Role;
use simple_banking::testing::setup::{self, PASSWORD};

async fn balance(db: &sea_orm::DatabaseConnection, id: i32) -> i64 {
    accounts::Model::find_by_id(db, id)
        .await
        .unwrap()
        .expect("account exists")
        .amount
}

async fn fund(db: &sea_orm::DatabaseConnection, id: i32, amount: i64) {
    assert!(accounts::Model::credit(db, id, amount).await.unwrap());
}

#[actix_web::test]
async fn test_transfer_moves_amount_between_users() {
    let (service, state) = simple_banking::service!();
    let (_, alice) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, bob_accounts) = setup::create_user(&state.db, "bob", Role::User).await;
    fund(&state.db, alice[0].id, 9999).await;

    let req = TestRequest::post()
        .uri("/transfer/")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": alice[0].id,
            "toUserId": bob.id,
            "toAccountId": bob_accounts[0].id,
            "amount": 5000,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(read_body(resp).await.is_empty(), "Transfer responds with an empty body");

    assert_eq!(balance(&state.db, alice[0].id).await, 5000);
    assert_eq!(balance(&state.db, bob_accounts[0].id).await, 5001);
}

#[actix_web::test]
async fn test_transfer_towards_lower_account_id() {
    let (service, state) = simple_banking::service!();
    let (alice, alice_accounts) = setup::create_user(&state.db, "alice", Role::User).await;
    let (_, bob) = setup::create_user(&state.db, "bob", Role::User).await;
    fund(&state.db, bob[2].id, 100).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("bob", PASSWORD)))
        .set_json(json!({
            "fromAccountId": bob[2].id,
            "toUserId": alice.id,
            "toAccountId": alice_accounts[2].id,
            "amount": 101,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(balance(&state.db, bob[2].id).await, 0);
    assert_eq!(balance(&state.db, alice_accounts[2].id).await, 102);
}

#[actix_web::test]
async fn test_transfer_with_insufficient_funds_changes_nothing() {
    let (service, state) = simple_banking::service!();
    let (_, alice) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, bob_accounts) = setup::create_user(&state.db, "bob", Role::User).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": alice[0].id,
            "toUserId": bob.id,
            "toAccountId": bob_accounts[0].id,
            "amount": 2,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(balance(&state.db, alice[0].id).await, 1);
    assert_eq!(balance(&state.db, bob_accounts[0].id).await, 1);
}

#[actix_web::test]
async fn test_transfer_overflowing_destination_rolls_back_debit() {
    let (service, state) = simple_banking::service!();
    let (_, alice) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, bob_accounts) = setup::create_user(&state.db, "bob", Role::User).await;
    fund(&state.db, alice[0].id, 10).await;
    fund(&state.db, bob_accounts[0].id, i64::MAX - 5).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": alice[0].id,
            "toUserId": bob.id,
            "toAccountId": bob_accounts[0].id,
            "amount": 10,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(balance(&state.db, alice[0].id).await, 11, "Debit must be rolled back");
}

#[actix_web::test]
async fn test_transfer_between_currencies_is_rejected() {
    let (service, state) = simple_banking::service!();
    let (_, alice) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, bob_accounts) = setup::create_user(&state.db, "bob", Role::User).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": alice[0].id,
            "toUserId": bob.id,
            "toAccountId": bob_accounts[1].id,
            "amount": 1,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(balance(&state.db, alice[0].id).await, 1);
    assert_eq!(balance(&state.db, bob_accounts[1].id).await, 1);
}

#[actix_web::test]
async fn test_transfer_to_same_account_is_rejected() {
    let (service, state) = simple_banking::service!();
    let (alice, accounts) = setup::create_user(&state.db, "alice", Role::User).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": accounts[0].id,
            "toUserId": alice.id,
            "toAccountId": accounts[0].id,
            "amount": 1,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_transfer_from_foreign_account_is_not_found() {
    let (service, state) = simple_banking::service!();
    let (alice, alice_accounts) = setup::create_user(&state.db, "alice", Role::User).await;
    let (_, bob) = setup::create_user(&state.db, "bob", Role::User).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": bob[0].id,
            "toUserId": alice.id,
            "toAccountId": alice_accounts[0].id,
            "amount": 1,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(balance(&state.db, bob[0].id).await, 1);
}

#[actix_web::test]
async fn test_transfer_to_account_of_other_user_is_not_found() {
    let (service, state) = simple_banking::service!();
    let (_, alice) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, _) = setup::create_user(&state.db, "bob", Role::User).await;
    let (_, carol) = setup::create_user(&state.db, "carol", Role::User).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": alice[0].id,
            "toUserId": bob.id,
            "toAccountId": carol[0].id,
            "amount": 1,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(balance(&state.db, alice[0].id).await, 1);
}

#[actix_web::test]
async fn test_transfer_rejects_non_positive_amount() {
    let (service, state) = simple_banking::service!();
    let (_, alice) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, bob_accounts) = setup::create_user(&state.db, "bob", Role::User).await;

    let req = TestRequest::post()
        .uri("/transfer")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .set_json(json!({
            "fromAccountId": alice[0].id,
            "toUserId": bob.id,
            "toAccountId": bob_accounts[0].id,
            "amount": 0,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_transfer_without_credentials_is_unauthorized() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::post()
        .uri("/transfer")
        .set_json(json!({
            "fromAccountId": 1,
            "toUserId": 2,
            "toAccountId": 4,
            "amount": 5000,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_transfer_to_missing_user_account_is_not_found() {
    let (service, state) = simple_banking::service!();
    let (user, accounts) = setup::create_user(&state.db, "user", Role::User).await;
    assert_eq!(user.id, 1);
    assert_eq!(accounts[0].id, 1);

    let req = TestRequest::post()
        .uri("/transfer/")
        .insert_header(("Authorization", setup::basic("user", PASSWORD)))
        .set_json(json!({
            "fromAccountId": 1,
            "toUserId": 2,
            "toAccountId": 4,
            "amount": 5000,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "User 2 does not exist yet");
    assert_eq!(balance(&state.db, 1).await, 1);
}

#[actix_web::test]
async fn test_transfer_between_first_two_users() {
    let (service, state) = simple_banking::service!();
    setup::create_user(&state.db, "user", Role::User).await;
    let (other, other_accounts) = setup::create_user(&state.db, "other", Role::User).await;
    assert_eq!(other.id, 2);
    assert_eq!(other_accounts[0].id, 4);
    fund(&state.db, 1, 5000).await;

    let req = TestRequest::post()
        .uri("/transfer/")
        .insert_header(("Authorization", setup::basic("user", PASSWORD)))
        .set_json(json!({
            "fromAccountId": 1,
            "toUserId": 2,
            "toAccountId": 4,
            "amount": 5000,
        }))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(balance(&state.db, 1).await, 1);
    assert_eq!(balance(&state.db, 4).await, 5001);
}

#[actix_web::test]
async fn test_concurrent_opposite_transfers_conserve_total() {
    let (service, state) = simple_banking::service!();
    let (alice, alice_accounts) = setup::create_user(&state.db, "alice", Role::User).await;
    let (bob, bob_accounts) = setup::create_user(&state.db, "bob", Role::User).await;
    let (a, b) = (alice_accounts[0].id, bob_accounts[0].id);
    fund(&state.db, a, 99).await;
    fund(&state.db, b, 99).await;

    let transfer = |username: &str, from: i32, to_user: i32, to: i32| {
        TestRequest::post()
            .uri("/transfer")
            .insert_header(("Authorization", setup::basic(username, PASSWORD)))
            .set_json(json!({
                "fromAccountId": from,
                "toUserId": to_user,
                "toAccountId": to,
                "amount": 30,
            }))
            .to_request()
    };

    let requests = (0..10).map(|i| {
        if i % 2 == 0 {
            transfer("alice", a, bob.id, b)
        } else {
            transfer("bob", b, alice.id, a)
        }
    });

    let responses = join_all(requests.map(|req| call_service(&service, req))).await;
    for resp in &responses {
        assert!(
            resp.status() == StatusCode::OK || resp.status() == StatusCode::BAD_REQUEST,
            "unexpected status {}",
            resp.status()
        );
    }

    let (left, right) = (balance(&state.db, a).await, balance(&state.db, b).await);
    assert!(left >= 0 && right >= 0);
    assert_eq!(left + right, 200, "Transfers must neither create nor destroy money");
}
