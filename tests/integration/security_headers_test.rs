//! Response hardening headers on the assembled application

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service};
use simple_banking::entities::v1::sea_orm_active_enums::Role;
use simple_banking::testing::setup::{self, PASSWORD};

fn assert_hardened(resp: &actix_web::dev::ServiceResponse, context: &str) {
    let expected = [
        ("content-security-policy", "default-src 'self'"),
        ("strict-transport-security", "max-age=31536000; includeSubDomains"),
        ("x-frame-options", "DENY"),
        ("x-content-type-options", "nosniff"),
        ("referrer-policy", "no-referrer"),
    ];

    for (name, value) in expected {
        assert_eq!(
            resp.headers().get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "{} on {}",
            name,
            context
        );
    }
}

#[actix_web::test]
async fn test_headers_on_success() {
    let (service, state) = simple_banking::service!();
    setup::create_user(&state.db, "alice", Role::User).await;

    let req = TestRequest::get()
        .uri("/user/me")
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_hardened(&resp, "200");
}

#[actix_web::test]
async fn test_headers_on_authentication_failure() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::get().uri("/user/me").to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_hardened(&resp, "401");
}

#[actix_web::test]
async fn test_headers_on_unknown_route() {
    let (service, _state) = simple_banking::service!();

    let req = TestRequest::get().uri("/does/not/exist").to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_hardened(&resp, "404");
}

#[actix_web::test]
async fn test_headers_on_validation_failure() {
    let (service, state) = simple_banking::service!();
    let (_, accounts) = setup::create_user(&state.db, "alice", Role::User).await;

    let req = TestRequest::post()
        .uri(&format!("/account/deposit/{}", accounts[0].id))
        .insert_header(("Authorization", setup::basic("alice", PASSWORD)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_hardened(&resp, "400");
}

#[actix_web::test]
async fn test_headers_on_probes() {
    let (service, _state) = simple_banking::service!();

    for uri in ["/health", "/health/db", "/metrics"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = call_service(&service, req).await;
        assert_hardened(&resp, uri);
    }
}
