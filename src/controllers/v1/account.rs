use actix_web::{get, post};

use crate::middlewares::v1::auth::UserPrincipal;
use crate::prelude::*;
use crate::requests::v1::account::AmountRequest;
use crate::responses::v1::account::Account;
use crate::services;

/// Find one of the caller's accounts
#[utoipa::path(
    tag = "Account",
    security(("basic" = [])),
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "OK", body = Account),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Account not found or not owned by the caller", body = ErrorResponse),
    ),
)]
#[get("/account/{id}")]
pub async fn show(
    UserPrincipal(identity): UserPrincipal,
    db: Data<DatabaseConnection>,
    id: Path<i32>,
) -> impl Responder {
    services::v1::account::show(&db, &identity, id.into_inner()).await
}

/// Deposit into one of the caller's accounts
///
/// Fail if
/// - amount is not positive
/// - account is not owned by the caller
#[utoipa::path(
    tag = "Account",
    security(("basic" = [])),
    params(("id" = i32, Path, description = "Account id")),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 400, description = "Amount is not positive", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Account not found or not owned by the caller", body = ErrorResponse),
    ),
)]
#[post("/account/deposit/{id}")]
pub async fn deposit(
    UserPrincipal(identity): UserPrincipal,
    db: Data<DatabaseConnection>,
    id: Path<i32>,
    Json(request): Json<AmountRequest>,
) -> impl Responder {
    services::v1::account::deposit(&db, &identity, id.into_inner(), request).await
}

/// Withdraw from one of the caller's accounts
///
/// Fail if
/// - amount is not positive
/// - account is not owned by the caller
/// - balance is lower than the amount
#[utoipa::path(
    tag = "Account",
    security(("basic" = [])),
    params(("id" = i32, Path, description = "Account id")),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 400, description = "Amount is not positive or funds are insufficient", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Account not found or not owned by the caller", body = ErrorResponse),
    ),
)]
#[post("/account/withdraw/{id}")]
pub async fn withdraw(
    UserPrincipal(identity): UserPrincipal,
    db: Data<DatabaseConnection>,
    id: Path<i32>,
    Json(request): Json<AmountRequest>,
) -> impl Responder {
    services::v1::account::withdraw(&db, &identity, id.into_inner(), request).await
}
