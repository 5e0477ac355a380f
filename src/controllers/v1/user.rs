use actix_web::{get, post};

use crate::middlewares::v1::auth::{AdminPrincipal, UserPrincipal};
use crate::prelude::*;
use crate::requests::v1::user::UserStoreRequest;
use crate::responses::v1::user::{User, UserSummary};
use crate::security::PasswordHasher;
use crate::services;

/// Create a user
///
/// Requires the `X-SECURITY-ADMIN-KEY` header (or an `ADMIN` user). The new
/// user gets one account per currency with an opening balance of 1.
///
/// Fail if
/// - username is missing or malformed
/// - username already exists
#[utoipa::path(
    tag = "User",
    security(("admin_key" = []), ("basic" = [])),
    request_body = UserStoreRequest,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Username already exists", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 422, description = "Invalid username or password", body = ErrorResponse),
    ),
)]
#[post("/user")]
pub async fn store(
    AdminPrincipal(principal): AdminPrincipal,
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    Json(request): Json<UserStoreRequest>,
) -> impl Responder {
    ::tracing::debug!(%principal, "Creating user");

    services::v1::user::store(&db, hasher, request).await
}

/// List every user with their account ids and currencies
#[utoipa::path(
    tag = "User",
    security(("basic" = [])),
    responses(
        (status = 200, description = "OK", body = Vec<UserSummary>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
    ),
)]
#[get("/user/list")]
pub async fn list(_: UserPrincipal, db: Data<DatabaseConnection>) -> impl Responder {
    services::v1::user::list(&db).await
}

/// Profile of the caller, with balances
#[utoipa::path(
    tag = "User",
    security(("basic" = [])),
    responses(
        (status = 200, description = "OK", body = User),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
    ),
)]
#[get("/user/me")]
pub async fn me(UserPrincipal(identity): UserPrincipal, db: Data<DatabaseConnection>) -> impl Responder {
    services::v1::user::me(&db, &identity).await
}
