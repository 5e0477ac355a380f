use actix_web::post;

use crate::middlewares::v1::auth::UserPrincipal;
use crate::prelude::*;
use crate::requests::v1::transfer::TransferRequest;
use crate::services;

/// Transfer between accounts of the same currency
///
/// Fail if
/// - amount is not positive
/// - source account is not owned by the caller
/// - destination account does not belong to `toUserId`
/// - both ids name the same account
/// - currencies differ
/// - source balance is lower than the amount
#[utoipa::path(
    tag = "Transfer",
    security(("basic" = [])),
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer committed"),
        (status = 400, description = "Rejected transfer", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Source or destination account not found", body = ErrorResponse),
    ),
)]
#[post("/transfer")]
pub async fn transfer(
    UserPrincipal(identity): UserPrincipal,
    db: Data<DatabaseConnection>,
    Json(request): Json<TransferRequest>,
) -> impl Responder {
    services::v1::transfer::transfer(&db, &identity, request).await
}
