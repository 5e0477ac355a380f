use sea_orm::{DbErr, SqlErr};

use crate::entities::v1::sea_orm_active_enums::Role;
use crate::entities::v1::users::Model;
use crate::metrics;
use crate::prelude::*;
use crate::requests::v1::user::UserStoreRequest;
use crate::responses::v1::user::User;
use crate::security::{PasswordHasher, Validator};

fn duplicate_or_internal(error: DbErr) -> Error {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::bad_request("Username already exists"),
        _ => error.into(),
    }
}

#[::tracing::instrument(skip(db, hasher, request), fields(username = %request.username))]
pub async fn store(
    db: &DatabaseConnection,
    hasher: Data<PasswordHasher>,
    request: UserStoreRequest,
) -> Result<Json<User>, Error> {
    let username = request.username.trim().to_string();
    let password = request.password;
    let mut validation = Validation::new();

    if username.is_empty() {
        validation.add("username", "Username is required");
    } else if !Validator::validate_username(&username) {
        validation.add(
            "username",
            "Username must be 3 to 32 characters of letters, digits, '_' or '-'",
        );
    }

    if let Err(message) = Validator::validate_password(&password) {
        validation.add("password", message);
    }

    if !validation.is_empty() {
        return Err(validation.into());
    }

    if Model::username_exists(db, &username).await? {
        ::tracing::info!("Rejected duplicate username");
        return Err(Error::bad_request("Username already exists"));
    }

    ::tracing::debug!("Hashing password with Argon2id");
    let hash = web::block(move || hasher.hash(&password)).await??;

    let (user, accounts) = db
        .transaction::<_, _, Error>(move |txn| {
            Box::pin(async move {
                Model::create(txn, username, hash, Role::User)
                    .await
                    .map_err(duplicate_or_internal)
            })
        })
        .await?;

    metrics::record_user_created();
    ::tracing::info!(user_id = user.id, "User created with opening accounts");

    Ok(Json((user, accounts).into()))
}
