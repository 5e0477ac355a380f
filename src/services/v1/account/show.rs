use crate::entities::v1::accounts::Model;
use crate::middlewares::v1::auth::Identity;
use crate::prelude::*;
use crate::responses::v1::account::Account;

#[::tracing::instrument(skip(db, identity), fields(user_id = identity.id, account_id = id))]
pub async fn show(db: &DatabaseConnection, identity: &Identity, id: i32) -> Result<Account, Error> {
    let account = Model::find_owned(db, identity.id, id)
        .await?
        .ok_or_else(|| Error::not_found("Account not found"))?;

    Ok(account.into())
}
