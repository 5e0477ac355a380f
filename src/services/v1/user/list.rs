use sea_orm::LoaderTrait;

use crate::entities::v1::{accounts, users};
use crate::prelude::*;
use crate::responses::v1::user::UserSummary;

#[::tracing::instrument(skip(db))]
pub async fn list(db: &DatabaseConnection) -> Result<Json<Vec<UserSummary>>, Error> {
    let users = users::Model::all(db).await?;
    let accounts = users.load_many(accounts::Entity, db).await?;

    let listed = users
        .into_iter()
        .zip(accounts)
        .map(|(user, mut accounts)| {
            accounts.sort_by_key(|account| account.id);
            UserSummary::from((user, accounts))
        })
        .collect::<Vec<_>>();

    ::tracing::debug!(count = listed.len(), "Listed users");

    Ok(Json(listed))
}
