use sea_orm::EntityTrait;

use crate::entities::v1::{accounts, users};
use crate::middlewares::v1::auth::Identity;
use crate::prelude::*;
use crate::responses::v1::user::User;

#[::tracing::instrument(skip(db, identity), fields(user_id = identity.id))]
pub async fn me(db: &DatabaseConnection, identity: &Identity) -> Result<Json<User>, Error> {
    let user = users::Entity::find_by_id(identity.id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("User not found"))?;

    let accounts = accounts::Model::find_by_user(db, user.id).await?;

    Ok(Json((user, accounts).into()))
}
