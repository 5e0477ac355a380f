use sea_orm::prelude::*;
use sea_orm::{ActiveValue::Set, Iterable, QueryOrder};

use crate::entities::v1::sea_orm_active_enums::{Currency, Role};
use crate::entities::v1::accounts;
use crate::entities::v1::users::{ActiveModel, Column, Entity, Model};
use crate::prelude::now;

/// Balance given to every account opened alongside a new user
pub const OPENING_BALANCE: i64 = 1;

impl Model {
    pub async fn find_by_username<C: ConnectionTrait, T: ToString>(
        db: &C,
        username: T,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username.to_string()))
            .one(db)
            .await
    }

    pub async fn username_exists<C: ConnectionTrait, T: ToString>(
        db: &C,
        username: T,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Username.eq(username.to_string()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    pub async fn all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    /// Inserts the user followed by one account per currency.
    ///
    /// Callers run this inside a transaction so a user never exists without
    /// their accounts.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        username: String,
        password_hash: String,
        role: Role,
    ) -> Result<(Self, Vec<accounts::Model>), DbErr> {
        let timestamp = now();

        let user = ActiveModel {
            username: Set(username),
            password: Set(password_hash),
            role: Set(role),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let mut opened = Vec::with_capacity(3);
        for currency in Currency::iter() {
            let account = accounts::ActiveModel {
                user_id: Set(user.id),
                currency: Set(currency),
                amount: Set(OPENING_BALANCE),
                created_at: Set(timestamp),
                updated_at: Set(timestamp),
                ..Default::default()
            }
            .insert(db)
            .await?;

            opened.push(account);
        }

        Ok((user, opened))
    }
}
