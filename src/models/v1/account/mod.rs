use sea_orm::prelude::*;
use sea_orm::QueryOrder;
use sea_orm::sea_query::Expr;

use crate::entities::v1::accounts::{Column, Entity, Model};
use crate::prelude::now;

impl Model {
    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Looks up an account only when it belongs to `user_id`.
    pub async fn find_owned<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        id: i32,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Adds `amount` to the balance. Returns `false` when the new balance
    /// would overflow, in which case nothing is written.
    pub async fn credit<C: ConnectionTrait>(db: &C, id: i32, amount: i64) -> Result<bool, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::Amount, Expr::col(Column::Amount).add(amount))
            .col_expr(Column::UpdatedAt, Expr::value(now()))
            .filter(Column::Id.eq(id))
            .filter(Column::Amount.lte(i64::MAX - amount))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Subtracts `amount` from the balance. Returns `false` when the balance
    /// is lower than `amount`, in which case nothing is written.
    pub async fn debit<C: ConnectionTrait>(db: &C, id: i32, amount: i64) -> Result<bool, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::Amount, Expr::col(Column::Amount).sub(amount))
            .col_expr(Column::UpdatedAt, Expr::value(now()))
            .filter(Column::Id.eq(id))
            .filter(Column::Amount.gte(amount))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
