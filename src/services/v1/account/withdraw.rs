use super::ensure_positive;
use crate::entities::v1::accounts::Model;
use crate::metrics;
use crate::middlewares::v1::auth::Identity;
use crate::prelude::*;
use crate::requests::v1::account::AmountRequest;
use crate::responses::v1::account::Account;

#[::tracing::instrument(skip(db, identity, request), fields(user_id = identity.id, account_id = id, amount = request.amount))]
pub async fn withdraw(
    db: &DatabaseConnection,
    identity: &Identity,
    id: i32,
    request: AmountRequest,
) -> Result<Account, Error> {
    ensure_positive(request.amount)?;

    let user_id = identity.id;
    let amount = request.amount;

    let result = db
        .transaction::<_, _, Error>(move |txn| {
            Box::pin(async move {
                let account = Model::find_owned(txn, user_id, id)
                    .await?
                    .ok_or_else(|| Error::not_found("Account not found"))?;

                // Guarded on amount >= n, so a concurrent withdrawal cannot overdraw.
                if !Model::debit(txn, account.id, amount).await? {
                    return Err(Error::bad_request("Insufficient funds"));
                }

                Model::find_by_id(txn, account.id)
                    .await?
                    .ok_or_else(|| Error::internal("Account disappeared during withdrawal"))
            })
        })
        .await
        .map_err(Error::from);

    metrics::record_account_operation("withdraw", result.is_ok());

    let account = result?;
    ::tracing::info!(balance = account.amount, "Withdrawal applied");

    Ok(account.into())
}
