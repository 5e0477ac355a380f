use crate::entities::v1::accounts::Model;
use crate::metrics;
use crate::middlewares::v1::auth::Identity;
use crate::prelude::*;
use crate::requests::v1::transfer::TransferRequest;
use crate::services::v1::account::ensure_positive;

async fn debit<C: ConnectionTrait>(db: &C, id: i32, amount: i64) -> Result<(), Error> {
    if !Model::debit(db, id, amount).await? {
        return Err(Error::bad_request("Insufficient funds"));
    }

    Ok(())
}

async fn credit<C: ConnectionTrait>(db: &C, id: i32, amount: i64) -> Result<(), Error> {
    if !Model::credit(db, id, amount).await? {
        return Err(Error::bad_request(
            "Transfer exceeds the maximum balance of the destination account",
        ));
    }

    Ok(())
}

/// Moves `amount` between two accounts of the same currency.
///
/// Both balance updates run in one transaction and are applied in ascending
/// account id order, so opposite transfers between the same pair of
/// accounts lock rows in the same order.
#[::tracing::instrument(
    skip(db, identity, request),
    fields(
        user_id = identity.id,
        from_account_id = request.from_account_id,
        to_user_id = request.to_user_id,
        to_account_id = request.to_account_id,
        amount = request.amount,
    )
)]
pub async fn transfer(
    db: &DatabaseConnection,
    identity: &Identity,
    request: TransferRequest,
) -> Result<HttpResponse, Error> {
    ensure_positive(request.amount)?;

    let user_id = identity.id;
    let TransferRequest {
        from_account_id,
        to_user_id,
        to_account_id,
        amount,
    } = request;

    let result = db
        .transaction::<_, _, Error>(move |txn| {
            Box::pin(async move {
                let from = Model::find_owned(txn, user_id, from_account_id)
                    .await?
                    .ok_or_else(|| Error::not_found("Source account not found"))?;

                let to = Model::find_owned(txn, to_user_id, to_account_id)
                    .await?
                    .ok_or_else(|| Error::not_found("Destination account not found"))?;

                if from.id == to.id {
                    return Err(Error::bad_request("Cannot transfer to the same account"));
                }

                if from.currency != to.currency {
                    return Err(Error::bad_request(format!(
                        "Currency mismatch: {} to {}",
                        from.currency.code(),
                        to.currency.code()
                    )));
                }

                if from.id < to.id {
                    debit(txn, from.id, amount).await?;
                    credit(txn, to.id, amount).await?;
                } else {
                    credit(txn, to.id, amount).await?;
                    debit(txn, from.id, amount).await?;
                }

                Ok(from.currency)
            })
        })
        .await
        .map_err(Error::from);

    metrics::record_transfer(result.is_ok());

    let currency = result?;
    metrics::record_transferred_amount(currency.code(), amount);
    ::tracing::info!(currency = currency.code(), "Transfer committed");

    Ok(HttpResponse::Ok().finish())
}
