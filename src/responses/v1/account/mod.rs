use serde::{Deserialize, Serialize};
use utoipa::{IntoResponses, ToSchema};

use crate::entities::v1::accounts;
use crate::entities::v1::sea_orm_active_enums::Currency;
use crate::prelude::*;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, IntoResponses, PartialEq, Eq)]
#[response(status = 200, description = "OK")]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 5001)]
    pub amount: i64,
    #[schema(example = "USD")]
    pub currency: Currency,
}

impl From<accounts::Model> for Account {
    fn from(account: accounts::Model) -> Self {
        Self {
            id: account.id,
            amount: account.amount,
            currency: account.currency,
        }
    }
}

impl Responder for Account {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(self)
    }
}

/// Account as listed for other users, without the balance
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    #[schema(example = 4)]
    pub id: i32,
    #[schema(example = "USD")]
    pub currency: Currency,
}

impl From<accounts::Model> for AccountSummary {
    fn from(account: accounts::Model) -> Self {
        Self {
            id: account.id,
            currency: account.currency,
        }
    }
}
