use serde::{Deserialize, Serialize};
use utoipa::{IntoResponses, ToSchema};

use crate::entities::v1::{accounts, users};
use crate::responses::v1::account::{Account, AccountSummary};

/// A user with balances, returned to the user themselves
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, IntoResponses, PartialEq, Eq)]
#[response(status = 200, description = "OK")]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "john_doe")]
    pub username: String,
    pub accounts: Vec<Account>,
}

impl From<(users::Model, Vec<accounts::Model>)> for User {
    fn from((user, accounts): (users::Model, Vec<accounts::Model>)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            accounts: accounts.into_iter().map(Account::from).collect(),
        }
    }
}

/// Directory entry of `/user/list`, enough to address a transfer
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[schema(example = 2)]
    pub id: i32,
    #[schema(example = "jane_doe")]
    pub username: String,
    pub accounts: Vec<AccountSummary>,
}

impl From<(users::Model, Vec<accounts::Model>)> for UserSummary {
    fn from((user, accounts): (users::Model, Vec<accounts::Model>)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            accounts: accounts.into_iter().map(AccountSummary::from).collect(),
        }
    }
}
