use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Caller-owned account to debit
    #[schema(example = 1)]
    pub from_account_id: i32,
    #[schema(example = 2)]
    pub to_user_id: i32,
    /// Account of `toUserId` to credit
    #[schema(example = 4)]
    pub to_account_id: i32,
    #[schema(example = 5000, minimum = 1)]
    pub amount: i64,
}
