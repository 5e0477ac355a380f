use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of deposit and withdraw calls
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmountRequest {
    /// Must be strictly positive
    #[schema(example = 5000, minimum = 1)]
    pub amount: i64,
}
