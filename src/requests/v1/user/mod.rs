use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStoreRequest {
    #[schema(example = "john_doe")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}
